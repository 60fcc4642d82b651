// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::common::{
    backup_counts, data_structure_name, event_journal, hazelcast_resource_name,
    user_code_namespace, IN_MEMORY_FORMATS,
};
use crate::domain::resource::descriptor::ResourceDescriptor;
use crate::domain::schema::Attribute;

pub fn map() -> ResourceDescriptor {
    let mut spec = vec![data_structure_name()];
    spec.extend(backup_counts());
    spec.extend(vec![
        Attribute::int64("time_to_live_seconds")
            .at_least(0)
            .default_value(0)
            .describe("Maximum time in seconds for each entry to stay in the map."),
        Attribute::int64("max_idle_seconds")
            .at_least(0)
            .default_value(0)
            .describe("Maximum time in seconds for each entry to stay idle in the map."),
        Attribute::object(
            "eviction",
            vec![
                Attribute::string("eviction_policy")
                    .one_of(&["NONE", "LRU", "LFU", "RANDOM"])
                    .default_value("NONE"),
                Attribute::int64("max_size").at_least(0).default_value(0),
                Attribute::string("max_size_policy")
                    .one_of(&[
                        "PER_NODE",
                        "PER_PARTITION",
                        "USED_HEAP_SIZE",
                        "USED_HEAP_PERCENTAGE",
                        "FREE_HEAP_SIZE",
                        "FREE_HEAP_PERCENTAGE",
                        "USED_NATIVE_MEMORY_SIZE",
                        "USED_NATIVE_MEMORY_PERCENTAGE",
                        "FREE_NATIVE_MEMORY_SIZE",
                        "FREE_NATIVE_MEMORY_PERCENTAGE",
                    ])
                    .default_value("PER_NODE"),
            ],
        ),
        Attribute::bool("read_backup_data").default_value(false),
        Attribute::string("in_memory_format")
            .one_of(IN_MEMORY_FORMATS)
            .default_value("BINARY"),
        Attribute::object_list(
            "indexes",
            vec![
                Attribute::string("name"),
                Attribute::string("type").one_of(&["SORTED", "HASH", "BITMAP"]),
                Attribute::string_list("attributes"),
                Attribute::object(
                    "bitmap_index_options",
                    vec![
                        Attribute::string("unique_key").required(),
                        Attribute::string("unique_key_transition")
                            .required()
                            .one_of(&["OBJECT", "LONG", "RAW"]),
                    ],
                ),
            ],
        ),
        Attribute::object_list(
            "attributes",
            vec![
                Attribute::string("name").required(),
                Attribute::string("extractor_class_name").required(),
            ],
        ),
        Attribute::bool("persistence_enabled").default_value(false),
        hazelcast_resource_name(),
        Attribute::object_list(
            "entry_listeners",
            vec![
                Attribute::string("class_name").required().non_empty(),
                Attribute::bool("include_values").default_value(true),
                Attribute::bool("local").default_value(false),
            ],
        ),
        Attribute::object(
            "map_store",
            vec![
                Attribute::string("initial_mode")
                    .one_of(&["LAZY", "EAGER"])
                    .default_value("LAZY"),
                Attribute::string("class_name").required().non_empty(),
                Attribute::int64("write_delay_seconds").at_least(0),
                Attribute::int64("write_batch_size").at_least(1),
                Attribute::bool("write_coalescing"),
                Attribute::string("properties_secret_name"),
            ],
        )
        .describe("Configuration options when you want to load/store the map entries from/to a persistent data store."),
        Attribute::object(
            "near_cache",
            vec![
                Attribute::string("name").default_value("default"),
                Attribute::string("in_memory_format")
                    .one_of(&["BINARY", "OBJECT"])
                    .default_value("BINARY"),
                Attribute::bool("invalidate_on_change").default_value(true),
                Attribute::int64("time_to_live_seconds").at_least(0).default_value(0),
                Attribute::int64("max_idle_seconds").at_least(0).default_value(0),
                Attribute::object(
                    "eviction",
                    vec![
                        Attribute::string("eviction_policy")
                            .one_of(&["NONE", "LRU", "LFU", "RANDOM"])
                            .default_value("NONE"),
                        Attribute::string("max_size_policy")
                            .one_of(&["ENTRY_COUNT", "USED_NATIVE_MEMORY_SIZE", "USED_NATIVE_MEMORY_PERCENTAGE", "FREE_NATIVE_MEMORY_SIZE", "FREE_NATIVE_MEMORY_PERCENTAGE"])
                            .default_value("ENTRY_COUNT"),
                        Attribute::int64("size").at_least(0).default_value(0),
                    ],
                ),
                Attribute::bool("cache_local_entries").default_value(true),
            ],
        ),
        event_journal(),
        Attribute::object(
            "tiered_store",
            vec![
                Attribute::string("memory_capacity").default_value("256M"),
                Attribute::string("disk_device_name"),
            ],
        ),
        Attribute::object(
            "merkle_tree",
            vec![Attribute::int64("depth").at_least(2).default_value(10)],
        ),
        user_code_namespace(),
    ]);

    ResourceDescriptor::hazelcast("Map", "maps")
        .with_description("Map is the Schema for the maps API")
        .with_spec(spec)
}

pub fn topic() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("Topic", "topics")
        .with_description("Topic is the Schema for the topics API")
        .with_spec(vec![
            data_structure_name(),
            Attribute::bool("global_ordering_enabled")
                .default_value(false)
                .describe("When true all nodes listening to the same topic get their messages in the same order"),
            Attribute::bool("multi_threading_enabled")
                .default_value(false)
                .describe("When true enables multi-threaded processing of incoming messages"),
            hazelcast_resource_name(),
            user_code_namespace(),
        ])
}

pub fn queue() -> ResourceDescriptor {
    let mut spec = vec![data_structure_name()];
    spec.extend(backup_counts());
    spec.extend(vec![
        Attribute::int64("max_size")
            .at_least(0)
            .default_value(0)
            .describe("Max size of the queue, 0 means no limit."),
        Attribute::int64("empty_queue_ttl_seconds")
            .at_least(-1)
            .default_value(-1)
            .describe("Time in seconds after which an empty queue is destroyed, -1 disables it."),
        Attribute::string("priority_comparator_class_name"),
        hazelcast_resource_name(),
        user_code_namespace(),
    ]);

    ResourceDescriptor::hazelcast("Queue", "queues")
        .with_description("Queue is the Schema for the queues API")
        .with_spec(spec)
}

pub fn cache() -> ResourceDescriptor {
    let mut spec = vec![data_structure_name()];
    spec.extend(backup_counts());
    spec.extend(vec![
        Attribute::string("key_type").describe("Class name of the key type"),
        Attribute::string("value_type").describe("Class name of the value type"),
        Attribute::bool("persistence_enabled").default_value(false),
        hazelcast_resource_name(),
        Attribute::string("in_memory_format")
            .one_of(IN_MEMORY_FORMATS)
            .default_value("BINARY"),
        event_journal(),
        Attribute::object(
            "merkle_tree",
            vec![Attribute::int64("depth").at_least(2).default_value(10)],
        ),
        user_code_namespace(),
    ]);

    ResourceDescriptor::hazelcast("Cache", "caches")
        .with_description("Cache is the Schema for the caches API")
        .with_spec(spec)
}

pub fn multi_map() -> ResourceDescriptor {
    let mut spec = vec![data_structure_name()];
    spec.extend(backup_counts());
    spec.extend(vec![
        Attribute::bool("binary")
            .default_value(false)
            .describe("Specifies in which format data will be stored in your MultiMap."),
        Attribute::string("collection_type")
            .one_of(&["SET", "LIST"])
            .default_value("SET"),
        hazelcast_resource_name(),
        user_code_namespace(),
    ]);

    ResourceDescriptor::hazelcast("MultiMap", "multimaps")
        .with_description("MultiMap is the Schema for the multimaps API")
        .with_spec(spec)
}

pub fn replicated_map() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("ReplicatedMap", "replicatedmaps")
        .with_description("ReplicatedMap is the Schema for the replicatedmaps API")
        .with_spec(vec![
            data_structure_name(),
            Attribute::bool("async_fillup").default_value(true),
            Attribute::string("in_memory_format")
                .one_of(&["OBJECT", "BINARY"])
                .default_value("OBJECT"),
            hazelcast_resource_name(),
            user_code_namespace(),
        ])
}
