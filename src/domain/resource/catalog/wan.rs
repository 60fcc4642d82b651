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

use crate::domain::resource::descriptor::ResourceDescriptor;
use crate::domain::schema::Attribute;

pub fn wan_replication() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("WanReplication", "wanreplications")
        .with_description("WanReplication is the Schema for the wanreplications API")
        .with_spec(vec![
            Attribute::object_list(
                "resources",
                vec![
                    Attribute::string("name").required().non_empty(),
                    Attribute::string("kind")
                        .one_of(&["Map", "Hazelcast"])
                        .default_value("Map"),
                ],
            )
            .required(),
            Attribute::string("target_cluster_name")
                .required()
                .non_empty()
                .describe("ClusterName is the clusterName field of the target Hazelcast resource."),
            Attribute::string("endpoints")
                .required()
                .non_empty()
                .describe("IPs of the Hazelcast cluster members, comma separated."),
            Attribute::object(
                "queue",
                vec![
                    Attribute::int64("capacity").at_least(0).default_value(10000),
                    Attribute::string("full_behavior")
                        .one_of(&[
                            "DISCARD_AFTER_MUTATION",
                            "THROW_EXCEPTION",
                            "THROW_EXCEPTION_ONLY_IF_REPLICATION_ACTIVE",
                        ])
                        .default_value("DISCARD_AFTER_MUTATION"),
                ],
            ),
            Attribute::object(
                "batch",
                vec![
                    Attribute::int64("size").at_least(1).default_value(500),
                    Attribute::int64("maximum_delay").at_least(0).default_value(1000),
                ],
            ),
            Attribute::object(
                "acknowledgement",
                vec![
                    Attribute::string("type")
                        .one_of(&["ACK_ON_RECEIPT", "ACK_ON_OPERATION_COMPLETE"])
                        .default_value("ACK_ON_RECEIPT"),
                    Attribute::int64("timeout").at_least(0).default_value(60000),
                ],
            ),
            Attribute::string("sync_consistency_check_strategy")
                .one_of(&["NONE", "MERKLE_TREES"])
                .default_value("NONE"),
        ])
}

pub fn wan_sync() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("WanSync", "wansyncs")
        .with_description("WanSync is the Schema for the wansyncs API")
        .with_spec(vec![Attribute::string("wan_replication_resource_name")
            .required()
            .non_empty()
            .describe("WanReplicationResourceName is the name of WanReplication CR that contains the WAN publisher configuration.")])
}
