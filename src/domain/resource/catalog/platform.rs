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

use super::common::{image_pull_secrets, resources, scheduling, tls, IMAGE_PULL_POLICIES};
use crate::domain::resource::descriptor::ResourceDescriptor;
use crate::domain::schema::{Attribute, Validator};

/// The Hazelcast cluster itself.
pub fn hazelcast() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("Hazelcast", "hazelcasts")
        .with_description("Hazelcast is the Schema for the hazelcasts API")
        .with_spec(vec![
            Attribute::int64("cluster_size")
                .at_least(0)
                .default_value(3)
                .describe("Number of Hazelcast members in the cluster."),
            Attribute::string("repository")
                .default_value("docker.io/hazelcast/hazelcast")
                .describe("Repository to pull the Hazelcast Platform image from."),
            Attribute::string("version")
                .default_value("5.5.0")
                .describe("Version of Hazelcast Platform."),
            Attribute::string("image_pull_policy")
                .one_of(IMAGE_PULL_POLICIES)
                .default_value("IfNotPresent"),
            image_pull_secrets(),
            Attribute::string("license_key_secret_name")
                .describe("Name of the secret with Hazelcast Enterprise License Key."),
            Attribute::string("cluster_name").default_value("dev"),
            Attribute::object(
                "expose_externally",
                vec![
                    Attribute::string("type")
                        .one_of(&["Smart", "Unisocket"])
                        .default_value("Smart"),
                    Attribute::string("discovery_service_type")
                        .one_of(&["LoadBalancer", "NodePort"])
                        .default_value("LoadBalancer"),
                    Attribute::string("member_access").one_of(&[
                        "NodePortExternalIP",
                        "NodePortNodeName",
                        "LoadBalancer",
                    ]),
                ],
            )
            .describe("Configuration to expose Hazelcast cluster to external clients."),
            Attribute::object(
                "persistence",
                vec![
                    Attribute::string("base_dir"),
                    Attribute::string("cluster_data_recovery_policy")
                        .one_of(&[
                            "FullRecoveryOnly",
                            "PartialRecoveryMostRecent",
                            "PartialRecoveryMostComplete",
                        ])
                        .default_value("FullRecoveryOnly"),
                    Attribute::object(
                        "pvc",
                        vec![
                            Attribute::string_list("access_modes"),
                            Attribute::string("request_storage"),
                            Attribute::string("storage_class_name"),
                        ],
                    ),
                    Attribute::string("startup_action").one_of(&["ForceStart", "PartialStart"]),
                    Attribute::int64("data_recovery_timeout").at_least(0),
                    Attribute::object(
                        "restore",
                        vec![
                            Attribute::string("hot_backup_resource_name"),
                            Attribute::object(
                                "bucket_config",
                                super::common::bucket_secret(),
                            ),
                        ],
                    ),
                ],
            ),
            Attribute::object(
                "jvm",
                vec![
                    Attribute::object(
                        "memory",
                        vec![
                            Attribute::string("initial_ram_percentage").with_wire("initialRAMPercentage"),
                            Attribute::string("min_ram_percentage").with_wire("minRAMPercentage"),
                            Attribute::string("max_ram_percentage").with_wire("maxRAMPercentage"),
                        ],
                    ),
                    Attribute::object(
                        "gc",
                        vec![
                            Attribute::bool("logging"),
                            Attribute::string("collector").one_of(&["Serial", "Parallel", "G1"]),
                        ],
                    ),
                    Attribute::string_list("args"),
                ],
            ),
            Attribute::string("high_availability_mode").one_of(&["NODE", "ZONE"]),
            Attribute::object(
                "agent",
                vec![
                    Attribute::string("repository").default_value("docker.io/hazelcast/platform-operator-agent"),
                    Attribute::string("version")
                        .optional_computed()
                        .describe("Agent version; the operator picks one matching its own release when unset."),
                ],
            ),
            resources(),
            scheduling(),
            Attribute::string_map("properties")
                .describe("Hazelcast system properties."),
            Attribute::string("logging_level")
                .one_of(&["OFF", "FATAL", "ERROR", "WARN", "INFO", "DEBUG", "TRACE", "ALL"])
                .default_value("INFO"),
            tls(),
            Attribute::object(
                "native_memory",
                vec![
                    Attribute::string("allocator_type")
                        .one_of(&["STANDARD", "POOLED"])
                        .default_value("STANDARD"),
                    Attribute::string("size").default_value("512M"),
                    Attribute::string("min_block_size"),
                    Attribute::string("page_size"),
                    Attribute::int64("metadata_space_percentage")
                        .at_least(0)
                        .validate(Validator::AtMost(100)),
                ],
            ),
            Attribute::object(
                "management_center",
                vec![
                    Attribute::bool("scripting_enabled").default_value(false),
                    Attribute::bool("console_enabled").default_value(false),
                    Attribute::bool("data_access_enabled").default_value(true),
                ],
            ),
            Attribute::object(
                "user_code_namespaces",
                vec![Attribute::bool("enabled")],
            ),
            Attribute::object(
                "cp_subsystem",
                vec![
                    Attribute::int64("session_ttl_seconds").at_least(0),
                    Attribute::int64("session_heartbeat_interval_seconds").at_least(0),
                    Attribute::int64("missing_cp_member_auto_removal_seconds").at_least(0),
                    Attribute::bool("fail_on_indeterminate_operation_state"),
                    Attribute::int64("data_load_timeout_seconds").at_least(1),
                    Attribute::object(
                        "pvc",
                        vec![
                            Attribute::string_list("access_modes"),
                            Attribute::string("request_storage"),
                            Attribute::string("storage_class_name"),
                        ],
                    ),
                ],
            ),
            Attribute::dynamic("advanced_network"),
            Attribute::dynamic("env"),
        ])
}

pub fn management_center() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("ManagementCenter", "managementcenters")
        .with_description("ManagementCenter is the Schema for the managementcenters API")
        .with_spec(vec![
            Attribute::string("repository").default_value("docker.io/hazelcast/management-center"),
            Attribute::string("version").default_value("5.5.0"),
            Attribute::string("image_pull_policy")
                .one_of(IMAGE_PULL_POLICIES)
                .default_value("IfNotPresent"),
            image_pull_secrets(),
            Attribute::string("license_key_secret_name"),
            Attribute::object_list(
                "hazelcast_clusters",
                vec![
                    Attribute::string("name").required().non_empty(),
                    Attribute::string("address").required().non_empty(),
                    tls(),
                ],
            )
            .describe("Connection configuration for the Hazelcast clusters that Management Center will monitor."),
            Attribute::object(
                "external_connectivity",
                vec![
                    Attribute::string("type")
                        .one_of(&["ClusterIP", "NodePort", "LoadBalancer"])
                        .default_value("LoadBalancer"),
                    Attribute::object(
                        "ingress",
                        vec![
                            Attribute::string("hostname").required(),
                            Attribute::string("ingress_class_name"),
                            Attribute::string_map("annotations"),
                            Attribute::string("path").default_value("/"),
                        ],
                    ),
                    Attribute::object("route", vec![Attribute::string("hostname").required()]),
                ],
            ),
            Attribute::object(
                "persistence",
                vec![
                    Attribute::bool("enabled").default_value(true),
                    Attribute::string("existing_volume_claim_name"),
                    Attribute::string("size").default_value("10Gi"),
                    Attribute::string("storage_class"),
                ],
            ),
            resources(),
            scheduling(),
            Attribute::object("jvm", vec![Attribute::string_list("args")]),
            Attribute::object(
                "security_providers",
                vec![Attribute::object(
                    "ldap",
                    vec![
                        Attribute::string("url").required().non_empty(),
                        Attribute::string("credentials_secret_name").required(),
                        Attribute::string("user_dn").with_wire("userDN").required(),
                        Attribute::string("user_search_filter").required(),
                        Attribute::string_list("admin_groups").required(),
                        Attribute::string_list("user_groups").required(),
                        Attribute::string_list("read_only_user_groups").required(),
                        Attribute::string_list("metrics_only_groups").required(),
                        Attribute::string("group_dn").with_wire("groupDN").required(),
                        Attribute::string("group_search_filter").required(),
                        Attribute::bool("nested_group_search").default_value(false),
                    ],
                )],
            ),
        ])
}
