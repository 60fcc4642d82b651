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

//! Attribute fragments shared by several Hazelcast CRDs.

use crate::domain::schema::Attribute;

pub const IMAGE_PULL_POLICIES: &[&str] = &["Always", "Never", "IfNotPresent"];
pub const IN_MEMORY_FORMATS: &[&str] = &["BINARY", "OBJECT", "NATIVE"];

pub fn hazelcast_resource_name() -> Attribute {
    Attribute::string("hazelcast_resource_name")
        .required()
        .non_empty()
        .describe("Name of the Hazelcast resource this object is created for.")
}

/// Name of the data structure inside Hazelcast; the object name when unset.
pub fn data_structure_name() -> Attribute {
    Attribute::string("name")
        .describe("Name of the data structure config to be created. If empty, CR name will be used.")
}

pub fn backup_counts() -> Vec<Attribute> {
    vec![
        Attribute::int64("backup_count")
            .at_least(0)
            .validate(crate::domain::schema::Validator::AtMost(6))
            .default_value(1)
            .describe("Number of synchronous backups."),
        Attribute::int64("async_backup_count")
            .at_least(0)
            .validate(crate::domain::schema::Validator::AtMost(6))
            .default_value(0)
            .describe("Number of asynchronous backups."),
    ]
}

pub fn user_code_namespace() -> Attribute {
    Attribute::string("user_code_namespace")
        .describe("Name of the User Code Namespace applied to this instance.")
}

pub fn image_pull_secrets() -> Attribute {
    Attribute::object_list("image_pull_secrets", vec![Attribute::string("name")])
}

pub fn resources() -> Attribute {
    Attribute::object(
        "resources",
        vec![
            Attribute::string_map("limits"),
            Attribute::string_map("requests"),
        ],
    )
    .describe("Compute resources required by the pods.")
}

pub fn scheduling() -> Attribute {
    Attribute::object(
        "scheduling",
        vec![
            Attribute::dynamic("affinity"),
            Attribute::string_map("node_selector"),
            Attribute::object_list(
                "tolerations",
                vec![
                    Attribute::string("effect"),
                    Attribute::string("key"),
                    Attribute::string("operator"),
                    Attribute::int64("toleration_seconds"),
                    Attribute::string("value"),
                ],
            ),
            Attribute::dynamic("topology_spread_constraints"),
        ],
    )
    .describe("Scheduling details.")
}

pub fn event_journal() -> Attribute {
    Attribute::object(
        "event_journal",
        vec![
            Attribute::int64("capacity").at_least(0).default_value(10000),
            Attribute::int64("time_to_live_seconds").default_value(0),
        ],
    )
}

/// TLS settings shared by `Hazelcast` and the cluster list of `ManagementCenter`.
pub fn tls() -> Attribute {
    Attribute::object(
        "tls",
        vec![
            Attribute::string("secret_name")
                .required()
                .describe("Name of the secret with TLS certificate and key."),
            Attribute::string("mutual_authentication")
                .one_of(&["None", "Required", "Optional"])
                .default_value("None"),
        ],
    )
}

pub fn bucket_secret() -> Vec<Attribute> {
    vec![
        Attribute::string("bucket_uri")
            .with_wire("bucketURI")
            .describe("Full path to blob storage bucket."),
        Attribute::string("secret_name")
            .describe("Name of the secret with credentials for cloud providers."),
    ]
}
