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

use super::common::hazelcast_resource_name;
use crate::domain::resource::descriptor::ResourceDescriptor;
use crate::domain::schema::Attribute;

pub fn jet_job() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("JetJob", "jetjobs")
        .with_description("JetJob is the Schema for the jetjobs API")
        .with_spec(vec![
            Attribute::string("name")
                .optional_computed()
                .describe("Name of the JetJob to be created. If empty, CR name will be used."),
            hazelcast_resource_name(),
            Attribute::string("state")
                .required()
                .one_of(&["Running", "Suspended", "Canceled", "Restarted"]),
            Attribute::string("jar_name").describe("Name of the JAR file that contains the job."),
            Attribute::string("main_class"),
            Attribute::string("initial_snapshot_resource_name"),
            Attribute::object(
                "bucket_config",
                vec![
                    Attribute::string("bucket_uri").with_wire("bucketURI").required().non_empty(),
                    Attribute::string("secret_name"),
                ],
            ),
            Attribute::string("remote_url").with_wire("remoteURL"),
            Attribute::object(
                "job_config",
                vec![
                    Attribute::string("processing_guarantee")
                        .one_of(&["NONE", "AT_LEAST_ONCE", "EXACTLY_ONCE"]),
                    Attribute::int64("snapshot_interval_millis").at_least(0),
                    Attribute::bool("auto_scaling"),
                    Attribute::bool("split_brain_protection_enabled"),
                    Attribute::int64("max_processor_accumulated_records").at_least(1),
                    Attribute::int64("timeout_millis").at_least(0),
                ],
            ),
            Attribute::dynamic("parameters"),
        ])
}

pub fn jet_job_snapshot() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("JetJobSnapshot", "jetjobsnapshots")
        .with_description("JetJobSnapshot is the Schema for the jetjobsnapshots API")
        .with_spec(vec![
            Attribute::string("name"),
            Attribute::bool("cancel_job")
                .default_value(false)
                .describe("Cancel the Jet job after taking a snapshot"),
            Attribute::string("jet_job_resource_name")
                .required()
                .non_empty()
                .describe("Name of the JetJob resource to take the snapshot of"),
        ])
}
