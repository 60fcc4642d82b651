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

use super::common::{bucket_secret, hazelcast_resource_name};
use crate::domain::resource::descriptor::ResourceDescriptor;
use crate::domain::schema::Attribute;

pub fn user_code_namespace() -> ResourceDescriptor {
    ResourceDescriptor::hazelcast("UserCodeNamespace", "usercodenamespaces")
        .with_description("UserCodeNamespace is the Schema for the usercodenamespaces API")
        .with_spec(vec![
            Attribute::object("bucket_config", bucket_secret()),
            Attribute::string("config_map").describe("Name of the ConfigMap with the user code."),
            hazelcast_resource_name(),
        ])
}
