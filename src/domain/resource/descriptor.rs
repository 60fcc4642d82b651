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

use crate::domain::schema::Attribute;
use crate::infrastructure::constants::{HAZELCAST_GROUP, HAZELCAST_VERSION};
use kube::discovery::ApiResource;

/// Everything the engine needs to manage one custom resource type: where it
/// lives in the API and what its spec looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescriptor {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
    pub description: String,
    pub spec: Vec<Attribute>,
}

impl ResourceDescriptor {
    pub fn new(group: &str, version: &str, kind: &str, plural: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
            plural: plural.to_string(),
            description: String::new(),
            spec: Vec::new(),
        }
    }

    /// A `hazelcast.com/v1alpha1` resource.
    pub fn hazelcast(kind: &str, plural: &str) -> Self {
        Self::new(HAZELCAST_GROUP, HAZELCAST_VERSION, kind, plural)
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_spec(mut self, spec: Vec<Attribute>) -> Self {
        self.spec = spec;
        self
    }

    /// `hazelcast.com` + `Map` + `v1alpha1` -> `hazelcast_com_map_v1alpha1`
    pub fn type_name(&self) -> String {
        format!(
            "{}_{}_{}",
            self.group.replace(['.', '-'], "_"),
            self.kind.to_lowercase(),
            self.version
        )
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: self.api_version(),
            kind: self.kind.clone(),
            plural: self.plural.clone(),
        }
    }
}
