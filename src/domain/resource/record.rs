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

use crate::domain::config::duration::{parse_poll_interval, parse_timeout};
use crate::domain::resource::descriptor::ResourceDescriptor;
use crate::domain::resource::identity::ResourceId;
use crate::domain::schema::{apply_defaults, from_wire, to_wire, validate_object};
use crate::infrastructure::constants::{DEFAULT_POLL_INTERVAL, DEFAULT_UPSERT_TIMEOUT};
use crate::shared::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordMetadata {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    // Server-assigned, never sent on apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<String>,
}

fn default_poll_interval() -> String {
    DEFAULT_POLL_INTERVAL.to_string()
}

fn default_upsert_timeout() -> String {
    DEFAULT_UPSERT_TIMEOUT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitForDelete {
    pub timeout: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

impl WaitForDelete {
    pub fn timeout(&self) -> Result<Duration> {
        parse_timeout(&self.timeout)
    }

    pub fn poll_interval(&self) -> Result<Duration> {
        parse_poll_interval(&self.poll_interval)
    }
}

/// One JSONPath expression and the value it must yield.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitCondition {
    pub jsonpath: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitForUpsert {
    pub conditions: Vec<WaitCondition>,
    #[serde(default = "default_upsert_timeout")]
    pub timeout: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

impl WaitForUpsert {
    pub fn timeout(&self) -> Result<Duration> {
        parse_timeout(&self.timeout)
    }

    pub fn poll_interval(&self) -> Result<Duration> {
        parse_poll_interval(&self.poll_interval)
    }
}

/// A custom object as seen from configuration: identity, opaque metadata,
/// the spec keyed by attribute names, and per-call settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceRecord {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub metadata: RecordMetadata,
    #[serde(default)]
    pub spec: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_conflicts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_upsert: Option<WaitForUpsert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_delete: Option<WaitForDelete>,
    /// Last observed `status` of the object, as reported by the operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

impl ResourceRecord {
    pub fn new(type_name: impl Into<String>, namespace: &str, name: &str) -> Self {
        Self {
            type_name: type_name.into(),
            id: None,
            api_version: None,
            kind: None,
            metadata: RecordMetadata {
                name: name.to_string(),
                namespace: namespace.to_string(),
                ..Default::default()
            },
            spec: Map::new(),
            force_conflicts: None,
            field_manager: None,
            wait_for_upsert: None,
            wait_for_delete: None,
            status: None,
        }
    }

    pub fn with_spec(mut self, spec: Value) -> Self {
        if let Value::Object(map) = spec {
            self.spec = map;
        }
        self
    }

    /// Load a record from a YAML or JSON file.
    pub fn from_file<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            ProviderError::config_error(format!(
                "Failed to read record file {}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_str_any(&content)
    }

    /// YAML is a superset of JSON, one parser covers both.
    pub fn from_str_any(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn identity(&self) -> ResourceId {
        ResourceId::new(&self.metadata.namespace, &self.metadata.name)
    }

    /// Check identity and spec against the descriptor, collecting every
    /// problem into a single validation error.
    pub fn validate(&self, descriptor: &ResourceDescriptor) -> Result<()> {
        let mut problems = match self.identity().validate() {
            Ok(()) => Vec::new(),
            Err(ProviderError::Validation(problems)) => problems,
            Err(other) => return Err(other),
        };

        validate_object(&descriptor.spec, &self.spec, "spec", &mut problems);

        if let Some(wait) = &self.wait_for_delete {
            if let Err(e) = wait.timeout().and(wait.poll_interval()) {
                problems.push(format!("wait_for_delete: {}", e));
            }
        }
        if let Some(wait) = &self.wait_for_upsert {
            if let Err(e) = wait.timeout().and(wait.poll_interval()) {
                problems.push(format!("wait_for_upsert: {}", e));
            }
            if wait.conditions.is_empty() {
                problems.push("wait_for_upsert.conditions: at least one condition is required".to_string());
            }
        }
        if let Some(manager) = &self.field_manager {
            if manager.trim().is_empty() {
                problems.push("field_manager: must not be empty".to_string());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ProviderError::Validation(problems))
        }
    }

    /// Fill in schema defaults for unset spec attributes.
    pub fn apply_defaults(&mut self, descriptor: &ResourceDescriptor) {
        apply_defaults(&descriptor.spec, &mut self.spec);
    }

    /// Render the Kubernetes object for this record.
    pub fn to_wire(&self, descriptor: &ResourceDescriptor) -> Value {
        let mut metadata = Map::new();
        metadata.insert("name".to_string(), json!(self.metadata.name));
        metadata.insert("namespace".to_string(), json!(self.metadata.namespace));
        if !self.metadata.labels.is_empty() {
            metadata.insert("labels".to_string(), json!(self.metadata.labels));
        }
        if !self.metadata.annotations.is_empty() {
            metadata.insert("annotations".to_string(), json!(self.metadata.annotations));
        }

        json!({
            "apiVersion": descriptor.api_version(),
            "kind": descriptor.kind,
            "metadata": metadata,
            "spec": to_wire(&descriptor.spec, &self.spec),
        })
    }

    /// Overwrite identity, metadata and spec from a server object and
    /// recompute the computed fields.
    pub fn refresh_from_wire(&mut self, descriptor: &ResourceDescriptor, object: &Value) -> Result<()> {
        let metadata = object
            .get("metadata")
            .and_then(Value::as_object)
            .ok_or_else(|| ProviderError::Decode("object has no metadata".to_string()))?;

        let string_field = |key: &str| -> Result<String> {
            metadata
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ProviderError::Decode(format!("metadata.{} is missing", key)))
        };
        let optional_string = |key: &str| metadata.get(key).and_then(Value::as_str).map(str::to_string);
        let string_map = |key: &str| -> Result<BTreeMap<String, String>> {
            match metadata.get(key) {
                None | Some(Value::Null) => Ok(BTreeMap::new()),
                Some(value) => serde_json::from_value(value.clone())
                    .map_err(|e| ProviderError::Decode(format!("metadata.{}: {}", key, e))),
            }
        };

        self.metadata = RecordMetadata {
            name: string_field("name")?,
            namespace: string_field("namespace")?,
            labels: string_map("labels")?,
            annotations: string_map("annotations")?,
            uid: optional_string("uid"),
            resource_version: optional_string("resourceVersion"),
            generation: metadata.get("generation").and_then(Value::as_i64),
            creation_timestamp: optional_string("creationTimestamp"),
        };

        self.spec = match object.get("spec") {
            Some(Value::Object(spec)) => from_wire(&descriptor.spec, spec),
            None | Some(Value::Null) => Map::new(),
            Some(_) => return Err(ProviderError::Decode("spec is not an object".to_string())),
        };
        self.status = object.get("status").filter(|s| !s.is_null()).cloned();

        self.type_name = descriptor.type_name();
        self.api_version = Some(descriptor.api_version());
        self.kind = Some(descriptor.kind.clone());
        self.id = Some(self.identity().id());
        Ok(())
    }
}
