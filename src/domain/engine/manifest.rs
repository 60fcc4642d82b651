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

use crate::domain::config::ProviderConfig;
use crate::domain::engine::jsonpath::JsonPath;
use crate::domain::resource::{ResourceDescriptor, ResourceRecord};
use crate::shared::error::{ProviderError, Result};
use serde_json::Value;

/// Normalize a planned record: default namespace, schema defaults, then
/// validation of everything that can be checked without the cluster.
pub fn prepare_record(
    config: &ProviderConfig,
    descriptor: &ResourceDescriptor,
    record: &ResourceRecord,
) -> Result<ResourceRecord> {
    let type_name = descriptor.type_name();
    if !record.type_name.is_empty()
        && record.type_name != type_name
        && !record.type_name.eq_ignore_ascii_case(&descriptor.kind)
    {
        return Err(ProviderError::Validation(vec![format!(
            "type: record is '{}' but the descriptor manages '{}'",
            record.type_name, type_name
        )]));
    }

    let mut prepared = record.clone();
    prepared.type_name = type_name;
    if prepared.metadata.namespace.is_empty() {
        prepared.metadata.namespace = config.default_namespace.clone();
    }
    prepared.apply_defaults(descriptor);
    prepared.validate(descriptor)?;

    if let Some(wait) = &prepared.wait_for_upsert {
        for condition in &wait.conditions {
            JsonPath::parse(&condition.jsonpath)?;
        }
    }
    Ok(prepared)
}

/// The object an apply would send, without contacting the cluster.
pub fn render_manifest(
    config: &ProviderConfig,
    descriptor: &ResourceDescriptor,
    record: &ResourceRecord,
) -> Result<Value> {
    let prepared = prepare_record(config, descriptor, record)?;
    Ok(prepared.to_wire(descriptor))
}

pub fn render_manifest_yaml(
    config: &ProviderConfig,
    descriptor: &ResourceDescriptor,
    record: &ResourceRecord,
) -> Result<String> {
    let manifest = render_manifest(config, descriptor, record)?;
    serde_yaml::to_string(&manifest).map_err(|e| ProviderError::Encode(e.to_string()))
}

pub fn render_manifest_json(
    config: &ProviderConfig,
    descriptor: &ResourceDescriptor,
    record: &ResourceRecord,
) -> Result<String> {
    let manifest = render_manifest(config, descriptor, record)?;
    serde_json::to_string_pretty(&manifest).map_err(|e| ProviderError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::catalog;
    use serde_json::json;

    fn queue() -> ResourceRecord {
        ResourceRecord::new("hazelcast_com_queue_v1alpha1", "", "orders").with_spec(json!({
            "hazelcast_resource_name": "hazelcast",
            "max_size": 100
        }))
    }

    #[test]
    fn test_manifest_uses_wire_names_and_defaults() {
        let descriptor = catalog().get("Queue").unwrap();
        let manifest = render_manifest(&ProviderConfig::default(), descriptor, &queue()).unwrap();

        assert_eq!(manifest["apiVersion"], "hazelcast.com/v1alpha1");
        assert_eq!(manifest["kind"], "Queue");
        assert_eq!(manifest["metadata"]["namespace"], "default");
        assert_eq!(manifest["spec"]["hazelcastResourceName"], "hazelcast");
        assert_eq!(manifest["spec"]["maxSize"], 100);
        assert_eq!(manifest["spec"]["backupCount"], 1);
        assert!(manifest["spec"].get("max_size").is_none());
    }

    #[test]
    fn test_manifest_honours_configured_namespace() {
        let descriptor = catalog().get("Queue").unwrap();
        let config = ProviderConfig {
            default_namespace: "hazelcast".to_string(),
            ..Default::default()
        };
        let manifest = render_manifest(&config, descriptor, &queue()).unwrap();
        assert_eq!(manifest["metadata"]["namespace"], "hazelcast");
    }

    #[test]
    fn test_manifest_text_formats() {
        let descriptor = catalog().get("hazelcast_com_queue_v1alpha1").unwrap();
        let config = ProviderConfig::default();

        let yaml = render_manifest_yaml(&config, descriptor, &queue()).unwrap();
        assert!(yaml.contains("apiVersion: hazelcast.com/v1alpha1"));
        assert!(yaml.contains("kind: Queue"));
        assert!(yaml.contains("hazelcastResourceName: hazelcast"));

        let text = render_manifest_json(&config, descriptor, &queue()).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["metadata"]["name"], "orders");
    }

    #[test]
    fn test_invalid_record_is_not_rendered() {
        let descriptor = catalog().get("Queue").unwrap();
        let record = ResourceRecord::new("Queue", "hz", "orders").with_spec(json!({"max_size": -1}));
        match render_manifest(&ProviderConfig::default(), descriptor, &record).unwrap_err() {
            ProviderError::Validation(problems) => {
                assert!(problems.iter().any(|p| p.contains("hazelcast_resource_name")));
                assert!(problems.iter().any(|p| p.contains("max_size")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
