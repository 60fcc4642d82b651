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
use crate::shared::error::{ProviderError, Result};
use std::collections::HashMap;

const KNOWN_KEYS: &[&str] = &[
    "provider.kubeconfig",
    "provider.context",
    "provider.field-manager",
    "provider.force-conflicts",
    "provider.namespace",
    "provider.poll-interval",
    "provider.delete-timeout",
];

/// Parse dynamic configuration properties from -D key=value format
pub fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for config in configs {
        let parts: Vec<&str> = config.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(ProviderError::config_error(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            )));
        }

        let key = parts[0].trim();
        let value = parts[1].trim();

        if key.is_empty() {
            return Err(ProviderError::config_error(format!(
                "Empty key in config: '{}'",
                config
            )));
        }

        map.insert(key.to_string(), value.to_string());
    }

    Ok(map)
}

/// Apply `provider.*` overrides on top of a loaded configuration.
pub fn apply_to_provider_config(
    configs: &HashMap<String, String>,
    conf: &mut ProviderConfig,
) -> Result<()> {
    if let Some(path) = configs.get("provider.kubeconfig") {
        conf.kubeconfig = Some(path.clone());
    }

    if let Some(context) = configs.get("provider.context") {
        conf.context = Some(context.clone());
    }

    if let Some(manager) = configs.get("provider.field-manager") {
        conf.field_manager = manager.clone();
    }

    if let Some(force) = configs.get("provider.force-conflicts") {
        conf.force_conflicts = force.parse::<bool>().map_err(|_| {
            ProviderError::config_error(format!(
                "provider.force-conflicts must be true or false, got '{}'",
                force
            ))
        })?;
    }

    if let Some(namespace) = configs.get("provider.namespace") {
        conf.default_namespace = namespace.clone();
    }

    if let Some(interval) = configs.get("provider.poll-interval") {
        conf.poll_interval = interval.clone();
    }

    if let Some(timeout) = configs.get("provider.delete-timeout") {
        conf.delete_timeout = timeout.clone();
    }

    for key in configs.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "ignoring unknown dynamic property");
        }
    }

    conf.validate()
}
