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
use crate::domain::resource::identity::is_valid_namespace;
use crate::infrastructure::constants::{
    CONFIG_FILE_ENV, DEFAULT_DELETE_TIMEOUT, DEFAULT_FIELD_MANAGER, DEFAULT_FORCE_CONFLICTS,
    DEFAULT_NAMESPACE, DEFAULT_POLL_INTERVAL,
};
use crate::shared::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::time::Duration;

/// Provider-level settings handed to the engine at construction time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub field_manager: String,
    pub force_conflicts: bool,
    pub default_namespace: String,
    pub poll_interval: String,
    pub delete_timeout: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            force_conflicts: DEFAULT_FORCE_CONFLICTS,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL.to_string(),
            delete_timeout: DEFAULT_DELETE_TIMEOUT.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from TOML file
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            ProviderError::config_error(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let conf: Self = toml::from_str(&content)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Explicit path first, then the `HAZELCAST_KUBE_CONFIG` variable, then defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from(path);
        }
        match std::env::var(CONFIG_FILE_ENV) {
            Ok(env_path) if !env_path.is_empty() => Self::from(env_path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.field_manager.trim().is_empty() {
            return Err(ProviderError::config_error("field_manager must not be empty"));
        }

        if !is_valid_namespace(&self.default_namespace) {
            return Err(ProviderError::config_error(format!(
                "Invalid default_namespace: {}",
                self.default_namespace
            )));
        }

        parse_poll_interval(&self.poll_interval)?;
        parse_timeout(&self.delete_timeout)?;

        Ok(())
    }

    pub fn poll_interval(&self) -> Result<Duration> {
        parse_poll_interval(&self.poll_interval)
    }

    pub fn delete_timeout(&self) -> Result<Duration> {
        parse_timeout(&self.delete_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let conf = ProviderConfig::default();
        assert!(conf.validate().is_ok());
        assert_eq!(conf.field_manager, "hazelcast-kube");
        assert!(!conf.force_conflicts);
        assert_eq!(conf.poll_interval().unwrap(), Duration::from_secs(5));
        assert_eq!(conf.delete_timeout().unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
field_manager = "platform-team"
force_conflicts = true
default_namespace = "hazelcast"
poll_interval = "2s"
"#
        )
        .unwrap();

        let conf = ProviderConfig::from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(conf.field_manager, "platform-team");
        assert!(conf.force_conflicts);
        assert_eq!(conf.default_namespace, "hazelcast");
        assert_eq!(conf.poll_interval().unwrap(), Duration::from_secs(2));
        // untouched keys keep their defaults
        assert_eq!(conf.delete_timeout, "0s");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut conf = ProviderConfig::default();
        conf.field_manager = "  ".to_string();
        assert!(conf.validate().is_err());

        let mut conf = ProviderConfig::default();
        conf.poll_interval = "0s".to_string();
        assert!(conf.validate().is_err());

        let mut conf = ProviderConfig::default();
        conf.default_namespace = "Not_A_Namespace".to_string();
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ProviderConfig::from("/nonexistent/hazelcast-kube.toml").unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }
}
