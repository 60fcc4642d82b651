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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Kubernetes API error during {verb}: {message}")]
    Api {
        verb: &'static str,
        code: u16,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found: {kind} '{name}' in namespace '{namespace}'")]
    NotFound {
        kind: String,
        name: String,
        namespace: String,
    },

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Malformed import identifier '{0}': expected '<namespace>/<name>'")]
    MalformedImportId(String),

    #[error("Validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),

    #[error("Attribute '{field}' cannot be changed in place, the resource must be replaced")]
    RequiresReplacement { field: String },

    #[error("Invalid JSONPath expression '{expression}': {reason}")]
    InvalidJsonPath { expression: String, reason: String },

    #[error("Unknown resource type: {0}")]
    UnknownType(String),

    #[error("Failed to encode object: {0}")]
    Encode(String),

    #[error("Failed to decode object: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::Config(context.into())
    }

    pub fn not_found(
        kind: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Wraps a client error raised by the given API verb.
    pub fn api(verb: &'static str, err: kube::Error) -> Self {
        match err {
            kube::Error::Api(ae) => Self::Api {
                verb,
                code: ae.code,
                message: ae.message,
            },
            other => Self::Api {
                verb,
                code: 0,
                message: other.to_string(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Api { code: 404, .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(ProviderError::not_found("Map", "m", "ns").is_not_found());
        let api_404 = ProviderError::Api {
            verb: "get",
            code: 404,
            message: "maps.hazelcast.com \"m\" not found".to_string(),
        };
        assert!(api_404.is_not_found());

        let forbidden = ProviderError::Api {
            verb: "get",
            code: 403,
            message: "forbidden".to_string(),
        };
        assert!(!forbidden.is_not_found());
    }

    #[test]
    fn test_validation_message_lists_every_diagnostic() {
        let err = ProviderError::Validation(vec![
            "spec.backup_count: must be at least 0".to_string(),
            "metadata.name: is required".to_string(),
        ]);
        let text = err.to_string();
        assert!(text.contains("spec.backup_count"));
        assert!(text.contains("metadata.name"));
    }

    #[test]
    fn test_timeout_is_distinct() {
        let err = ProviderError::Timeout("waited 5s".to_string());
        assert!(err.is_timeout());
        assert!(!err.is_not_found());
    }
}
