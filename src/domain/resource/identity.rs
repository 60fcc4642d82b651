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

use crate::infrastructure::constants::{ID_SEPARATOR, MAX_NAMESPACE_LENGTH, MAX_NAME_LENGTH};
use crate::shared::error::{ProviderError, Result};
use std::fmt;

/// Composite identity of a namespaced custom object.
///
/// The generated identifier is always `<namespace>/<name>`, the same shape
/// accepted by [`ResourceId::parse_import_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    pub namespace: String,
    pub name: String,
}

impl ResourceId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> String {
        format!("{}{}{}", self.namespace, ID_SEPARATOR, self.name)
    }

    pub fn parse_import_id(import_id: &str) -> Result<Self> {
        let parts: Vec<&str> = import_id.split(ID_SEPARATOR).collect();
        match parts.as_slice() {
            [namespace, name] if !namespace.is_empty() && !name.is_empty() => {
                Ok(Self::new(*namespace, *name))
            }
            _ => Err(ProviderError::MalformedImportId(import_id.to_string())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if !is_valid_namespace(&self.namespace) {
            problems.push(format!(
                "metadata.namespace: '{}' is not a valid namespace",
                self.namespace
            ));
        }
        if !is_valid_k8s_name(&self.name) {
            problems.push(format!(
                "metadata.name: '{}' is not a valid Kubernetes object name",
                self.name
            ));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ProviderError::Validation(problems))
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// RFC 1123 subdomain, the rule for object names.
pub fn is_valid_k8s_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return false;
    }

    name.split('.').all(is_dns_label)
}

/// RFC 1123 label, the rule for namespaces.
pub fn is_valid_namespace(namespace: &str) -> bool {
    namespace.len() <= MAX_NAMESPACE_LENGTH && is_dns_label(namespace)
}

fn is_dns_label(label: &str) -> bool {
    if label.is_empty() {
        return false;
    }

    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if !label.chars().next().is_some_and(alnum) || !label.chars().last().is_some_and(alnum) {
        return false;
    }

    label.chars().all(|c| alnum(c) || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_namespace_then_name() {
        let id = ResourceId::new("hazelcast", "orders");
        assert_eq!(id.id(), "hazelcast/orders");
        assert_eq!(id.to_string(), "hazelcast/orders");
        // stable for the same pair
        assert_eq!(id.id(), ResourceId::new("hazelcast", "orders").id());
    }

    #[test]
    fn test_parse_import_id() {
        let id = ResourceId::parse_import_id("ns/name").unwrap();
        assert_eq!(id, ResourceId::new("ns", "name"));
        assert_eq!(ResourceId::parse_import_id(&id.id()).unwrap(), id);
    }

    #[test]
    fn test_parse_import_id_rejects_malformed() {
        for bad in ["", "name", "/name", "ns/", "/", "a/b/c", "ns//name"] {
            let err = ResourceId::parse_import_id(bad).unwrap_err();
            assert!(
                matches!(err, ProviderError::MalformedImportId(ref s) if s == bad),
                "{:?} should be malformed",
                bad
            );
        }
    }

    #[test]
    fn test_name_rules() {
        assert!(is_valid_k8s_name("my-map"));
        assert!(is_valid_k8s_name("my.map.v1"));
        assert!(!is_valid_k8s_name("My-Map"));
        assert!(!is_valid_k8s_name("-map"));
        assert!(!is_valid_k8s_name("map_1"));
        assert!(!is_valid_k8s_name(&"a".repeat(254)));

        assert!(is_valid_namespace("hazelcast-system"));
        assert!(!is_valid_namespace("hazelcast.system"));
        assert!(!is_valid_namespace(&"a".repeat(64)));
    }

    #[test]
    fn test_validate_reports_both_parts() {
        let err = ResourceId::new("Bad_NS", "").validate().unwrap_err();
        match err {
            ProviderError::Validation(problems) => assert_eq!(problems.len(), 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
