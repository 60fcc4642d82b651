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

use crate::domain::schema::attribute::{Attribute, AttributeType, Presence};
use serde_json::{Map, Value};
use std::fmt;

/// Static, per-attribute value constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    LengthAtLeast(usize),
    AtLeast(i64),
    AtMost(i64),
    OneOf(Vec<String>),
}

impl Validator {
    pub fn one_of(values: &[&str]) -> Self {
        Validator::OneOf(values.iter().map(|v| v.to_string()).collect())
    }

    /// Returns a human readable problem, or `None` when the value passes.
    pub fn check(&self, value: &Value) -> Option<String> {
        match self {
            Validator::LengthAtLeast(min) => {
                let len = value.as_str()?.chars().count();
                (len < *min).then(|| format!("string length must be at least {}, got {}", min, len))
            }
            Validator::AtLeast(min) => {
                let n = value.as_i64()?;
                (n < *min).then(|| format!("must be at least {}, got {}", min, n))
            }
            Validator::AtMost(max) => {
                let n = value.as_i64()?;
                (n > *max).then(|| format!("must be at most {}, got {}", max, n))
            }
            Validator::OneOf(allowed) => {
                let s = value.as_str()?;
                (!allowed.iter().any(|a| a == s)).then(|| {
                    format!("value '{}' must be one of: {}", s, allowed.join(", "))
                })
            }
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::LengthAtLeast(min) => write!(f, "len >= {}", min),
            Validator::AtLeast(min) => write!(f, ">= {}", min),
            Validator::AtMost(max) => write!(f, "<= {}", max),
            Validator::OneOf(allowed) => write!(f, "one of [{}]", allowed.join(", ")),
        }
    }
}

/// Validate a configured object against its attributes, appending one
/// diagnostic per problem found.
pub fn validate_object(
    attributes: &[Attribute],
    object: &Map<String, Value>,
    path: &str,
    diagnostics: &mut Vec<String>,
) {
    for key in object.keys() {
        if !attributes.iter().any(|a| &a.name == key) {
            diagnostics.push(format!("{}: unsupported attribute", join(path, key)));
        }
    }

    for attr in attributes {
        let attr_path = join(path, &attr.name);
        match object.get(&attr.name) {
            None | Some(Value::Null) => {
                if attr.presence == Presence::Required {
                    diagnostics.push(format!("{}: is required", attr_path));
                }
            }
            Some(value) => validate_value(attr, value, &attr_path, diagnostics),
        }
    }
}

fn validate_value(attr: &Attribute, value: &Value, path: &str, diagnostics: &mut Vec<String>) {
    let type_ok = match &attr.kind {
        AttributeType::String => value.is_string(),
        AttributeType::Int64 => value.is_i64() || value.is_u64(),
        AttributeType::Float64 => value.is_number(),
        AttributeType::Bool => value.is_boolean(),
        AttributeType::StringList => value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string)),
        AttributeType::StringMap => value
            .as_object()
            .is_some_and(|m| m.values().all(Value::is_string)),
        AttributeType::Object(_) => value.is_object(),
        AttributeType::ObjectList(_) => value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_object)),
        AttributeType::Dynamic => true,
    };

    if !type_ok {
        diagnostics.push(format!("{}: expected {}", path, attr.kind.label()));
        return;
    }

    for validator in &attr.validators {
        if let Some(problem) = validator.check(value) {
            diagnostics.push(format!("{}: {}", path, problem));
        }
    }

    match (&attr.kind, value) {
        (AttributeType::Object(children), Value::Object(inner)) => {
            validate_object(children, inner, path, diagnostics);
        }
        (AttributeType::ObjectList(children), Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                if let Value::Object(inner) = item {
                    validate_object(children, inner, &format!("{}[{}]", path, idx), diagnostics);
                }
            }
        }
        _ => {}
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Vec<Attribute> {
        vec![
            Attribute::string("hazelcast_resource_name").required().non_empty(),
            Attribute::int64("backup_count").at_least(0),
            Attribute::string("in_memory_format").one_of(&["BINARY", "OBJECT", "NATIVE"]),
            Attribute::object(
                "eviction",
                vec![Attribute::int64("max_size").at_least(0)],
            ),
            Attribute::object_list(
                "indexes",
                vec![Attribute::string_list("attributes").required()],
            ),
            Attribute::string("status").optional_computed(),
        ]
    }

    fn validate(value: Value) -> Vec<String> {
        let mut diags = Vec::new();
        validate_object(&schema(), value.as_object().unwrap(), "spec", &mut diags);
        diags
    }

    #[test]
    fn test_valid_object_has_no_diagnostics() {
        let diags = validate(json!({
            "hazelcast_resource_name": "hz",
            "backup_count": 2,
            "in_memory_format": "BINARY",
            "eviction": {"max_size": 100},
            "indexes": [{"attributes": ["a", "b"]}]
        }));
        assert!(diags.is_empty(), "{:?}", diags);
    }

    #[test]
    fn test_required_and_non_empty() {
        let diags = validate(json!({}));
        assert_eq!(diags, vec!["spec.hazelcast_resource_name: is required"]);

        let diags = validate(json!({"hazelcast_resource_name": ""}));
        assert_eq!(diags.len(), 1);
        assert!(diags[0].contains("at least 1"));
    }

    #[test]
    fn test_lower_bound_and_enum() {
        let diags = validate(json!({
            "hazelcast_resource_name": "hz",
            "backup_count": -1,
            "in_memory_format": "JSON"
        }));
        assert_eq!(diags.len(), 2);
        assert!(diags[0].starts_with("spec.backup_count"));
        assert!(diags[1].contains("one of: BINARY, OBJECT, NATIVE"));
    }

    #[test]
    fn test_nested_paths_and_types() {
        let diags = validate(json!({
            "hazelcast_resource_name": "hz",
            "eviction": {"max_size": "lots"},
            "indexes": [{"attributes": ["a"]}, {}]
        }));
        assert!(diags.contains(&"spec.eviction.max_size: expected int64".to_string()));
        assert!(diags.contains(&"spec.indexes[1].attributes: is required".to_string()));
    }

    #[test]
    fn test_unknown_attributes_and_server_filled_values() {
        let diags = validate(json!({
            "hazelcast_resource_name": "hz",
            "backupCount": 1,
            "status": "Ready"
        }));
        assert!(diags.contains(&"spec.backupCount: unsupported attribute".to_string()));
        assert_eq!(diags, vec!["spec.backupCount: unsupported attribute"]);
    }
}
