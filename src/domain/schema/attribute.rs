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

//! Attribute descriptors: one entry per field of a custom resource spec.
//!
//! An attribute carries two names. `name` is the snake_case key used in
//! records and configuration files; `wire` is the camelCase key the
//! Kubernetes API server sees. By default the wire name is derived from the
//! attribute name, `with_wire` overrides it for irregular CRD fields such as
//! `bucketURI`.

use crate::domain::schema::validator::Validator;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Int64,
    Float64,
    Bool,
    StringList,
    StringMap,
    Object(Vec<Attribute>),
    ObjectList(Vec<Attribute>),
    /// Free-form JSON passed through untouched (int-or-string, quantities,
    /// preserve-unknown-fields subtrees).
    Dynamic,
}

impl AttributeType {
    pub fn label(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Int64 => "int64",
            AttributeType::Float64 => "float64",
            AttributeType::Bool => "bool",
            AttributeType::StringList => "list(string)",
            AttributeType::StringMap => "map(string)",
            AttributeType::Object(_) => "object",
            AttributeType::ObjectList(_) => "list(object)",
            AttributeType::Dynamic => "dynamic",
        }
    }

    pub fn children(&self) -> Option<&[Attribute]> {
        match self {
            AttributeType::Object(attrs) | AttributeType::ObjectList(attrs) => Some(attrs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// May be configured, otherwise filled in from the server response.
    OptionalComputed,
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Presence::Required => "required",
            Presence::Optional => "optional",
            Presence::OptionalComputed => "optional+computed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub wire: String,
    pub kind: AttributeType,
    pub presence: Presence,
    pub default: Option<Value>,
    pub validators: Vec<Validator>,
    pub description: String,
}

impl Attribute {
    pub fn new(name: &str, kind: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            wire: snake_to_camel(name),
            kind,
            presence: Presence::Optional,
            default: None,
            validators: Vec::new(),
            description: String::new(),
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, AttributeType::String)
    }

    pub fn int64(name: &str) -> Self {
        Self::new(name, AttributeType::Int64)
    }

    pub fn float64(name: &str) -> Self {
        Self::new(name, AttributeType::Float64)
    }

    pub fn bool(name: &str) -> Self {
        Self::new(name, AttributeType::Bool)
    }

    pub fn string_list(name: &str) -> Self {
        Self::new(name, AttributeType::StringList)
    }

    pub fn string_map(name: &str) -> Self {
        Self::new(name, AttributeType::StringMap)
    }

    pub fn object(name: &str, attributes: Vec<Attribute>) -> Self {
        Self::new(name, AttributeType::Object(attributes))
    }

    pub fn object_list(name: &str, attributes: Vec<Attribute>) -> Self {
        Self::new(name, AttributeType::ObjectList(attributes))
    }

    pub fn dynamic(name: &str) -> Self {
        Self::new(name, AttributeType::Dynamic)
    }

    pub fn with_wire(mut self, wire: &str) -> Self {
        self.wire = wire.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    pub fn optional_computed(mut self) -> Self {
        self.presence = Presence::OptionalComputed;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Shorthand for the most common string constraint in the CRDs.
    pub fn non_empty(self) -> Self {
        self.validate(Validator::LengthAtLeast(1))
    }

    pub fn one_of(self, values: &[&str]) -> Self {
        self.validate(Validator::one_of(values))
    }

    pub fn at_least(self, min: i64) -> Self {
        self.validate(Validator::AtLeast(min))
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// `time_to_live_seconds` -> `timeToLiveSeconds`
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("backup_count"), "backupCount");
        assert_eq!(snake_to_camel("time_to_live_seconds"), "timeToLiveSeconds");
        assert_eq!(snake_to_camel("name"), "name");
    }

    #[test]
    fn test_builder() {
        let attr = Attribute::string("bucket_uri")
            .with_wire("bucketURI")
            .required()
            .non_empty();
        assert_eq!(attr.wire, "bucketURI");
        assert_eq!(attr.presence, Presence::Required);
        assert_eq!(attr.validators, vec![Validator::LengthAtLeast(1)]);

        let attr = Attribute::int64("backup_count").at_least(0).default_value(1);
        assert_eq!(attr.wire, "backupCount");
        assert_eq!(attr.default, Some(Value::from(1)));
        assert_eq!(attr.kind.label(), "int64");
    }
}
