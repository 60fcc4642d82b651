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

//! Conversion between record objects (attribute names) and wire objects
//! (Kubernetes JSON names), driven by the attribute tree.

use crate::domain::schema::attribute::{Attribute, AttributeType};
use serde_json::{Map, Value};

/// Fill in declared defaults for attributes the configuration leaves unset.
pub fn apply_defaults(attributes: &[Attribute], object: &mut Map<String, Value>) {
    for attr in attributes {
        match object.get_mut(&attr.name) {
            None | Some(Value::Null) => {
                if let Some(default) = &attr.default {
                    object.insert(attr.name.clone(), default.clone());
                }
            }
            Some(value) => match (&attr.kind, value) {
                (AttributeType::Object(children), Value::Object(inner)) => {
                    apply_defaults(children, inner);
                }
                (AttributeType::ObjectList(children), Value::Array(items)) => {
                    for item in items.iter_mut() {
                        if let Value::Object(inner) = item {
                            apply_defaults(children, inner);
                        }
                    }
                }
                _ => {}
            },
        }
    }
}

/// Rename a configured object to wire names. Nulls are not sent.
pub fn to_wire(attributes: &[Attribute], object: &Map<String, Value>) -> Map<String, Value> {
    let mut wire = Map::new();
    for attr in attributes {
        match object.get(&attr.name) {
            None | Some(Value::Null) => {}
            Some(value) => {
                wire.insert(attr.wire.clone(), convert(attr, value, Direction::ToWire));
            }
        }
    }
    wire
}

/// Rename a server object back to attribute names. Wire fields the schema
/// does not know are dropped.
pub fn from_wire(attributes: &[Attribute], wire: &Map<String, Value>) -> Map<String, Value> {
    let mut object = Map::new();
    for attr in attributes {
        match wire.get(&attr.wire) {
            None | Some(Value::Null) => {}
            Some(value) => {
                object.insert(attr.name.clone(), convert(attr, value, Direction::FromWire));
            }
        }
    }
    object
}

#[derive(Clone, Copy)]
enum Direction {
    ToWire,
    FromWire,
}

fn convert(attr: &Attribute, value: &Value, direction: Direction) -> Value {
    let nested = |children: &[Attribute], inner: &Map<String, Value>| match direction {
        Direction::ToWire => Value::Object(to_wire(children, inner)),
        Direction::FromWire => Value::Object(from_wire(children, inner)),
    };

    match (&attr.kind, value) {
        (AttributeType::Object(children), Value::Object(inner)) => nested(children, inner),
        (AttributeType::ObjectList(children), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(inner) => nested(children, inner),
                    other => other.clone(),
                })
                .collect(),
        ),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Vec<Attribute> {
        vec![
            Attribute::string("hazelcast_resource_name").required(),
            Attribute::int64("backup_count").default_value(1),
            Attribute::string("bucket_uri").with_wire("bucketURI"),
            Attribute::object(
                "eviction",
                vec![
                    Attribute::string("eviction_policy").default_value("NONE"),
                    Attribute::int64("max_size"),
                ],
            ),
            Attribute::object_list(
                "entry_listeners",
                vec![
                    Attribute::string("class_name"),
                    Attribute::bool("include_values").default_value(true),
                ],
            ),
            Attribute::string_map("node_selector"),
            Attribute::string("state").optional_computed(),
        ]
    }

    #[test]
    fn test_defaults_fill_nested_levels() {
        let mut object = json!({
            "hazelcast_resource_name": "hz",
            "eviction": {"max_size": 10},
            "entry_listeners": [{"class_name": "com.example.L"}]
        });
        apply_defaults(&schema(), object.as_object_mut().unwrap());

        assert_eq!(object["backup_count"], json!(1));
        assert_eq!(object["eviction"]["eviction_policy"], json!("NONE"));
        assert_eq!(object["entry_listeners"][0]["include_values"], json!(true));
        // absent objects are not materialised
        assert!(object.get("node_selector").is_none());
    }

    #[test]
    fn test_to_wire_renames_recursively() {
        let object = json!({
            "hazelcast_resource_name": "hz",
            "bucket_uri": "s3://backups",
            "eviction": {"eviction_policy": "LRU", "max_size": 10},
            "entry_listeners": [{"class_name": "L", "include_values": false}],
            "node_selector": {"disk_type": "ssd"}
        });
        let wire = to_wire(&schema(), object.as_object().unwrap());
        assert_eq!(
            Value::Object(wire),
            json!({
                "hazelcastResourceName": "hz",
                "bucketURI": "s3://backups",
                "eviction": {"evictionPolicy": "LRU", "maxSize": 10},
                "entryListeners": [{"className": "L", "includeValues": false}],
                "nodeSelector": {"disk_type": "ssd"}
            })
        );
    }

    #[test]
    fn test_from_wire_drops_unknown_and_keeps_computed() {
        let wire = json!({
            "hazelcastResourceName": "hz",
            "backupCount": 1,
            "state": "Success",
            "somethingNew": {"x": 1}
        });
        let object = from_wire(&schema(), wire.as_object().unwrap());
        assert_eq!(
            Value::Object(object),
            json!({"hazelcast_resource_name": "hz", "backup_count": 1, "state": "Success"})
        );
    }

    #[test]
    fn test_wire_echo_preserves_configured_fields() {
        let mut object = json!({
            "hazelcast_resource_name": "hz",
            "bucket_uri": "gs://b",
            "eviction": {"max_size": 5},
            "entry_listeners": [{"class_name": "L"}]
        });
        apply_defaults(&schema(), object.as_object_mut().unwrap());
        let wire = to_wire(&schema(), object.as_object().unwrap());
        let back = from_wire(&schema(), &wire);
        assert_eq!(Value::Object(back), object);
    }
}
