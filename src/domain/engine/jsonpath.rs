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

//! The kubectl-style JSONPath subset used by upsert wait conditions.
//!
//! Supported: optional `{}` braces and `$` root, `.field`, `['field']`,
//! `[index]` (negative counts from the end), `[*]` / `.*`, and equality
//! filters over arrays such as `[?(@.type=="Ready")]`.

use crate::shared::error::{ProviderError, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Field(String),
    Index(i64),
    Wildcard,
    Filter {
        path: Vec<String>,
        negate: bool,
        literal: Value,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    expression: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    pub fn parse(expression: &str) -> Result<Self> {
        let invalid = |reason: &str| ProviderError::InvalidJsonPath {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let mut body = expression.trim();
        if let Some(inner) = body.strip_prefix('{') {
            body = inner
                .strip_suffix('}')
                .ok_or_else(|| invalid("unbalanced braces"))?
                .trim();
        }
        body = body.strip_prefix('$').unwrap_or(body);

        let chars: Vec<char> = body.chars().collect();
        let mut segments = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '.' => {
                    i += 1;
                    if chars.get(i) == Some(&'.') {
                        return Err(invalid("recursive descent is not supported"));
                    }
                    let (name, next) = read_identifier(&chars, i);
                    if name.is_empty() {
                        return Err(invalid("empty field name"));
                    }
                    segments.push(field_or_wildcard(name));
                    i = next;
                }
                '[' => {
                    let close = find_closing_bracket(&chars, i)
                        .ok_or_else(|| invalid("unterminated '['"))?;
                    let content: String = chars[i + 1..close].iter().collect();
                    segments.push(parse_bracket(content.trim()).map_err(|r| invalid(&r))?);
                    i = close + 1;
                }
                _ if i == 0 => {
                    let (name, next) = read_identifier(&chars, i);
                    segments.push(field_or_wildcard(name));
                    i = next;
                }
                c => return Err(invalid(&format!("unexpected character '{}'", c))),
            }
        }

        Ok(Self {
            expression: expression.to_string(),
            segments,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// All values the expression selects, in document order.
    pub fn find<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        let mut current = vec![root];
        for segment in &self.segments {
            current = current
                .into_iter()
                .flat_map(|value| select(segment, value))
                .collect();
        }
        current
    }

    /// Selected values rendered the way kubectl prints them: strings bare,
    /// everything else as JSON, space separated.
    pub fn find_string(&self, root: &Value) -> Option<String> {
        let found = self.find(root);
        if found.is_empty() {
            return None;
        }
        Some(
            found
                .into_iter()
                .map(render)
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn field_or_wildcard(name: String) -> Segment {
    if name == "*" {
        Segment::Wildcard
    } else {
        Segment::Field(name)
    }
}

fn read_identifier(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && chars[end] != '.' && chars[end] != '[' {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

fn find_closing_bracket(chars: &[char], open: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, &c) in chars[open + 1..].iter().enumerate() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ']') => return Some(open + 1 + offset),
            _ => {}
        }
    }
    None
}

fn unquote(s: &str) -> Option<String> {
    let first = s.chars().next()?;
    if (first == '\'' || first == '"') && s.len() >= 2 && s.ends_with(first) {
        Some(s[1..s.len() - 1].to_string())
    } else {
        None
    }
}

fn parse_bracket(content: &str) -> std::result::Result<Segment, String> {
    if content == "*" {
        return Ok(Segment::Wildcard);
    }
    if let Some(name) = unquote(content) {
        return Ok(Segment::Field(name));
    }
    if let Some(filter) = content.strip_prefix('?') {
        return parse_filter(filter.trim());
    }
    content
        .parse::<i64>()
        .map(Segment::Index)
        .map_err(|_| format!("unsupported subscript '[{}]'", content))
}

fn parse_filter(filter: &str) -> std::result::Result<Segment, String> {
    let inner = filter
        .strip_prefix('(')
        .and_then(|f| f.strip_suffix(')'))
        .ok_or_else(|| "filter must look like ?(@.field==value)".to_string())?
        .trim();

    let (lhs, rhs, negate) = if let Some((l, r)) = inner.split_once("!=") {
        (l, r, true)
    } else if let Some((l, r)) = inner.split_once("==") {
        (l, r, false)
    } else {
        return Err("only == and != filters are supported".to_string());
    };

    let lhs = lhs.trim();
    let path_text = lhs
        .strip_prefix('@')
        .ok_or_else(|| "filter must start with '@'".to_string())?;
    let path: Vec<String> = path_text
        .split('.')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    let rhs = rhs.trim();
    let literal = match unquote(rhs) {
        Some(s) => Value::String(s),
        None => serde_json::from_str(rhs)
            .map_err(|_| format!("unsupported filter literal '{}'", rhs))?,
    };

    Ok(Segment::Filter {
        path,
        negate,
        literal,
    })
}

fn select<'a>(segment: &Segment, value: &'a Value) -> Vec<&'a Value> {
    match segment {
        Segment::Field(name) => value.get(name.as_str()).into_iter().collect(),
        Segment::Index(idx) => {
            let Some(items) = value.as_array() else {
                return Vec::new();
            };
            let len = items.len() as i64;
            let resolved = if *idx < 0 { len + idx } else { *idx };
            if (0..len).contains(&resolved) {
                vec![&items[resolved as usize]]
            } else {
                Vec::new()
            }
        }
        Segment::Wildcard => match value {
            Value::Array(items) => items.iter().collect(),
            Value::Object(map) => map.values().collect(),
            _ => Vec::new(),
        },
        Segment::Filter {
            path,
            negate,
            literal,
        } => {
            let Some(items) = value.as_array() else {
                return Vec::new();
            };
            items
                .iter()
                .filter(|item| {
                    let mut current = Some(*item);
                    for key in path {
                        current = current.and_then(|v| v.get(key.as_str()));
                    }
                    let matches = current == Some(literal);
                    matches != *negate
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object() -> Value {
        json!({
            "metadata": {
                "name": "hz",
                "labels": {"app.kubernetes.io/name": "hazelcast"}
            },
            "status": {
                "phase": "Running",
                "clusterSize": 3,
                "members": [
                    {"ip": "10.0.0.1", "ready": true},
                    {"ip": "10.0.0.2", "ready": false}
                ],
                "conditions": [
                    {"type": "Available", "status": "True"},
                    {"type": "Ready", "status": "False"}
                ]
            }
        })
    }

    fn eval(expr: &str) -> Option<String> {
        JsonPath::parse(expr).unwrap().find_string(&object())
    }

    #[test]
    fn test_dot_paths_in_all_spellings() {
        assert_eq!(eval("{.status.phase}").as_deref(), Some("Running"));
        assert_eq!(eval(".status.phase").as_deref(), Some("Running"));
        assert_eq!(eval("$.status.phase").as_deref(), Some("Running"));
        assert_eq!(eval("status.phase").as_deref(), Some("Running"));
        assert_eq!(eval("{.status.clusterSize}").as_deref(), Some("3"));
        assert_eq!(eval("{.status.missing}"), None);
    }

    #[test]
    fn test_brackets_and_indices() {
        assert_eq!(
            eval("{.metadata.labels['app.kubernetes.io/name']}").as_deref(),
            Some("hazelcast")
        );
        assert_eq!(eval("{.status.members[0].ip}").as_deref(), Some("10.0.0.1"));
        assert_eq!(eval("{.status.members[-1].ready}").as_deref(), Some("false"));
        assert_eq!(eval("{.status.members[5].ip}"), None);
        assert_eq!(
            eval("{.status.members[*].ip}").as_deref(),
            Some("10.0.0.1 10.0.0.2")
        );
    }

    #[test]
    fn test_filters() {
        assert_eq!(
            eval(r#"{.status.conditions[?(@.type=="Ready")].status}"#).as_deref(),
            Some("False")
        );
        assert_eq!(
            eval("{.status.conditions[?(@.type!='Ready')].type}").as_deref(),
            Some("Available")
        );
        assert_eq!(
            eval("{.status.members[?(@.ready==true)].ip}").as_deref(),
            Some("10.0.0.1")
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["{.status", "..status", ".status[", ".status[abc]", ".a[?(@.x>1)]", ".a.."] {
            assert!(
                matches!(JsonPath::parse(bad), Err(ProviderError::InvalidJsonPath { .. })),
                "{} should not parse",
                bad
            );
        }
    }
}
