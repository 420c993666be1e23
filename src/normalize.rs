// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Payload normalization: template properties arrive with PascalCase keys and
//! string-typed booleans/integers, and must be reshaped before they can be
//! deserialized into the typed per-kind payloads.

use crate::types::TagSet;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Lowercase the first character of every mapping key, recursing into nested
/// mappings and into sequence elements that are themselves mappings.
/// Idempotent: applying twice yields the same result as once.
pub fn normalize_key_casing(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut normalized = Map::with_capacity(map.len());
            for (key, nested) in map {
                normalized.insert(lowercase_first(key), normalize_key_casing(nested));
            }
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(_) => normalize_key_casing(item),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

fn lowercase_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace string values case-insensitively equal to "true"/"false" with the
/// corresponding boolean, recursing through mappings and sequences.
pub fn coerce_booleans(value: &mut Value) {
    visit_values(value, &|v| {
        if let Value::String(s) = v {
            if s.eq_ignore_ascii_case("true") {
                *v = Value::Bool(true);
            } else if s.eq_ignore_ascii_case("false") {
                *v = Value::Bool(false);
            }
        }
    });
}

/// Replace string values consisting solely of decimal digits with their
/// integer value, recursing through mappings and sequences.
pub fn coerce_integers(value: &mut Value) {
    visit_values(value, &|v| {
        if let Value::String(s) = v {
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(n) = s.parse::<u64>() {
                    *v = Value::Number(n.into());
                }
            }
        }
    });
}

fn visit_values(value: &mut Value, replace: &dyn Fn(&mut Value)) {
    match value {
        Value::Object(map) => {
            for nested in map.values_mut() {
                visit_values(nested, replace);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                visit_values(item, replace);
            }
        }
        leaf => replace(leaf),
    }
}

/// Drop top-level keys the target create API rejects (the orchestrator's
/// service token and, for clusters, the principal fields consumed locally
/// by the access-entry step). Applied after casing normalization.
pub fn strip_keys(value: &mut Value, keys: &[&str]) {
    if let Value::Object(map) = value {
        for key in keys {
            map.remove(*key);
        }
    }
}

/// Overlay stack-level tags onto the payload's tags. Stack tags win on key
/// collision; a list-of-pairs tag form is collapsed to a mapping first.
pub fn merge_stack_tags(tags: &mut Option<TagSet>, stack_tags: BTreeMap<String, String>) {
    let mut merged = tags.take().map(TagSet::into_map).unwrap_or_default();
    merged.extend(stack_tags);
    *tags = Some(TagSet::Map(merged));
}
