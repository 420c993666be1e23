// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Strongly-typed resource payloads, validated at the invocation boundary.

pub mod access_entry;
pub mod cluster;
pub mod nodegroup;

use serde::Deserialize;
use std::collections::BTreeMap;

/// Tags as they may appear in a template: either a plain mapping or the
/// CloudFormation list-of-pairs form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagSet {
    Map(BTreeMap<String, String>),
    Pairs(Vec<TagPair>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPair {
    pub key: String,
    pub value: String,
}

impl TagSet {
    /// Collapse either representation into a plain mapping
    pub fn into_map(self) -> BTreeMap<String, String> {
        match self {
            TagSet::Map(map) => map,
            TagSet::Pairs(pairs) => pairs.into_iter().map(|p| (p.key, p.value)).collect(),
        }
    }
}
