// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed access-entry payload.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEntryPayload {
    pub cluster_name: String,
    pub principal_arn: String,
    #[serde(default)]
    pub username: Option<String>,
    /// Entry type; required on create, checked by the handler
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
}
