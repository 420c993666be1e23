// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed CreateNodegroup payload. Deserialized after normalization, so
//! string-typed booleans and integers from the template have already been
//! coerced to their native types.

use crate::types::TagSet;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroupPayload {
    pub cluster_name: String,
    pub nodegroup_name: String,
    pub node_role: String,
    #[serde(default)]
    pub subnets: Vec<String>,
    #[serde(default)]
    pub instance_types: Option<Vec<String>>,
    #[serde(default)]
    pub scaling_config: Option<ScalingConfig>,
    #[serde(default)]
    pub disk_size: Option<i32>,
    #[serde(default)]
    pub ami_type: Option<String>,
    #[serde(default)]
    pub capacity_type: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub release_version: Option<String>,
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub taints: Option<Vec<Taint>>,
    #[serde(default)]
    pub launch_template: Option<LaunchTemplate>,
    #[serde(default)]
    pub update_config: Option<UpdateConfig>,
    #[serde(default)]
    pub remote_access: Option<RemoteAccess>,
    #[serde(default)]
    pub tags: Option<TagSet>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingConfig {
    #[serde(default)]
    pub min_size: Option<i32>,
    #[serde(default)]
    pub max_size: Option<i32>,
    #[serde(default)]
    pub desired_size: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taint {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchTemplate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfig {
    #[serde(default)]
    pub max_unavailable: Option<i32>,
    #[serde(default)]
    pub max_unavailable_percentage: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAccess {
    #[serde(default)]
    pub ec2_ssh_key: Option<String>,
    #[serde(default)]
    pub source_security_groups: Option<Vec<String>>,
}
