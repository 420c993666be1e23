// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed CreateCluster payload, deserialized from normalized template
//! properties. Field set matches what the template builder emits; unknown
//! keys are ignored so newer template fields do not break existing stacks.

use crate::types::TagSet;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterPayload {
    pub name: String,
    pub role_arn: String,
    pub resources_vpc_config: VpcConfig,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub kubernetes_network_config: Option<NetworkConfig>,
    #[serde(default)]
    pub access_config: Option<AccessConfig>,
    #[serde(default)]
    pub bootstrap_self_managed_addons: Option<bool>,
    #[serde(default)]
    pub encryption_config: Option<Vec<EncryptionConfig>>,
    #[serde(default)]
    pub logging: Option<Logging>,
    #[serde(default)]
    pub upgrade_policy: Option<UpgradePolicy>,
    #[serde(default)]
    pub zonal_shift_config: Option<ZonalShiftConfig>,
    #[serde(default)]
    pub tags: Option<TagSet>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcConfig {
    #[serde(default)]
    pub subnet_ids: Vec<String>,
    #[serde(default)]
    pub security_group_ids: Vec<String>,
    #[serde(default)]
    pub endpoint_public_access: Option<bool>,
    #[serde(default)]
    pub endpoint_private_access: Option<bool>,
    #[serde(default)]
    pub public_access_cidrs: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    #[serde(default)]
    pub ip_family: Option<String>,
    #[serde(default)]
    pub service_ipv4_cidr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    #[serde(default)]
    pub authentication_mode: Option<String>,
    #[serde(default)]
    pub bootstrap_cluster_creator_admin_permissions: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionConfig {
    #[serde(default)]
    pub resources: Option<Vec<String>>,
    #[serde(default)]
    pub provider: Option<EncryptionProvider>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionProvider {
    #[serde(default)]
    pub key_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logging {
    #[serde(default)]
    pub cluster_logging: Option<Vec<LogSetup>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSetup {
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradePolicy {
    #[serde(default)]
    pub support_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonalShiftConfig {
    #[serde(default)]
    pub enabled: Option<bool>,
}
