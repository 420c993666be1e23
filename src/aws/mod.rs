// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Seams over the AWS service APIs. Lifecycle handlers only see these traits
//! and the description structs, so tests can substitute recording mocks.

pub mod sdk;

use crate::error::Result;
use crate::types::cluster::ClusterPayload;
use crate::types::nodegroup::NodeGroupPayload;
use std::collections::BTreeMap;

/// What the provider needs to know about a cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterDescription {
    pub name: String,
    pub arn: String,
    pub status: String,
    pub endpoint: Option<String>,
    pub certificate_authority_data: Option<String>,
    pub cluster_security_group_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeGroupDescription {
    pub arn: String,
    pub node_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessEntryDescription {
    pub arn: String,
}

/// Inputs for creating an access entry
#[derive(Debug, Clone, PartialEq)]
pub struct AccessEntryRequest {
    pub cluster_name: String,
    pub principal_arn: String,
    pub username: Option<String>,
    pub entry_type: Option<String>,
}

/// EKS control-plane operations used by the lifecycle handlers
#[allow(async_fn_in_trait)]
pub trait EksApi {
    /// Describe a cluster by name; Ok(None) when it does not exist
    async fn describe_cluster(&self, name: &str) -> Result<Option<ClusterDescription>>;
    async fn create_cluster(&self, payload: &ClusterPayload) -> Result<()>;
    async fn delete_cluster(&self, name: &str) -> Result<()>;

    async fn describe_nodegroup(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
    ) -> Result<NodeGroupDescription>;
    async fn create_nodegroup(&self, payload: &NodeGroupPayload) -> Result<NodeGroupDescription>;
    async fn delete_nodegroup(&self, cluster_name: &str, nodegroup_name: &str) -> Result<()>;

    async fn create_access_entry(
        &self,
        request: &AccessEntryRequest,
    ) -> Result<AccessEntryDescription>;
    async fn associate_access_policy(
        &self,
        cluster_name: &str,
        principal_arn: &str,
        policy_arn: &str,
    ) -> Result<()>;
    async fn delete_access_entry(&self, cluster_name: &str, principal_arn: &str) -> Result<()>;
}

/// IAM operations needed to release a node role before node-group deletion
#[allow(async_fn_in_trait)]
pub trait IamApi {
    /// Names of all instance profiles the role is attached to
    async fn instance_profiles_for_role(&self, role_name: &str) -> Result<Vec<String>>;
    async fn remove_role_from_instance_profile(
        &self,
        instance_profile_name: &str,
        role_name: &str,
    ) -> Result<()>;
}

/// Access to the tags of the CloudFormation stack that owns the resource
#[allow(async_fn_in_trait)]
pub trait StackApi {
    async fn stack_tags(&self, stack_name: &str) -> Result<BTreeMap<String, String>>;
}
