// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed view of the CloudFormation custom-resource lifecycle event.

use crate::error::{ProviderError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Lifecycle verb sent by CloudFormation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// The closed set of custom-resource kinds this provider handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "Custom::EksCluster")]
    Cluster,
    #[serde(rename = "Custom::EksManagedNodeGroup")]
    NodeGroup,
    #[serde(rename = "Custom::EksAccessEntry")]
    AccessEntry,
}

/// A single custom-resource invocation. Immutable for the invocation's lifetime.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: RequestType,
    pub resource_type: ResourceKind,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Value,
}

impl CustomResourceEvent {
    /// Parse the raw invocation payload. A missing verb or an unrecognized
    /// resource kind is rejected here, before any external call is made.
    pub fn from_value(raw: Value) -> Result<Self> {
        serde_json::from_value(raw).map_err(|e| {
            ProviderError::InvalidInvocation(format!(
                "not a CloudFormation custom resource event: {e}"
            ))
        })
    }

    /// Stack name parsed from the StackId ARN (second '/'-separated segment)
    pub fn stack_name(&self) -> Result<&str> {
        self.stack_id
            .split('/')
            .nth(1)
            .ok_or_else(|| {
                ProviderError::InvalidInvocation(format!("malformed StackId: {}", self.stack_id))
            })
    }

    /// Required string-valued resource property, as declared in the template
    pub fn required_property(&self, key: &str) -> Result<&str> {
        self.resource_properties
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ProviderError::Configuration(format!("Missing required field: {key}"))
            })
    }

    /// Check that all listed properties are present (any value shape)
    pub fn require_properties(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            if self.resource_properties.get(*key).is_none() {
                return Err(ProviderError::Configuration(format!(
                    "Missing required field: {key}"
                )));
            }
        }
        Ok(())
    }
}
