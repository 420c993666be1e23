// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-resource-kind lifecycle handlers and the invocation entry point.

pub mod access_entry;
pub mod cluster;
pub mod nodegroup;

use crate::aws::sdk::{SdkEks, SdkIam, SdkStacks};
use crate::aws::{EksApi, IamApi, StackApi};
use crate::config::Config;
use crate::constants;
use crate::error::Result;
use crate::event::{CustomResourceEvent, ResourceKind};
use crate::response::{self, CfnResponse};
use aws_config::SdkConfig;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{error, info};

/// The service clients one invocation operates with
pub struct Provider<E, I, S> {
    pub eks: E,
    pub iam: I,
    pub stacks: S,
    /// Interval between DescribeCluster polls while waiting for activation
    pub poll_interval: Duration,
}

impl<E: EksApi, I: IamApi, S: StackApi> Provider<E, I, S> {
    pub fn new(eks: E, iam: I, stacks: S) -> Self {
        Self {
            eks,
            iam,
            stacks,
            poll_interval: Duration::from_secs(constants::cluster::POLL_INTERVAL_SECS),
        }
    }

    /// Route the event to the lifecycle handler for its resource kind
    pub async fn handle(&self, event: &CustomResourceEvent) -> Result<Outcome> {
        match event.resource_type {
            ResourceKind::Cluster => cluster::handle(self, event).await,
            ResourceKind::NodeGroup => nodegroup::handle(self, event).await,
            ResourceKind::AccessEntry => access_entry::handle(self, event).await,
        }
    }
}

/// Result of a successful lifecycle operation
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub physical_resource_id: Option<String>,
    pub data: Map<String, Value>,
}

impl Outcome {
    /// Outcome for a completed delete: echoes the prior physical id
    pub fn deleted(event: &CustomResourceEvent) -> Self {
        let mut data = Map::new();
        data.insert(
            "Message".to_string(),
            Value::String("Resource deleted".to_string()),
        );
        Self {
            physical_resource_id: event.physical_resource_id.clone(),
            data,
        }
    }
}

/// Handle one invocation end to end: parse the event, run the lifecycle
/// operation, and report the result to CloudFormation exactly once.
pub async fn handle_invocation(
    payload: Value,
    sdk_config: &SdkConfig,
    http: &reqwest::Client,
) -> Result<()> {
    let event = CustomResourceEvent::from_value(payload)?;
    info!(
        request_type = ?event.request_type,
        resource_type = ?event.resource_type,
        stack_id = %event.stack_id,
        "Received custom resource event"
    );

    let outcome = run_lifecycle(&event, sdk_config).await;
    if let Err(err) = &outcome {
        error!("Lifecycle operation failed: {err}");
    }

    let response = CfnResponse::from_outcome(&event, outcome);
    response::send(http, &event.response_url, &response).await
}

async fn run_lifecycle(
    event: &CustomResourceEvent,
    sdk_config: &SdkConfig,
) -> Result<Outcome> {
    // Endpoint configuration is checked here so a missing override is
    // reported through the failure callback, before any API call.
    let config = Config::from_env()?;
    let provider = Provider::new(
        SdkEks::new(sdk_config, &config.eks_endpoint_url),
        SdkIam::new(sdk_config),
        SdkStacks::new(sdk_config),
    );
    provider.handle(event).await
}
