// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CloudFormation response reporting. Every invocation must PUT exactly one
//! response document to the event's pre-signed callback URL; missing it makes
//! the orchestrator hang until its own timeout.

use crate::error::{ProviderError, Result};
use crate::event::CustomResourceEvent;
use crate::handlers::Outcome;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
}

/// The response document CloudFormation expects on the callback URL
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub data: Map<String, Value>,
}

impl CfnResponse {
    /// Build the document for a finished lifecycle operation. Failures carry
    /// the error message both as the reason and as a Message data field.
    pub fn from_outcome(
        event: &CustomResourceEvent,
        outcome: std::result::Result<Outcome, ProviderError>,
    ) -> Self {
        match outcome {
            Ok(outcome) => Self {
                status: ResponseStatus::Success,
                reason: None,
                physical_resource_id: outcome
                    .physical_resource_id
                    .unwrap_or_else(|| fallback_physical_id(event)),
                stack_id: event.stack_id.clone(),
                request_id: event.request_id.clone(),
                logical_resource_id: event.logical_resource_id.clone(),
                data: outcome.data,
            },
            Err(err) => {
                let message = err.to_string();
                let mut data = Map::new();
                data.insert("Message".to_string(), Value::String(message.clone()));
                Self {
                    status: ResponseStatus::Failed,
                    reason: Some(message),
                    physical_resource_id: fallback_physical_id(event),
                    stack_id: event.stack_id.clone(),
                    request_id: event.request_id.clone(),
                    logical_resource_id: event.logical_resource_id.clone(),
                    data,
                }
            }
        }
    }
}

fn fallback_physical_id(event: &CustomResourceEvent) -> String {
    event
        .physical_resource_id
        .clone()
        .unwrap_or_else(|| event.logical_resource_id.clone())
}

/// PUT the response document to the callback URL. The callback contract
/// requires an empty content-type header.
pub async fn send(
    http: &reqwest::Client,
    response_url: &str,
    response: &CfnResponse,
) -> Result<()> {
    let body = serde_json::to_string(response)?;
    debug!("Sending response to {response_url}: {body}");

    http.put(response_url)
        .header(CONTENT_TYPE, "")
        .body(body)
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}
