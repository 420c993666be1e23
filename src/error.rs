// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid invocation: {0}")]
    InvalidInvocation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    ResourceState(String),

    #[error("AWS API error: {0}")]
    UpstreamApi(String),

    #[error("Failed to send response to CloudFormation: {0}")]
    Callback(#[from] reqwest::Error),

    #[error("Failed to encode response document: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
