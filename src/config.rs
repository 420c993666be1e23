// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants;
use crate::error::{ProviderError, Result};
use std::env;

/// Provider configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint URL override for the EKS service
    pub eks_endpoint_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Checked per invocation so a missing endpoint is reported through the
    /// CloudFormation failure callback instead of crashing the runtime.
    pub fn from_env() -> Result<Self> {
        let eks_endpoint_url = env::var(constants::env::EKS_ENDPOINT_URL)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ProviderError::Configuration(format!(
                    "{} environment variable is not set or is empty",
                    constants::env::EKS_ENDPOINT_URL
                ))
            })?;

        Ok(Config { eks_endpoint_url })
    }
}
