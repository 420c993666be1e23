// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use eks_resource_provider::handlers::handle_invocation;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting EKS custom resource provider");

    // Base AWS configuration is loaded once; per-invocation clients apply
    // the EKS endpoint override on top of it
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let http = reqwest::Client::new();

    let sdk_config = &sdk_config;
    let http = &http;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_invocation(event.payload, sdk_config, http).await?;
        Ok::<(), Error>(())
    }))
    .await
}
