// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster lifecycle: describe-or-create with adoption of a pre-existing
//! cluster, poll until ACTIVE, then grant the calling principal access.

use crate::aws::{AccessEntryRequest, ClusterDescription, EksApi, IamApi, StackApi};
use crate::constants;
use crate::error::{ProviderError, Result};
use crate::event::{CustomResourceEvent, RequestType};
use crate::handlers::{access_entry, Outcome, Provider};
use crate::normalize::{coerce_booleans, merge_stack_tags, normalize_key_casing, strip_keys};
use crate::types::cluster::ClusterPayload;
use serde_json::{json, Map};
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

pub async fn handle<E: EksApi, I: IamApi, S: StackApi>(
    provider: &Provider<E, I, S>,
    event: &CustomResourceEvent,
) -> Result<Outcome> {
    let cluster_name = event.required_property("Name")?.to_string();

    if event.request_type == RequestType::Delete {
        info!("Deleting EKS cluster: {cluster_name}");
        provider.eks.delete_cluster(&cluster_name).await?;
        info!("EKS cluster deleted: {cluster_name}");
        return Ok(Outcome::deleted(event));
    }

    event.require_properties(&[
        "Name",
        "RoleArn",
        "ResourcesVpcConfig",
        "IAMPrincipalArn",
        "STSRoleArn",
    ])?;

    // Consumed locally by the access-entry step, never sent to CreateCluster
    let principal_arn = event.required_property("IAMPrincipalArn")?.to_string();
    let session_role_arn = event.required_property("STSRoleArn")?.to_string();

    let mut normalized = normalize_key_casing(&event.resource_properties);
    strip_keys(
        &mut normalized,
        &["serviceToken", "iAMPrincipalArn", "sTSRoleArn"],
    );
    coerce_booleans(&mut normalized);
    let mut payload: ClusterPayload = serde_json::from_value(normalized)
        .map_err(|e| ProviderError::Configuration(format!("invalid cluster properties: {e}")))?;

    let stack_tags = provider.stacks.stack_tags(event.stack_name()?).await?;
    merge_stack_tags(&mut payload.tags, stack_tags);

    let cluster = create_or_adopt(provider, &payload).await?;

    access_entry::create_entry(
        &provider.eks,
        &AccessEntryRequest {
            cluster_name: cluster_name.clone(),
            principal_arn,
            username: Some(session_role_arn),
            entry_type: Some(constants::STANDARD_ACCESS_ENTRY.to_string()),
        },
    )
    .await?;

    cluster_outcome(&cluster)
}

/// Create the cluster unless one with this name already exists (re-invocation
/// after a partial prior failure adopts it), then wait for activation.
async fn create_or_adopt<E: EksApi, I: IamApi, S: StackApi>(
    provider: &Provider<E, I, S>,
    payload: &ClusterPayload,
) -> Result<ClusterDescription> {
    info!("Checking if EKS cluster {} already exists", payload.name);
    if provider.eks.describe_cluster(&payload.name).await?.is_none() {
        info!("Creating EKS cluster {}", payload.name);
        provider.eks.create_cluster(payload).await?;
    } else {
        info!("EKS cluster {} already exists, adopting it", payload.name);
    }

    wait_for_cluster_active(&provider.eks, &payload.name, provider.poll_interval).await
}

/// Poll DescribeCluster at a fixed interval until the cluster is ACTIVE.
/// There is no attempt cap; the platform invocation timeout bounds us.
async fn wait_for_cluster_active<E: EksApi>(
    eks: &E,
    cluster_name: &str,
    poll_interval: Duration,
) -> Result<ClusterDescription> {
    loop {
        let cluster = eks.describe_cluster(cluster_name).await?.ok_or_else(|| {
            ProviderError::ResourceState(format!(
                "EKS cluster {cluster_name} no longer exists while waiting for activation"
            ))
        })?;

        match cluster.status.as_str() {
            constants::cluster::STATUS_ACTIVE => {
                info!("EKS cluster {cluster_name} is now ACTIVE");
                return Ok(cluster);
            }
            constants::cluster::STATUS_FAILED => {
                return Err(ProviderError::ResourceState(format!(
                    "EKS cluster {cluster_name} creation failed"
                )));
            }
            status => {
                info!("EKS cluster {cluster_name} status: {status}. Waiting...");
                sleep(poll_interval).await;
            }
        }
    }
}

fn cluster_outcome(cluster: &ClusterDescription) -> Result<Outcome> {
    let attribute = |value: &Option<String>, name: &str| {
        value.clone().ok_or_else(|| {
            ProviderError::UpstreamApi(format!("cluster description missing {name}"))
        })
    };

    let mut data = Map::new();
    data.insert("Arn".to_string(), json!(cluster.arn));
    data.insert("ClusterName".to_string(), json!(cluster.name));
    data.insert(
        "ClusterSecurityGroupId".to_string(),
        json!(attribute(
            &cluster.cluster_security_group_id,
            "cluster security group id"
        )?),
    );
    data.insert(
        "CertificateAuthorityData".to_string(),
        json!(attribute(
            &cluster.certificate_authority_data,
            "certificate authority data"
        )?),
    );
    data.insert(
        "Endpoint".to_string(),
        json!(attribute(&cluster.endpoint, "endpoint")?),
    );

    Ok(Outcome {
        physical_resource_id: Some(cluster.arn.clone()),
        data,
    })
}
