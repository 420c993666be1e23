// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Access-entry lifecycle. STANDARD entries additionally get the managed
//! cluster-admin access policy, scoped to the whole cluster.

use crate::aws::{AccessEntryDescription, AccessEntryRequest, EksApi, IamApi, StackApi};
use crate::constants;
use crate::error::{ProviderError, Result};
use crate::event::{CustomResourceEvent, RequestType};
use crate::handlers::{Outcome, Provider};
use crate::normalize::{normalize_key_casing, strip_keys};
use crate::types::access_entry::AccessEntryPayload;
use serde_json::{json, Map};
use tracing::info;

pub async fn handle<E: EksApi, I: IamApi, S: StackApi>(
    provider: &Provider<E, I, S>,
    event: &CustomResourceEvent,
) -> Result<Outcome> {
    let cluster_name = event.required_property("ClusterName")?.to_string();
    let principal_arn = event.required_property("PrincipalArn")?.to_string();

    if event.request_type == RequestType::Delete {
        info!("Deleting access entry for {principal_arn} in cluster {cluster_name}");
        provider
            .eks
            .delete_access_entry(&cluster_name, &principal_arn)
            .await?;
        return Ok(Outcome::deleted(event));
    }

    let mut normalized = normalize_key_casing(&event.resource_properties);
    strip_keys(&mut normalized, &["serviceToken"]);
    let payload: AccessEntryPayload = serde_json::from_value(normalized).map_err(|e| {
        ProviderError::Configuration(format!("invalid access entry properties: {e}"))
    })?;

    let entry_type = payload
        .entry_type
        .clone()
        .ok_or_else(|| ProviderError::Configuration("Missing required field: Type".to_string()))?;

    let entry = create_entry(
        &provider.eks,
        &AccessEntryRequest {
            cluster_name: payload.cluster_name,
            principal_arn: payload.principal_arn,
            username: payload.username,
            entry_type: Some(entry_type),
        },
    )
    .await?;

    let mut data = Map::new();
    data.insert("Arn".to_string(), json!(entry.arn));

    Ok(Outcome {
        physical_resource_id: Some(entry.arn),
        data,
    })
}

/// Create an access entry; STANDARD entries also get the cluster-admin
/// policy associated with cluster-wide scope. Shared with the cluster
/// create path, which grants the calling principal access after activation.
pub async fn create_entry<E: EksApi>(
    eks: &E,
    request: &AccessEntryRequest,
) -> Result<AccessEntryDescription> {
    info!(
        "Creating access entry in EKS cluster: {}",
        request.cluster_name
    );
    let entry = eks.create_access_entry(request).await?;

    if request.entry_type.as_deref() == Some(constants::STANDARD_ACCESS_ENTRY) {
        info!(
            "Associating cluster admin access policy for {}",
            request.principal_arn
        );
        eks.associate_access_policy(
            &request.cluster_name,
            &request.principal_arn,
            constants::CLUSTER_ADMIN_POLICY_ARN,
        )
        .await?;
    }

    Ok(entry)
}
