// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Node-group lifecycle. Create returns immediately with the new ARN;
//! delete first detaches the node role from its instance profiles, since
//! the service refuses to delete a node group whose role is still attached.

use crate::aws::{EksApi, IamApi, StackApi};
use crate::error::{ProviderError, Result};
use crate::event::{CustomResourceEvent, RequestType};
use crate::handlers::{Outcome, Provider};
use crate::normalize::{
    coerce_booleans, coerce_integers, merge_stack_tags, normalize_key_casing, strip_keys,
};
use crate::types::nodegroup::NodeGroupPayload;
use serde_json::{json, Map};
use tracing::info;

pub async fn handle<E: EksApi, I: IamApi, S: StackApi>(
    provider: &Provider<E, I, S>,
    event: &CustomResourceEvent,
) -> Result<Outcome> {
    let cluster_name = event.required_property("ClusterName")?.to_string();

    if event.request_type == RequestType::Delete {
        let nodegroup_name = event.required_property("NodegroupName")?.to_string();
        delete(provider, &cluster_name, &nodegroup_name).await?;
        return Ok(Outcome::deleted(event));
    }

    let mut normalized = normalize_key_casing(&event.resource_properties);
    strip_keys(&mut normalized, &["serviceToken"]);
    coerce_booleans(&mut normalized);
    coerce_integers(&mut normalized);
    let mut payload: NodeGroupPayload = serde_json::from_value(normalized).map_err(|e| {
        ProviderError::Configuration(format!("invalid node group properties: {e}"))
    })?;

    let stack_tags = provider.stacks.stack_tags(event.stack_name()?).await?;
    merge_stack_tags(&mut payload.tags, stack_tags);

    info!(
        "Creating EKS nodegroup {} in cluster {}",
        payload.nodegroup_name, payload.cluster_name
    );
    let nodegroup = provider.eks.create_nodegroup(&payload).await?;
    info!("EKS nodegroup created: {}", nodegroup.arn);

    let mut data = Map::new();
    data.insert("Arn".to_string(), json!(nodegroup.arn));

    Ok(Outcome {
        physical_resource_id: Some(nodegroup.arn),
        data,
    })
}

/// Detach the node role from every instance profile it is associated with,
/// then delete the node group.
async fn delete<E: EksApi, I: IamApi, S: StackApi>(
    provider: &Provider<E, I, S>,
    cluster_name: &str,
    nodegroup_name: &str,
) -> Result<()> {
    let nodegroup = provider
        .eks
        .describe_nodegroup(cluster_name, nodegroup_name)
        .await?;

    if let Some(node_role_arn) = &nodegroup.node_role {
        let role_name = role_name_from_arn(node_role_arn);
        for profile in provider.iam.instance_profiles_for_role(role_name).await? {
            info!("Removing role {role_name} from instance profile {profile}");
            provider
                .iam
                .remove_role_from_instance_profile(&profile, role_name)
                .await?;
        }
    }

    info!("Deleting EKS nodegroup {nodegroup_name} in cluster {cluster_name}");
    provider
        .eks
        .delete_nodegroup(cluster_name, nodegroup_name)
        .await?;
    Ok(())
}

/// The role name is the last '/'-separated segment of its ARN
fn role_name_from_arn(arn: &str) -> &str {
    arn.rsplit('/').next().unwrap_or(arn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ResourceKind;
    use crate::test_utils::{call_log, calls, make_event, provider};
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    fn nodegroup_props() -> Value {
        json!({
            "ServiceToken": "arn:aws:lambda:us-west-2:111122223333:function:provider",
            "ClusterName": "my-cluster",
            "NodegroupName": "ng-1",
            "NodeRole": "arn:aws:iam::111122223333:role/my-node-role",
            "Subnets": ["subnet-1", "subnet-2"],
            "ScalingConfig": {"MinSize": "1", "MaxSize": "4", "DesiredSize": "3"},
            "DiskSize": "20",
            "CapacityType": "ON_DEMAND",
            "Tags": {"env": "dev"}
        })
    }

    #[test]
    fn test_role_name_from_arn() {
        assert_eq!(
            role_name_from_arn("arn:aws:iam::111122223333:role/my-node-role"),
            "my-node-role"
        );
        assert_eq!(role_name_from_arn("plain-name"), "plain-name");
    }

    #[tokio::test]
    async fn test_create_normalizes_and_merges_tags() {
        let log = call_log();
        let p = provider(&log);
        *p.stacks.tags.lock().unwrap() = BTreeMap::from([
            ("env".to_string(), "prod".to_string()),
            ("team".to_string(), "x".to_string()),
        ]);

        let event = make_event(
            RequestType::Create,
            ResourceKind::NodeGroup,
            nodegroup_props(),
        );
        let outcome = p.handle(&event).await.unwrap();

        assert_eq!(
            calls(&log),
            vec![
                "describe_stacks:my-stack".to_string(),
                "create_nodegroup:my-cluster:ng-1".to_string(),
            ]
        );

        let payloads = p.eks.nodegroup_payloads.lock().unwrap();
        let payload = &payloads[0];
        // Integer-string coercion applies to node-group payloads
        let scaling = payload.scaling_config.clone().unwrap();
        assert_eq!(scaling.min_size, Some(1));
        assert_eq!(scaling.max_size, Some(4));
        assert_eq!(scaling.desired_size, Some(3));
        assert_eq!(payload.disk_size, Some(20));
        // Stack tags win over payload tags
        let tags = payload.tags.clone().unwrap().into_map();
        assert_eq!(tags.get("env").unwrap(), "prod");
        assert_eq!(tags.get("team").unwrap(), "x");

        assert!(outcome
            .physical_resource_id
            .unwrap()
            .starts_with("arn:aws:eks:"));
        assert!(outcome.data.contains_key("Arn"));
    }

    #[tokio::test]
    async fn test_delete_detaches_role_from_all_profiles_first() {
        let log = call_log();
        let p = provider(&log);
        *p.eks.nodegroup.lock().unwrap() = Some(crate::aws::NodeGroupDescription {
            arn: "arn:aws:eks:us-west-2:111122223333:nodegroup/my-cluster/ng-1/uuid".to_string(),
            node_role: Some("arn:aws:iam::111122223333:role/my-node-role".to_string()),
        });
        *p.iam.profiles.lock().unwrap() =
            vec!["profile-a".to_string(), "profile-b".to_string()];

        let event = make_event(
            RequestType::Delete,
            ResourceKind::NodeGroup,
            json!({
                "ServiceToken": "arn",
                "ClusterName": "my-cluster",
                "NodegroupName": "ng-1"
            }),
        );
        let outcome = p.handle(&event).await.unwrap();

        // Both detachments happen before the node-group delete
        assert_eq!(
            calls(&log),
            vec![
                "describe_nodegroup:my-cluster:ng-1".to_string(),
                "list_instance_profiles:my-node-role".to_string(),
                "remove_role:profile-a:my-node-role".to_string(),
                "remove_role:profile-b:my-node-role".to_string(),
                "delete_nodegroup:my-cluster:ng-1".to_string(),
            ]
        );
        assert_eq!(outcome.data["Message"], json!("Resource deleted"));
    }

    #[tokio::test]
    async fn test_delete_with_no_instance_profiles() {
        let log = call_log();
        let p = provider(&log);
        *p.eks.nodegroup.lock().unwrap() = Some(crate::aws::NodeGroupDescription {
            arn: "arn:aws:eks:us-west-2:111122223333:nodegroup/my-cluster/ng-1/uuid".to_string(),
            node_role: Some("arn:aws:iam::111122223333:role/my-node-role".to_string()),
        });

        let event = make_event(
            RequestType::Delete,
            ResourceKind::NodeGroup,
            json!({
                "ServiceToken": "arn",
                "ClusterName": "my-cluster",
                "NodegroupName": "ng-1"
            }),
        );
        p.handle(&event).await.unwrap();

        let recorded = calls(&log);
        assert!(!recorded.iter().any(|c| c.starts_with("remove_role")));
        assert_eq!(recorded.last().unwrap(), "delete_nodegroup:my-cluster:ng-1");
    }

    #[tokio::test]
    async fn test_create_missing_cluster_name() {
        let log = call_log();
        let p = provider(&log);

        let event = make_event(
            RequestType::Create,
            ResourceKind::NodeGroup,
            json!({"NodegroupName": "ng-1"}),
        );
        let err = p.handle(&event).await.unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
        assert!(calls(&log).is_empty());
    }
}
