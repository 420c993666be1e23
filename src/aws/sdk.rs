// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! AWS SDK-backed implementations of the service traits. These own the
//! hardcoded mapping from the typed payloads to SDK request builders.

use crate::aws::{
    AccessEntryDescription, AccessEntryRequest, ClusterDescription, EksApi, IamApi,
    NodeGroupDescription, StackApi,
};
use crate::error::{ProviderError, Result};
use crate::types::cluster::ClusterPayload;
use crate::types::nodegroup::NodeGroupPayload;
use aws_config::SdkConfig;
use aws_sdk_eks::error::{DisplayErrorContext, SdkError};
use aws_sdk_eks::types::{
    AccessScope, AccessScopeType, AmiTypes, AuthenticationMode, CapacityTypes,
    CreateAccessConfigRequest, EncryptionConfig, IpFamily, KubernetesNetworkConfigRequest,
    LaunchTemplateSpecification, LogSetup, LogType, Logging, NodegroupScalingConfig,
    NodegroupUpdateConfig, Provider, RemoteAccessConfig, SupportType, Taint, TaintEffect,
    UpgradePolicyRequest, VpcConfigRequest, ZonalShiftConfigRequest,
};
use std::collections::BTreeMap;

fn api_error<E, R>(err: SdkError<E, R>) -> ProviderError
where
    SdkError<E, R>: std::error::Error,
{
    ProviderError::UpstreamApi(format!("{}", DisplayErrorContext(&err)))
}

fn missing_field(what: &str) -> ProviderError {
    ProviderError::UpstreamApi(format!("API response missing {what}"))
}

/// EKS client with the mandatory endpoint override applied
pub struct SdkEks {
    client: aws_sdk_eks::Client,
}

impl SdkEks {
    pub fn new(sdk_config: &SdkConfig, endpoint_url: &str) -> Self {
        let conf = aws_sdk_eks::config::Builder::from(sdk_config)
            .endpoint_url(endpoint_url)
            .build();
        Self {
            client: aws_sdk_eks::Client::from_conf(conf),
        }
    }
}

impl EksApi for SdkEks {
    async fn describe_cluster(&self, name: &str) -> Result<Option<ClusterDescription>> {
        let output = match self.client.describe_cluster().name(name).send().await {
            Ok(output) => output,
            Err(err) => {
                return if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception())
                {
                    Ok(None)
                } else {
                    Err(api_error(err))
                };
            }
        };

        let cluster = output
            .cluster()
            .ok_or_else(|| missing_field("cluster in DescribeCluster response"))?;

        Ok(Some(ClusterDescription {
            name: cluster.name().unwrap_or(name).to_string(),
            arn: cluster
                .arn()
                .ok_or_else(|| missing_field("cluster ARN"))?
                .to_string(),
            status: cluster
                .status()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            endpoint: cluster.endpoint().map(str::to_string),
            certificate_authority_data: cluster
                .certificate_authority()
                .and_then(|ca| ca.data())
                .map(str::to_string),
            cluster_security_group_id: cluster
                .resources_vpc_config()
                .and_then(|vpc| vpc.cluster_security_group_id())
                .map(str::to_string),
        }))
    }

    async fn create_cluster(&self, payload: &ClusterPayload) -> Result<()> {
        let vpc = VpcConfigRequest::builder()
            .set_subnet_ids(Some(payload.resources_vpc_config.subnet_ids.clone()))
            .set_security_group_ids(
                (!payload.resources_vpc_config.security_group_ids.is_empty())
                    .then(|| payload.resources_vpc_config.security_group_ids.clone()),
            )
            .set_endpoint_public_access(payload.resources_vpc_config.endpoint_public_access)
            .set_endpoint_private_access(payload.resources_vpc_config.endpoint_private_access)
            .set_public_access_cidrs(payload.resources_vpc_config.public_access_cidrs.clone())
            .build();

        let mut request = self
            .client
            .create_cluster()
            .name(&payload.name)
            .role_arn(&payload.role_arn)
            .resources_vpc_config(vpc)
            .set_version(payload.version.clone())
            .set_bootstrap_self_managed_addons(payload.bootstrap_self_managed_addons);

        if let Some(network) = &payload.kubernetes_network_config {
            request = request.kubernetes_network_config(
                KubernetesNetworkConfigRequest::builder()
                    .set_ip_family(network.ip_family.as_deref().map(IpFamily::from))
                    .set_service_ipv4_cidr(network.service_ipv4_cidr.clone())
                    .build(),
            );
        }

        if let Some(access) = &payload.access_config {
            request = request.access_config(
                CreateAccessConfigRequest::builder()
                    .set_authentication_mode(
                        access
                            .authentication_mode
                            .as_deref()
                            .map(AuthenticationMode::from),
                    )
                    .set_bootstrap_cluster_creator_admin_permissions(
                        access.bootstrap_cluster_creator_admin_permissions,
                    )
                    .build(),
            );
        }

        if let Some(configs) = &payload.encryption_config {
            for config in configs {
                request = request.encryption_config(
                    EncryptionConfig::builder()
                        .set_resources(config.resources.clone())
                        .set_provider(config.provider.as_ref().map(|p| {
                            Provider::builder().set_key_arn(p.key_arn.clone()).build()
                        }))
                        .build(),
                );
            }
        }

        if let Some(logging) = &payload.logging {
            let mut builder = Logging::builder();
            for setup in logging.cluster_logging.iter().flatten() {
                builder = builder.cluster_logging(
                    LogSetup::builder()
                        .set_types(
                            setup
                                .types
                                .as_ref()
                                .map(|types| types.iter().map(|t| LogType::from(t.as_str())).collect()),
                        )
                        .set_enabled(setup.enabled)
                        .build(),
                );
            }
            request = request.logging(builder.build());
        }

        if let Some(policy) = &payload.upgrade_policy {
            request = request.upgrade_policy(
                UpgradePolicyRequest::builder()
                    .set_support_type(policy.support_type.as_deref().map(SupportType::from))
                    .build(),
            );
        }

        if let Some(zonal_shift) = &payload.zonal_shift_config {
            request = request.zonal_shift_config(
                ZonalShiftConfigRequest::builder()
                    .set_enabled(zonal_shift.enabled)
                    .build(),
            );
        }

        if let Some(tags) = &payload.tags {
            request = request.set_tags(Some(tags.clone().into_map().into_iter().collect()));
        }

        request.send().await.map_err(api_error)?;
        Ok(())
    }

    async fn delete_cluster(&self, name: &str) -> Result<()> {
        self.client
            .delete_cluster()
            .name(name)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn describe_nodegroup(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
    ) -> Result<NodeGroupDescription> {
        let output = self
            .client
            .describe_nodegroup()
            .cluster_name(cluster_name)
            .nodegroup_name(nodegroup_name)
            .send()
            .await
            .map_err(api_error)?;

        let nodegroup = output
            .nodegroup()
            .ok_or_else(|| missing_field("nodegroup in DescribeNodegroup response"))?;

        Ok(NodeGroupDescription {
            arn: nodegroup
                .nodegroup_arn()
                .ok_or_else(|| missing_field("nodegroup ARN"))?
                .to_string(),
            node_role: nodegroup.node_role().map(str::to_string),
        })
    }

    async fn create_nodegroup(&self, payload: &NodeGroupPayload) -> Result<NodeGroupDescription> {
        let mut request = self
            .client
            .create_nodegroup()
            .cluster_name(&payload.cluster_name)
            .nodegroup_name(&payload.nodegroup_name)
            .node_role(&payload.node_role)
            .set_subnets(Some(payload.subnets.clone()))
            .set_instance_types(payload.instance_types.clone())
            .set_disk_size(payload.disk_size)
            .set_ami_type(payload.ami_type.as_deref().map(AmiTypes::from))
            .set_capacity_type(payload.capacity_type.as_deref().map(CapacityTypes::from))
            .set_version(payload.version.clone())
            .set_release_version(payload.release_version.clone())
            .set_labels(
                payload
                    .labels
                    .clone()
                    .map(|labels| labels.into_iter().collect()),
            );

        if let Some(scaling) = &payload.scaling_config {
            request = request.scaling_config(
                NodegroupScalingConfig::builder()
                    .set_min_size(scaling.min_size)
                    .set_max_size(scaling.max_size)
                    .set_desired_size(scaling.desired_size)
                    .build(),
            );
        }

        for taint in payload.taints.iter().flatten() {
            request = request.taints(
                Taint::builder()
                    .set_key(taint.key.clone())
                    .set_value(taint.value.clone())
                    .set_effect(taint.effect.as_deref().map(TaintEffect::from))
                    .build(),
            );
        }

        if let Some(template) = &payload.launch_template {
            request = request.launch_template(
                LaunchTemplateSpecification::builder()
                    .set_id(template.id.clone())
                    .set_name(template.name.clone())
                    .set_version(template.version.clone())
                    .build(),
            );
        }

        if let Some(update) = &payload.update_config {
            request = request.update_config(
                NodegroupUpdateConfig::builder()
                    .set_max_unavailable(update.max_unavailable)
                    .set_max_unavailable_percentage(update.max_unavailable_percentage)
                    .build(),
            );
        }

        if let Some(remote) = &payload.remote_access {
            request = request.remote_access(
                RemoteAccessConfig::builder()
                    .set_ec2_ssh_key(remote.ec2_ssh_key.clone())
                    .set_source_security_groups(remote.source_security_groups.clone())
                    .build(),
            );
        }

        if let Some(tags) = &payload.tags {
            request = request.set_tags(Some(tags.clone().into_map().into_iter().collect()));
        }

        let output = request.send().await.map_err(api_error)?;
        let nodegroup = output
            .nodegroup()
            .ok_or_else(|| missing_field("nodegroup in CreateNodegroup response"))?;

        Ok(NodeGroupDescription {
            arn: nodegroup
                .nodegroup_arn()
                .ok_or_else(|| missing_field("nodegroup ARN"))?
                .to_string(),
            node_role: nodegroup.node_role().map(str::to_string),
        })
    }

    async fn delete_nodegroup(&self, cluster_name: &str, nodegroup_name: &str) -> Result<()> {
        self.client
            .delete_nodegroup()
            .cluster_name(cluster_name)
            .nodegroup_name(nodegroup_name)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn create_access_entry(
        &self,
        request: &AccessEntryRequest,
    ) -> Result<AccessEntryDescription> {
        let output = self
            .client
            .create_access_entry()
            .cluster_name(&request.cluster_name)
            .principal_arn(&request.principal_arn)
            .set_username(request.username.clone())
            .set_type(request.entry_type.clone())
            .send()
            .await
            .map_err(api_error)?;

        let entry = output
            .access_entry()
            .ok_or_else(|| missing_field("accessEntry in CreateAccessEntry response"))?;

        Ok(AccessEntryDescription {
            arn: entry
                .access_entry_arn()
                .ok_or_else(|| missing_field("access entry ARN"))?
                .to_string(),
        })
    }

    async fn associate_access_policy(
        &self,
        cluster_name: &str,
        principal_arn: &str,
        policy_arn: &str,
    ) -> Result<()> {
        self.client
            .associate_access_policy()
            .cluster_name(cluster_name)
            .principal_arn(principal_arn)
            .policy_arn(policy_arn)
            .access_scope(
                AccessScope::builder()
                    .r#type(AccessScopeType::Cluster)
                    .set_namespaces(Some(Vec::new()))
                    .build(),
            )
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn delete_access_entry(&self, cluster_name: &str, principal_arn: &str) -> Result<()> {
        self.client
            .delete_access_entry()
            .cluster_name(cluster_name)
            .principal_arn(principal_arn)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }
}

pub struct SdkIam {
    client: aws_sdk_iam::Client,
}

impl SdkIam {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_iam::Client::new(sdk_config),
        }
    }
}

impl IamApi for SdkIam {
    async fn instance_profiles_for_role(&self, role_name: &str) -> Result<Vec<String>> {
        let output = self
            .client
            .list_instance_profiles_for_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(api_error)?;

        Ok(output
            .instance_profiles()
            .iter()
            .map(|profile| profile.instance_profile_name().to_string())
            .collect())
    }

    async fn remove_role_from_instance_profile(
        &self,
        instance_profile_name: &str,
        role_name: &str,
    ) -> Result<()> {
        self.client
            .remove_role_from_instance_profile()
            .instance_profile_name(instance_profile_name)
            .role_name(role_name)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }
}

pub struct SdkStacks {
    client: aws_sdk_cloudformation::Client,
}

impl SdkStacks {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_cloudformation::Client::new(sdk_config),
        }
    }
}

impl StackApi for SdkStacks {
    async fn stack_tags(&self, stack_name: &str) -> Result<BTreeMap<String, String>> {
        let output = self
            .client
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(api_error)?;

        let mut tags = BTreeMap::new();
        if let Some(stack) = output.stacks().first() {
            for tag in stack.tags() {
                if let (Some(key), Some(value)) = (tag.key(), tag.value()) {
                    tags.insert(key.to_string(), value.to_string());
                }
            }
        }
        Ok(tags)
    }
}
