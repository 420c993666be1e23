// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Recording mocks for the AWS service traits, plus event builders.

use crate::aws::{
    AccessEntryDescription, AccessEntryRequest, ClusterDescription, EksApi, IamApi,
    NodeGroupDescription, StackApi,
};
use crate::error::{ProviderError, Result};
use crate::event::{CustomResourceEvent, RequestType, ResourceKind};
use crate::handlers::Provider;
use crate::types::cluster::ClusterPayload;
use crate::types::nodegroup::NodeGroupPayload;
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared, ordered log of every mock API call across all services
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Provider wired up with recording mocks and a zero poll interval
pub fn provider(log: &CallLog) -> Provider<MockEks, MockIam, MockStacks> {
    Provider {
        eks: MockEks::new(log.clone()),
        iam: MockIam::new(log.clone()),
        stacks: MockStacks::new(log.clone()),
        poll_interval: Duration::ZERO,
    }
}

pub fn make_event(
    request_type: RequestType,
    resource_type: ResourceKind,
    properties: Value,
) -> CustomResourceEvent {
    CustomResourceEvent {
        request_type,
        resource_type,
        response_url: "https://cloudformation.example.test/callback".to_string(),
        stack_id: "arn:aws:cloudformation:us-west-2:111122223333:stack/my-stack/guid".to_string(),
        request_id: "req-1".to_string(),
        logical_resource_id: "Resource1".to_string(),
        physical_resource_id: None,
        resource_properties: properties,
    }
}

pub fn cluster_with_status(name: &str, status: &str) -> ClusterDescription {
    ClusterDescription {
        name: name.to_string(),
        arn: format!("arn:aws:eks:us-west-2:111122223333:cluster/{name}"),
        status: status.to_string(),
        endpoint: Some("https://example.eks.amazonaws.com".to_string()),
        certificate_authority_data: Some("Y2VydGlmaWNhdGU=".to_string()),
        cluster_security_group_id: Some("sg-0123456789abcdef0".to_string()),
    }
}

pub fn active_cluster(name: &str) -> ClusterDescription {
    cluster_with_status(name, "ACTIVE")
}

pub struct MockEks {
    log: CallLog,
    /// Scripted results for successive DescribeCluster calls; None = not found
    pub describe_cluster_results: Mutex<VecDeque<Option<ClusterDescription>>>,
    /// Node group returned by DescribeNodegroup
    pub nodegroup: Mutex<Option<NodeGroupDescription>>,
    /// Payloads seen by CreateCluster
    pub cluster_payloads: Mutex<Vec<ClusterPayload>>,
    /// Payloads seen by CreateNodegroup
    pub nodegroup_payloads: Mutex<Vec<NodeGroupPayload>>,
    /// Requests seen by CreateAccessEntry
    pub access_entries: Mutex<Vec<AccessEntryRequest>>,
}

impl MockEks {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            describe_cluster_results: Mutex::new(VecDeque::new()),
            nodegroup: Mutex::new(None),
            cluster_payloads: Mutex::new(Vec::new()),
            nodegroup_payloads: Mutex::new(Vec::new()),
            access_entries: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: String) {
        self.log.lock().unwrap().push(call);
    }
}

impl EksApi for MockEks {
    async fn describe_cluster(&self, name: &str) -> Result<Option<ClusterDescription>> {
        self.record(format!("describe_cluster:{name}"));
        Ok(self
            .describe_cluster_results
            .lock()
            .unwrap()
            .pop_front()
            .flatten())
    }

    async fn create_cluster(&self, payload: &ClusterPayload) -> Result<()> {
        self.record(format!("create_cluster:{}", payload.name));
        self.cluster_payloads.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn delete_cluster(&self, name: &str) -> Result<()> {
        self.record(format!("delete_cluster:{name}"));
        Ok(())
    }

    async fn describe_nodegroup(
        &self,
        cluster_name: &str,
        nodegroup_name: &str,
    ) -> Result<NodeGroupDescription> {
        self.record(format!("describe_nodegroup:{cluster_name}:{nodegroup_name}"));
        self.nodegroup
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ProviderError::UpstreamApi("no nodegroup configured".to_string()))
    }

    async fn create_nodegroup(&self, payload: &NodeGroupPayload) -> Result<NodeGroupDescription> {
        self.record(format!(
            "create_nodegroup:{}:{}",
            payload.cluster_name, payload.nodegroup_name
        ));
        self.nodegroup_payloads.lock().unwrap().push(payload.clone());
        Ok(NodeGroupDescription {
            arn: format!(
                "arn:aws:eks:us-west-2:111122223333:nodegroup/{}/{}/uuid",
                payload.cluster_name, payload.nodegroup_name
            ),
            node_role: Some(payload.node_role.clone()),
        })
    }

    async fn delete_nodegroup(&self, cluster_name: &str, nodegroup_name: &str) -> Result<()> {
        self.record(format!("delete_nodegroup:{cluster_name}:{nodegroup_name}"));
        Ok(())
    }

    async fn create_access_entry(
        &self,
        request: &AccessEntryRequest,
    ) -> Result<AccessEntryDescription> {
        self.record(format!(
            "create_access_entry:{}:{}",
            request.cluster_name, request.principal_arn
        ));
        self.access_entries.lock().unwrap().push(request.clone());
        Ok(AccessEntryDescription {
            arn: format!(
                "arn:aws:eks:us-west-2:111122223333:access-entry/{}/entry-uuid",
                request.cluster_name
            ),
        })
    }

    async fn associate_access_policy(
        &self,
        cluster_name: &str,
        principal_arn: &str,
        policy_arn: &str,
    ) -> Result<()> {
        self.record(format!(
            "associate_access_policy:{cluster_name}:{principal_arn}:{policy_arn}"
        ));
        Ok(())
    }

    async fn delete_access_entry(&self, cluster_name: &str, principal_arn: &str) -> Result<()> {
        self.record(format!("delete_access_entry:{cluster_name}:{principal_arn}"));
        Ok(())
    }
}

pub struct MockIam {
    log: CallLog,
    /// Instance profiles returned for any role
    pub profiles: Mutex<Vec<String>>,
}

impl MockIam {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            profiles: Mutex::new(Vec::new()),
        }
    }
}

impl IamApi for MockIam {
    async fn instance_profiles_for_role(&self, role_name: &str) -> Result<Vec<String>> {
        self.log
            .lock()
            .unwrap()
            .push(format!("list_instance_profiles:{role_name}"));
        Ok(self.profiles.lock().unwrap().clone())
    }

    async fn remove_role_from_instance_profile(
        &self,
        instance_profile_name: &str,
        role_name: &str,
    ) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("remove_role:{instance_profile_name}:{role_name}"));
        Ok(())
    }
}

pub struct MockStacks {
    log: CallLog,
    /// Stack-level tags returned by DescribeStacks
    pub tags: Mutex<BTreeMap<String, String>>,
}

impl MockStacks {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            tags: Mutex::new(BTreeMap::new()),
        }
    }
}

impl StackApi for MockStacks {
    async fn stack_tags(&self, stack_name: &str) -> Result<BTreeMap<String, String>> {
        self.log
            .lock()
            .unwrap()
            .push(format!("describe_stacks:{stack_name}"));
        Ok(self.tags.lock().unwrap().clone())
    }
}
