// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by the provider
pub mod env {
    /// Endpoint URL override for the EKS service (required)
    pub const EKS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL_EKS";
}

/// Cluster activation polling configuration
pub mod cluster {
    /// Seconds between DescribeCluster calls while waiting for activation
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Terminal success status
    pub const STATUS_ACTIVE: &str = "ACTIVE";
    /// Terminal failure status
    pub const STATUS_FAILED: &str = "FAILED";
}

/// Access entry type that gets the cluster-admin policy attached
pub const STANDARD_ACCESS_ENTRY: &str = "STANDARD";

/// Managed access policy associated with STANDARD access entries
pub const CLUSTER_ADMIN_POLICY_ARN: &str =
    "arn:aws:eks::aws:cluster-access-policy/AmazonEKSClusterAdminPolicy";
