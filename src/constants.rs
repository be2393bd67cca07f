// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The operator name used as field manager on writes
pub const OPERATOR_NAME: &str = "nginx-operator";

/// Replica count forced onto every managed deployment
pub const DEFAULT_REPLICAS: i32 = 5;

/// Pod phase counted as an active node
pub const RUNNING_PHASE: &str = "Running";

/// Attempts at writing the NginxOperator status before giving up on conflicts
pub const STATUS_UPDATE_ATTEMPTS: usize = 3;

/// Seconds before a failed reconcile is retried by the controller
pub const ERROR_REQUEUE_SECS: u64 = 60;

/// CRD polling configuration
pub mod crd {
    /// API group served by the NginxOperator CRD
    pub const GROUP: &str = "operator.example.com";
    pub const VERSION: &str = "v1alpha1";
    pub const KIND: &str = "NginxOperator";
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
