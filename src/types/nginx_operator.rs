// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "operator.example.com", version = "v1alpha1", kind = "NginxOperator")]
#[kube(namespaced)]
#[kube(status = "NginxOperatorStatus")]
#[serde(rename_all = "camelCase")]
pub struct NginxOperatorSpec {
    /// Container port exposed by nginx
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    /// Requested replica count. Not applied, deployments always run the default count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NginxOperatorStatus {
    /// Names of the running nginx pods
    #[serde(default)]
    pub nodes: Vec<String>,
}

impl NginxOperator {
    /// Running pod names from the last reconcile, empty before the first one
    pub fn nodes(&self) -> &[String] {
        self.status.as_ref().map(|s| s.nodes.as_slice()).unwrap_or_default()
    }
}
