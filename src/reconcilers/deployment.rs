// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Field overrides applied to the managed nginx deployment.

use crate::constants::{DEFAULT_REPLICAS, RUNNING_PHASE};
use crate::error::{OperatorError, Result};
use crate::kubernetes::ObjectId;
use crate::types::NginxOperator;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use kube::{Resource, ResourceExt};

/// Bring `deployment` in line with `operator`: identity, replicas, port and ownership
pub fn apply_overrides(
    deployment: &mut Deployment,
    operator: &NginxOperator,
    id: &ObjectId,
) -> Result<()> {
    deployment.metadata.namespace = Some(id.namespace.clone());
    deployment.metadata.name = Some(id.name.clone());

    // spec.replicas on the NginxOperator is intentionally not honoured
    let spec = deployment.spec.get_or_insert_with(Default::default);
    spec.replicas = Some(DEFAULT_REPLICAS);

    if let Some(port) = operator.spec.port {
        let container_port = spec
            .template
            .spec
            .as_mut()
            .and_then(|pod| pod.containers.first_mut())
            .and_then(|container| container.ports.as_mut())
            .and_then(|ports| ports.first_mut())
            .ok_or_else(|| OperatorError::MissingContainerPort(id.to_string()))?;
        container_port.container_port = port;
    }

    set_controller_reference(deployment, operator)
}

/// Make `operator` the controlling owner of `deployment`, keeping any other owners.
/// Fails without touching the deployment when another object already controls it.
pub fn set_controller_reference(deployment: &mut Deployment, operator: &NginxOperator) -> Result<()> {
    let owner = operator
        .controller_owner_ref(&())
        .ok_or(OperatorError::MissingObjectKey(".metadata.uid"))?;

    let owners = deployment.metadata.owner_references.get_or_insert_with(Vec::new);
    if let Some(other) = owners
        .iter()
        .find(|o| o.controller == Some(true) && o.uid != owner.uid)
    {
        return Err(OperatorError::AlreadyOwned(
            deployment.metadata.name.clone().unwrap_or_default(),
            format!("{} {}", other.kind, other.name),
        ));
    }

    owners.retain(|o| o.uid != owner.uid);
    owners.push(owner);
    Ok(())
}

/// Label selector string for the pods managed by `deployment`
pub fn pod_selector(deployment: &Deployment) -> Result<String> {
    let labels = deployment
        .spec
        .as_ref()
        .and_then(|spec| spec.selector.match_labels.as_ref())
        .filter(|labels| !labels.is_empty())
        .ok_or_else(|| OperatorError::MissingSelector(deployment.name_any()))?;

    Ok(labels
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(","))
}

/// Names of running pods, in the order given
pub fn running_pod_names(pods: &[Pod]) -> Vec<String> {
    pods.iter()
        .filter(|pod| {
            pod.status
                .as_ref()
                .and_then(|s| s.phase.as_deref())
                .is_some_and(|phase| phase == RUNNING_PHASE)
        })
        .map(|pod| pod.name_any())
        .collect()
}
