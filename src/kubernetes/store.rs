// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object store used by the reconciler, backed by the Kubernetes API.

use crate::constants::OPERATOR_NAME;
use crate::error::{OperatorError, Result};
use crate::types::NginxOperator;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use kube::{
    api::{ListParams, Patch, PatchParams, PostParams},
    Api, Client, Resource, ResourceExt,
};
use serde_json::json;
use std::fmt;
use tracing::{debug, instrument};

/// Namespace and name of an object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub namespace: String,
    pub name: String,
}

impl ObjectId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Identity of a namespaced resource
    pub fn of<K: Resource>(resource: &K) -> Result<Self> {
        let namespace = resource
            .namespace()
            .ok_or(OperatorError::MissingObjectKey(".metadata.namespace"))?;
        let name = resource
            .meta()
            .name
            .clone()
            .ok_or(OperatorError::MissingObjectKey(".metadata.name"))?;
        Ok(Self { namespace, name })
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Reads and writes performed by a reconcile pass.
///
/// Lookups return `Ok(None)` when the object does not exist. Writes rejected
/// because of a stale resourceVersion fail with [`OperatorError::Conflict`].
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_operator(&self, id: &ObjectId) -> Result<Option<NginxOperator>>;

    async fn get_deployment(&self, id: &ObjectId) -> Result<Option<Deployment>>;

    async fn create_deployment(&self, deployment: &Deployment) -> Result<Deployment>;

    /// Replace the whole deployment object
    async fn replace_deployment(&self, deployment: &Deployment) -> Result<Deployment>;

    /// List pods in `namespace` matching a `key=value,...` label selector
    async fn list_pods(&self, namespace: &str, label_selector: &str) -> Result<Vec<Pod>>;

    /// Write the status of `operator`, guarded by its resourceVersion
    async fn update_operator_status(&self, operator: &NginxOperator) -> Result<NginxOperator>;
}

/// [`ObjectStore`] talking to the Kubernetes API server
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn operators(&self, namespace: &str) -> Api<NginxOperator> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

fn post_params() -> PostParams {
    PostParams {
        field_manager: Some(OPERATOR_NAME.to_string()),
        ..Default::default()
    }
}

/// Map a 409 from the API server to [`OperatorError::Conflict`]
fn conflict_aware(err: kube::Error, what: impl FnOnce() -> String) -> OperatorError {
    match err {
        kube::Error::Api(ref resp) if resp.code == 409 => OperatorError::Conflict(what()),
        e => OperatorError::KubeError(e),
    }
}

fn deployment_id(deployment: &Deployment) -> Result<ObjectId> {
    ObjectId::of(deployment)
}

#[async_trait]
impl ObjectStore for KubeStore {
    #[instrument(skip(self), fields(object = %id))]
    async fn get_operator(&self, id: &ObjectId) -> Result<Option<NginxOperator>> {
        Ok(self.operators(&id.namespace).get_opt(&id.name).await?)
    }

    #[instrument(skip(self), fields(object = %id))]
    async fn get_deployment(&self, id: &ObjectId) -> Result<Option<Deployment>> {
        Ok(self.deployments(&id.namespace).get_opt(&id.name).await?)
    }

    #[instrument(skip(self, deployment), fields(object = %deployment.name_any()))]
    async fn create_deployment(&self, deployment: &Deployment) -> Result<Deployment> {
        let id = deployment_id(deployment)?;
        debug!("Creating deployment {}", id);
        self.deployments(&id.namespace)
            .create(&post_params(), deployment)
            .await
            .map_err(|e| conflict_aware(e, || format!("deployment {}", id)))
    }

    #[instrument(skip(self, deployment), fields(object = %deployment.name_any()))]
    async fn replace_deployment(&self, deployment: &Deployment) -> Result<Deployment> {
        let id = deployment_id(deployment)?;
        debug!("Replacing deployment {}", id);
        self.deployments(&id.namespace)
            .replace(&id.name, &post_params(), deployment)
            .await
            .map_err(|e| conflict_aware(e, || format!("deployment {}", id)))
    }

    #[instrument(skip(self))]
    async fn list_pods(&self, namespace: &str, label_selector: &str) -> Result<Vec<Pod>> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let pod_list = pods
            .list(&ListParams::default().labels(label_selector))
            .await?;
        Ok(pod_list.items)
    }

    #[instrument(skip(self, operator), fields(object = %operator.name_any()))]
    async fn update_operator_status(&self, operator: &NginxOperator) -> Result<NginxOperator> {
        let id = ObjectId::of(operator)?;
        // The resourceVersion makes the API server reject writes based on a stale read
        let patch = json!({
            "metadata": { "resourceVersion": operator.resource_version() },
            "status": operator.status,
        });
        let pp = PatchParams {
            field_manager: Some(OPERATOR_NAME.to_string()),
            ..Default::default()
        };
        self.operators(&id.namespace)
            .patch_status(&id.name, &pp, &Patch::Merge(&patch))
            .await
            .map_err(|e| conflict_aware(e, || format!("nginxoperator {}", id)))
    }
}
