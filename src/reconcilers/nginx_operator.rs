// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! NginxOperator reconciler - keeps the nginx deployment in line with the
//! NginxOperator resource and reports running pods on its status.

use crate::assets::{load_default_deployment, TemplateSource};
use crate::config::Config;
use crate::constants::{ERROR_REQUEUE_SECS, STATUS_UPDATE_ATTEMPTS};
use crate::error::{OperatorError, Result};
use crate::kubernetes::{KubeStore, ObjectId, ObjectStore};
use crate::reconcilers::deployment::{apply_overrides, pod_selector, running_pod_names};
use crate::types::{NginxOperator, NginxOperatorStatus};
use futures::StreamExt;
use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    runtime::{controller::Action, Controller},
    Api, Client,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Runs one reconcile pass per NginxOperator identity against an [`ObjectStore`]
pub struct NginxOperatorReconciler<S> {
    store: S,
    template: TemplateSource,
}

impl<S: ObjectStore> NginxOperatorReconciler<S> {
    pub fn new(store: S, template: TemplateSource) -> Self {
        Self { store, template }
    }

    /// Reconcile the NginxOperator identified by `id`.
    ///
    /// A missing NginxOperator is not an error: it was deleted and its
    /// deployment is left to garbage collection.
    #[instrument(skip(self), fields(object = %id))]
    pub async fn reconcile(&self, id: &ObjectId) -> Result<()> {
        let Some(operator) = self.store.get_operator(id).await? else {
            info!("NginxOperator {} not found, nothing to reconcile", id);
            return Ok(());
        };

        let (mut deployment, create) = match self.store.get_deployment(id).await {
            Ok(Some(existing)) => (existing, false),
            Ok(None) => (load_default_deployment(&self.template)?, true),
            Err(e) => {
                error!("Error getting existing nginx deployment {}: {}", id, e);
                return Err(e);
            }
        };

        apply_overrides(&mut deployment, &operator, id)?;

        let deployment = if create {
            info!("Creating nginx deployment {}", id);
            self.store.create_deployment(&deployment).await?
        } else {
            debug!("Updating nginx deployment {}", id);
            self.store.replace_deployment(&deployment).await?
        };

        let nodes = self.running_nodes(&deployment, id).await?;
        self.update_status(operator, nodes).await
    }

    async fn running_nodes(&self, deployment: &Deployment, id: &ObjectId) -> Result<Vec<String>> {
        let selector = pod_selector(deployment)?;
        let pods = self
            .store
            .list_pods(&id.namespace, &selector)
            .await
            .inspect_err(|e| error!("Error listing pods for {}: {}", id, e))?;

        let nodes = running_pod_names(&pods);
        debug!("{} of {} pods running for {}", nodes.len(), pods.len(), id);
        Ok(nodes)
    }

    /// Replace the status nodes, re-reading the NginxOperator when another
    /// writer got there first
    async fn update_status(&self, mut operator: NginxOperator, nodes: Vec<String>) -> Result<()> {
        let id = ObjectId::of(&operator)?;
        let mut attempt = 1;

        loop {
            operator.status = Some(NginxOperatorStatus {
                nodes: nodes.clone(),
            });

            match self.store.update_operator_status(&operator).await {
                Ok(_) => return Ok(()),
                Err(OperatorError::Conflict(what)) if attempt < STATUS_UPDATE_ATTEMPTS => {
                    warn!(
                        "Conflict updating status of {} (attempt {}/{}), retrying",
                        what, attempt, STATUS_UPDATE_ATTEMPTS
                    );
                    let Some(latest) = self.store.get_operator(&id).await? else {
                        info!("NginxOperator {} deleted while updating status", id);
                        return Ok(());
                    };
                    operator = latest;
                    attempt += 1;
                }
                Err(e) => {
                    error!("Error updating NginxOperator status for {}: {}", id, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Wires [`NginxOperatorReconciler`] into a kube-runtime controller watching
/// NginxOperators and the deployments they own
pub struct NginxOperatorController {
    client: Client,
    config: Config,
}

impl NginxOperatorController {
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let (operators, deployments): (Api<NginxOperator>, Api<Deployment>) =
            match &self.config.watch_namespace {
                Some(ns) => (
                    Api::namespaced(self.client.clone(), ns),
                    Api::namespaced(self.client.clone(), ns),
                ),
                None => (Api::all(self.client.clone()), Api::all(self.client.clone())),
            };

        let reconciler = NginxOperatorReconciler::new(
            KubeStore::new(self.client.clone()),
            self.config.template.clone(),
        );
        let context = Arc::new(reconciler);

        Controller::new(operators, WatcherConfig::default())
            .owns(deployments, WatcherConfig::default())
            .shutdown_on_signal()
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled nginxoperator: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

async fn reconcile(
    operator: Arc<NginxOperator>,
    ctx: Arc<NginxOperatorReconciler<KubeStore>>,
) -> Result<Action> {
    let id = ObjectId::of(&*operator)?;
    ctx.reconcile(&id).await?;

    // Changes to the NginxOperator or its deployment trigger the next pass
    Ok(Action::await_change())
}

fn error_policy(
    _operator: Arc<NginxOperator>,
    error: &OperatorError,
    _ctx: Arc<NginxOperatorReconciler<KubeStore>>,
) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(Duration::from_secs(ERROR_REQUEUE_SECS))
}
