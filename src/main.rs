// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nginx_operator::assets::load_default_deployment;
use nginx_operator::config::Config;
use nginx_operator::kubernetes::wait_for_operator_crd;
use nginx_operator::reconcilers::NginxOperatorController;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting nginx operator");

    let config = Config::from_env();
    info!(
        "Configuration loaded: watch_namespace={}, template={:?}",
        config.watch_namespace.as_deref().unwrap_or("<all>"),
        config.template
    );

    // Fail at startup rather than on the first create
    load_default_deployment(&config.template).context("Default deployment template is invalid")?;

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for NginxOperator CRD to become available...");
    wait_for_operator_crd(&client).await?;

    NginxOperatorController::new(client, config).run().await?;

    warn!("Controller stopped");
    Ok(())
}
