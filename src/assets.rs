// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Default nginx deployment template.

use crate::error::{OperatorError, Result};
use k8s_openapi::api::apps::v1::Deployment;
use std::path::PathBuf;

const EMBEDDED_DEPLOYMENT: &str = include_str!("../assets/manifests/nginx_deployment.yaml");

/// Where the default deployment manifest comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// The manifest compiled into the binary
    #[default]
    Embedded,
    /// A YAML manifest on disk
    File(PathBuf),
}

/// Build a fresh default deployment. Every call parses the manifest again,
/// callers are free to mutate the returned value.
pub fn load_default_deployment(source: &TemplateSource) -> Result<Deployment> {
    match source {
        TemplateSource::Embedded => parse_deployment(EMBEDDED_DEPLOYMENT),
        TemplateSource::File(path) => {
            let manifest = std::fs::read_to_string(path).map_err(|e| {
                OperatorError::Template(format!("Failed to read {}: {}", path.display(), e))
            })?;
            parse_deployment(&manifest)
        }
    }
}

fn parse_deployment(manifest: &str) -> Result<Deployment> {
    serde_yaml::from_str(manifest)
        .map_err(|e| OperatorError::Template(format!("Failed to parse deployment: {}", e)))
}
