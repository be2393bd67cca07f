// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::assets::TemplateSource;
use std::env;
use std::path::PathBuf;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Namespace to watch, all namespaces when unset
    pub watch_namespace: Option<String>,
    /// Where the default nginx deployment is loaded from
    pub template: TemplateSource,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("WATCH_NAMESPACE").ok(),
            env::var("DEPLOYMENT_TEMPLATE_PATH").ok(),
        )
    }

    fn from_vars(watch_namespace: Option<String>, template_path: Option<String>) -> Self {
        let watch_namespace = watch_namespace.filter(|ns| !ns.trim().is_empty());
        let template = template_path
            .filter(|p| !p.trim().is_empty())
            .map(|p| TemplateSource::File(PathBuf::from(p)))
            .unwrap_or_default();

        Config {
            watch_namespace,
            template,
        }
    }
}
