// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OperatorError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Write conflict on {0}")]
    Conflict(String),

    #[error("Invalid deployment template: {0}")]
    Template(String),

    #[error("Deployment {0} has no container port to override")]
    MissingContainerPort(String),

    #[error("Deployment {0} has no label selector")]
    MissingSelector(String),

    #[error("Deployment {0} is already controlled by {1}")]
    AlreadyOwned(String, String),

    #[error("Missing object key: {0}")]
    MissingObjectKey(&'static str),
}

pub type Result<T> = std::result::Result<T, OperatorError>;
