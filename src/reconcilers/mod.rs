// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes reconcilers that react to watch events.

pub mod deployment;
pub mod nginx_operator;

pub use nginx_operator::{NginxOperatorController, NginxOperatorReconciler};
