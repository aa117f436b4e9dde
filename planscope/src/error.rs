// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for plan loading and viewer interaction

use thiserror::Error;

/// Errors raised while turning raw text into a loaded plan.
///
/// A load error never mutates viewer state: the previously loaded plan,
/// its collapse state and its layout remain exactly as they were.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Error parsing plan JSON: {0}")]
    Parse(String),

    #[error("Invalid plan format: expected a top-level \"Plan\" field or an array whose first element has one")]
    MissingPlan,

    #[error("Invalid plan node: {0}")]
    InvalidPlan(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(error: serde_json::Error) -> Self {
        LoadError::Parse(error.to_string())
    }
}

/// Errors raised by interaction requests against a loaded plan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("No plan loaded yet")]
    NoPlanLoaded,

    #[error("Unknown node id: {0}")]
    UnknownNode(usize),
}
