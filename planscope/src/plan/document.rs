// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plan document loading
//!
//! An `EXPLAIN (FORMAT JSON)` output is either an object carrying a `Plan`
//! field or an array whose first element carries one. The document keeps
//! the original JSON value untouched so it can be handed back verbatim to
//! an export collaborator.

use super::raw::RawPlanNode;
use crate::error::LoadError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

const PLAN_KEY: &str = "Plan";

/// A parsed plan record together with its original source value
#[derive(Debug, Clone)]
pub struct PlanDocument {
    source: Value,
    plan: RawPlanNode,
    loaded_at: DateTime<Utc>,
}

impl PlanDocument {
    /// Parse plan text
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let source: Value = serde_json::from_str(text)?;
        Self::from_value(source)
    }

    /// Build a document from an already-parsed JSON value
    pub fn from_value(source: Value) -> Result<Self, LoadError> {
        let plan_value = locate_plan(&source).ok_or(LoadError::MissingPlan)?;
        let plan = RawPlanNode::deserialize(plan_value)
            .map_err(|e| LoadError::InvalidPlan(e.to_string()))?;

        Ok(Self {
            source,
            plan,
            loaded_at: Utc::now(),
        })
    }

    /// The root raw plan node
    pub fn plan(&self) -> &RawPlanNode {
        &self.plan
    }

    /// The original, unmodified record
    pub fn source(&self) -> &Value {
        &self.source
    }

    /// When the document was loaded
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Pretty-printed original record, as handed to export collaborators
    pub fn to_pretty_json(&self) -> String {
        // Serializing a `Value` cannot fail
        serde_json::to_string_pretty(&self.source).unwrap_or_default()
    }
}

/// Find the `Plan` value in either accepted document shape
fn locate_plan(source: &Value) -> Option<&Value> {
    let from_object = source.get(PLAN_KEY).filter(|plan| !plan.is_null());
    from_object.or_else(|| {
        source
            .as_array()
            .and_then(|items| items.first())
            .and_then(|first| first.get(PLAN_KEY))
            .filter(|plan| !plan.is_null())
    })
}
