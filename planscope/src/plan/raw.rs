// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Raw plan node model

use serde::{Deserialize, Deserializer, Serialize};

/// One node of a raw execution plan as emitted by `EXPLAIN (FORMAT JSON)`.
///
/// Only the fields the explorer uses are modelled; every other key the
/// producer emits is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlanNode {
    #[serde(rename = "Node Type", default)]
    pub node_type: String,

    #[serde(
        rename = "Relation Name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub relation_name: Option<String>,

    #[serde(rename = "Actual Rows", default, skip_serializing_if = "Option::is_none")]
    pub actual_rows: Option<f64>,

    #[serde(
        rename = "Actual Total Time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_total_time: Option<f64>,

    #[serde(rename = "Plans", default, deserialize_with = "null_as_empty")]
    pub plans: Vec<RawPlanNode>,
}

/// `"Plans": null` is read as no sub-plans
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawPlanNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawPlanNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawPlanNode {
    /// Create a node with only an operation type set
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            relation_name: None,
            actual_rows: None,
            actual_total_time: None,
            plans: Vec::new(),
        }
    }

    /// Set the relation the node reads from
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation_name = Some(relation.into());
        self
    }

    /// Set the actual row count and total time
    pub fn with_actuals(mut self, rows: f64, total_time: f64) -> Self {
        self.actual_rows = Some(rows);
        self.actual_total_time = Some(total_time);
        self
    }

    /// Append a child plan
    pub fn with_child(mut self, child: RawPlanNode) -> Self {
        self.plans.push(child);
        self
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self.plans.iter().map(RawPlanNode::node_count).sum::<usize>()
    }
}
