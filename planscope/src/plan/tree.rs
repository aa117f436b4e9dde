// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Normalized plan tree
//!
//! [`normalize`] converts a [`RawPlanNode`] and its nested plans into a
//! fresh [`TreeNode`] tree. Tree nodes are immutable once built and are
//! shared through `Arc` by the collapse hierarchy and the metrics pass.

use super::raw::RawPlanNode;
use std::sync::Arc;

/// Canonical, display-ready plan node
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Operation type plus the relation name in parentheses, when present
    pub label: String,
    /// Two-line rows/time summary used by the detail panel and tooltip
    pub detail_text: String,
    pub operation_type: String,
    /// Actual total time in milliseconds, 0 when the plan omits it
    pub time: f64,
    /// Actual rows, 0 when the plan omits it
    pub rows: f64,
    /// Child operations; `None` for leaves, never an empty vector
    pub children: Option<Vec<Arc<TreeNode>>>,
}

impl TreeNode {
    /// Whether the underlying plan node has no sub-plans
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Child slice, empty for leaves
    pub fn child_nodes(&self) -> &[Arc<TreeNode>] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// All nodes of this subtree in pre-order, starting with `self`
    pub fn preorder(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            // Reverse so the leftmost child is visited first
            for child in node.child_nodes().iter().rev() {
                stack.push(child.as_ref());
            }
        }
        out
    }
}

/// Convert a raw plan node (and its sub-plans) into a [`TreeNode`]
pub fn normalize(raw: &RawPlanNode) -> TreeNode {
    let label = match &raw.relation_name {
        Some(relation) => format!("{} ({})", raw.node_type, relation),
        None => raw.node_type.clone(),
    };

    // A zero reading is shown the same as a missing one
    let rows_text = raw
        .actual_rows
        .filter(|rows| *rows != 0.0)
        .map(|rows| rows.to_string())
        .unwrap_or_else(|| "?".to_string());
    let time_text = raw
        .actual_total_time
        .filter(|time| *time != 0.0)
        .map(|time| format!("{:.2}ms", time))
        .unwrap_or_else(|| "?".to_string());

    let children: Vec<Arc<TreeNode>> = raw
        .plans
        .iter()
        .map(|child| Arc::new(normalize(child)))
        .collect();

    TreeNode {
        label,
        detail_text: format!("Rows: {}\nTime: {}", rows_text, time_text),
        operation_type: raw.node_type.clone(),
        time: raw.actual_total_time.unwrap_or(0.0),
        rows: raw.actual_rows.unwrap_or(0.0),
        children: if children.is_empty() {
            None
        } else {
            Some(children)
        },
    }
}
