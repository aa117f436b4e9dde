// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Summary metrics and operator ranking

use crate::plan::TreeNode;
use serde::Serialize;

/// Number of operators kept in the ranking
pub const DEFAULT_TOP_OPERATORS: usize = 5;

/// Number of operators shown in the compact text view
pub const COMPACT_TOP_OPERATORS: usize = 3;

/// One ranked operator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorSummary {
    pub operation_type: String,
    pub time: f64,
}

impl OperatorSummary {
    pub fn new(operation_type: impl Into<String>, time: f64) -> Self {
        Self {
            operation_type: operation_type.into(),
            time,
        }
    }
}

/// Aggregate metrics for a whole plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    /// Root operation's total time, in milliseconds
    pub total_time: f64,
    /// Root operation's row count
    pub rows_returned: f64,
    /// Sum of rows over every node, root included
    pub rows_scanned: f64,
    /// Costliest operators, most expensive first
    pub top_operators: Vec<OperatorSummary>,
}

impl PlanSummary {
    /// The first three ranked operators
    pub fn compact(&self) -> &[OperatorSummary] {
        let end = self.top_operators.len().min(COMPACT_TOP_OPERATORS);
        &self.top_operators[..end]
    }

    /// Total time with two decimals
    pub fn total_time_text(&self) -> String {
        format!("{:.2}", self.total_time)
    }

    /// `"{type}: {time} ms"` lines for the compact view
    pub fn compact_lines(&self) -> Vec<String> {
        self.compact()
            .iter()
            .map(|op| format!("{}: {:.2} ms", op.operation_type, op.time))
            .collect()
    }
}

/// Compute summary metrics over the full plan tree.
///
/// Operators are ranked by time, descending; equal times keep their
/// pre-order position. Repeated operator types stay separate entries.
pub fn summarize(root: &TreeNode, top_n: usize) -> PlanSummary {
    let nodes = root.preorder();

    let rows_scanned: f64 = nodes.iter().map(|node| node.rows).sum();

    let mut ranked: Vec<OperatorSummary> = nodes
        .iter()
        .map(|node| OperatorSummary::new(node.operation_type.clone(), node.time))
        .collect();
    // `sort_by` is stable, which keeps ties in pre-order
    ranked.sort_by(|a, b| b.time.total_cmp(&a.time));
    ranked.truncate(top_n);

    PlanSummary {
        total_time: root.time,
        rows_returned: root.rows,
        rows_scanned,
        top_operators: ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{normalize, RawPlanNode};

    #[test]
    fn test_ties_keep_preorder() {
        let raw = RawPlanNode::new("Append")
            .with_actuals(1.0, 5.0)
            .with_child(RawPlanNode::new("Seq Scan").with_relation("a").with_actuals(1.0, 5.0))
            .with_child(RawPlanNode::new("Index Scan").with_actuals(1.0, 5.0));
        let summary = summarize(&normalize(&raw), DEFAULT_TOP_OPERATORS);

        let order: Vec<&str> = summary
            .top_operators
            .iter()
            .map(|op| op.operation_type.as_str())
            .collect();
        assert_eq!(order, vec!["Append", "Seq Scan", "Index Scan"]);
    }

    #[test]
    fn test_ranking_is_truncated() {
        let mut raw = RawPlanNode::new("Append").with_actuals(0.0, 100.0);
        for i in 0..8 {
            raw = raw
                .with_child(RawPlanNode::new(format!("Scan {}", i)).with_actuals(1.0, i as f64));
        }
        let summary = summarize(&normalize(&raw), DEFAULT_TOP_OPERATORS);

        assert_eq!(summary.top_operators.len(), 5);
        assert_eq!(summary.top_operators[0].operation_type, "Append");
        assert_eq!(summary.top_operators[1].operation_type, "Scan 7");
        assert_eq!(summary.compact().len(), 3);
        assert_eq!(summary.rows_scanned, 8.0);
    }

    #[test]
    fn test_compact_lines() {
        let raw = RawPlanNode::new("Seq Scan").with_actuals(10.0, 1.234);
        let summary = summarize(&normalize(&raw), DEFAULT_TOP_OPERATORS);
        assert_eq!(summary.compact_lines(), vec!["Seq Scan: 1.23 ms".to_string()]);
        assert_eq!(summary.total_time_text(), "1.23");
    }
}
