//! Plan fixtures for planscope integration tests
//!
//! Canned plans mirror real `EXPLAIN (ANALYZE, FORMAT JSON)` output. Random
//! plans are seeded so failures reproduce.

#![allow(dead_code)]

use planscope::{normalize, PlanHierarchy, RawPlanNode, TreeNode};
use std::sync::Arc;

/// A single `Seq Scan` on `orders`
pub const SEQ_SCAN_PLAN: &str = r#"{
    "Plan": {
        "Node Type": "Seq Scan",
        "Relation Name": "orders",
        "Actual Rows": 1000,
        "Actual Total Time": 12.5,
        "Plans": []
    }
}"#;

/// A `Hash Join` over two scans, in the array shape psql emits
pub const HASH_JOIN_PLAN: &str = r#"[
    {
        "Plan": {
            "Node Type": "Hash Join",
            "Join Type": "Inner",
            "Actual Rows": 100,
            "Actual Total Time": 50,
            "Plans": [
                {
                    "Node Type": "Seq Scan",
                    "Parent Relationship": "Outer",
                    "Relation Name": "orders",
                    "Actual Rows": 500,
                    "Actual Total Time": 10
                },
                {
                    "Node Type": "Seq Scan",
                    "Parent Relationship": "Inner",
                    "Relation Name": "customers",
                    "Actual Rows": 300,
                    "Actual Total Time": 20
                }
            ]
        },
        "Planning Time": 0.2,
        "Execution Time": 50.4
    }
]"#;

/// A four-level plan: Limit -> Sort -> Hash Join -> (Seq Scan, Hash -> Seq Scan)
pub fn deep_plan() -> RawPlanNode {
    RawPlanNode::new("Limit").with_actuals(10.0, 80.0).with_child(
        RawPlanNode::new("Sort").with_actuals(10.0, 79.0).with_child(
            RawPlanNode::new("Hash Join")
                .with_actuals(4000.0, 60.0)
                .with_child(
                    RawPlanNode::new("Seq Scan")
                        .with_relation("orders")
                        .with_actuals(10000.0, 25.0),
                )
                .with_child(
                    RawPlanNode::new("Hash").with_actuals(200.0, 3.0).with_child(
                        RawPlanNode::new("Seq Scan")
                            .with_relation("customers")
                            .with_actuals(200.0, 2.5),
                    ),
                ),
        ),
    )
}

/// Wrap a raw plan in the object document shape
pub fn document(plan: &RawPlanNode) -> String {
    serde_json::json!({ "Plan": plan }).to_string()
}

const OPERATORS: [&str; 8] = [
    "Seq Scan",
    "Index Scan",
    "Hash Join",
    "Nested Loop",
    "Hash",
    "Sort",
    "Aggregate",
    "Materialize",
];

/// Random plan with up to `max_nodes` nodes and at most `max_children` per node
pub fn random_plan(rng: &mut fastrand::Rng, max_nodes: usize, max_children: usize) -> RawPlanNode {
    let mut budget = max_nodes.saturating_sub(1);
    random_node(rng, &mut budget, max_children, 0)
}

fn random_node(
    rng: &mut fastrand::Rng,
    budget: &mut usize,
    max_children: usize,
    depth: usize,
) -> RawPlanNode {
    let operator = OPERATORS[rng.usize(..OPERATORS.len())];
    let mut node = RawPlanNode::new(operator);
    if rng.bool() {
        node = node.with_relation(format!("t{}", rng.u32(..20)));
    }
    if rng.u8(..10) > 0 {
        node.actual_rows = Some(rng.u32(..5000) as f64);
    }
    if rng.u8(..10) > 0 {
        node.actual_total_time = Some((rng.f64() * 100.0 * 100.0).round() / 100.0);
    }

    if depth < 8 {
        let wanted = rng.usize(..=max_children);
        for _ in 0..wanted {
            if *budget == 0 {
                break;
            }
            *budget -= 1;
            node.plans.push(random_node(rng, budget, max_children, depth + 1));
        }
    }
    node
}

/// Normalize a raw plan into a shared tree
pub fn tree(plan: &RawPlanNode) -> Arc<TreeNode> {
    Arc::new(normalize(plan))
}

/// Fully expanded hierarchy for a raw plan
pub fn expanded(plan: &RawPlanNode) -> PlanHierarchy {
    PlanHierarchy::build(tree(plan))
}
