//! Tests for the tidy tree layout

#[path = "testutils/mod.rs"]
mod testutils;

use planscope::{Extent, NodeId, PlanHierarchy, Position, TidyLayout};
use std::collections::BTreeMap;
use testutils::plan_fixture::{self, tree};

const EPSILON: f64 = 1e-6;

fn layout() -> TidyLayout {
    TidyLayout::new(Extent::new(840.0, 560.0), 180.0)
}

fn positions(hierarchy: &PlanHierarchy) -> Vec<Option<Position>> {
    hierarchy.iter().map(|node| node.position).collect()
}

/// Check the structural layout properties over the visible nodes
fn assert_tidy(hierarchy: &PlanHierarchy, extent: Extent) {
    let mut rows: BTreeMap<usize, Vec<f64>> = BTreeMap::new();

    for id in hierarchy.visible_ids() {
        let node = hierarchy.get(id).unwrap();
        let position = node.position.expect("visible node has a position");

        assert!((position.x - node.depth as f64 * 180.0).abs() < EPSILON);
        assert!(position.y >= -EPSILON && position.y <= extent.height + EPSILON);
        rows.entry(node.depth).or_default().push(position.y);

        let children = node.children.visible();
        if let (Some(first), Some(last)) = (children.first(), children.last()) {
            let first_y = hierarchy.get(*first).unwrap().position.unwrap().y;
            let last_y = hierarchy.get(*last).unwrap().position.unwrap().y;
            assert!(
                (position.y - (first_y + last_y) / 2.0).abs() < EPSILON,
                "node {} is not centred over its children",
                id
            );
        }
    }

    // Pre-order visits each depth left to right, so positions must increase
    for (depth, ys) in rows {
        for pair in ys.windows(2) {
            assert!(pair[1] - pair[0] > EPSILON, "overlap at depth {}", depth);
        }
    }

    for node in hierarchy.iter() {
        if !hierarchy.is_visible(node.id) {
            assert!(node.position.is_none());
        }
    }
}

#[test]
fn test_layout_is_idempotent() {
    let mut hierarchy = plan_fixture::expanded(&plan_fixture::deep_plan());
    layout().apply(&mut hierarchy);
    let first = positions(&hierarchy);
    layout().apply(&mut hierarchy);
    assert_eq!(positions(&hierarchy), first);
}

#[test]
fn test_random_plans_are_tidy() {
    let mut rng = fastrand::Rng::with_seed(11);
    let extent = Extent::new(840.0, 560.0);
    for _ in 0..30 {
        let raw = plan_fixture::random_plan(&mut rng, 120, 4);
        let mut hierarchy = plan_fixture::expanded(&raw);
        layout().apply(&mut hierarchy);
        assert_tidy(&hierarchy, extent);
    }
}

#[test]
fn test_relayout_after_toggles_is_tidy() {
    let mut rng = fastrand::Rng::with_seed(5);
    let extent = Extent::new(840.0, 560.0);
    let raw = plan_fixture::random_plan(&mut rng, 150, 5);
    let mut hierarchy = PlanHierarchy::with_initial_view(tree(&raw));
    layout().apply(&mut hierarchy);
    assert_tidy(&hierarchy, extent);

    for _ in 0..40 {
        let id = NodeId(rng.usize(..hierarchy.len()));
        hierarchy.toggle(id);
        layout().apply(&mut hierarchy);
        assert_tidy(&hierarchy, extent);
    }
}

#[test]
fn test_layout_fills_sibling_axis() {
    let doc = planscope::PlanDocument::parse(plan_fixture::HASH_JOIN_PLAN).unwrap();
    let mut hierarchy = PlanHierarchy::build(tree(doc.plan()));
    layout().apply(&mut hierarchy);

    let left = hierarchy.get(NodeId(1)).unwrap().position.unwrap();
    let right = hierarchy.get(NodeId(2)).unwrap().position.unwrap();
    // Half a unit of padding on each side of a two-unit span
    assert!((left.y - 140.0).abs() < EPSILON);
    assert!((right.y - 420.0).abs() < EPSILON);
    assert!((hierarchy.root().position.unwrap().y - 280.0).abs() < EPSILON);
}

#[test]
fn test_collapsing_redistributes_space() {
    let mut hierarchy = plan_fixture::expanded(&plan_fixture::deep_plan());
    layout().apply(&mut hierarchy);
    let expanded_root = hierarchy.root().position.unwrap();

    hierarchy.toggle(NodeId(2));
    layout().apply(&mut hierarchy);

    // Limit -> Sort -> Hash Join is a chain, centred on the sibling axis
    assert_eq!(hierarchy.visible_ids().len(), 3);
    for id in hierarchy.visible_ids() {
        assert!((hierarchy.get(id).unwrap().position.unwrap().y - 280.0).abs() < EPSILON);
    }
    assert_eq!(expanded_root.x, 0.0);
}
