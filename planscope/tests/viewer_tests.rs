//! Tests for the PlanViewer facade: loading, interaction and rendering payloads

#[path = "testutils/mod.rs"]
mod testutils;

use planscope::{
    LabelSide, LoadError, NodeId, PlanViewer, PointerPosition, Position, TooltipEvent,
    ViewerConfig, ViewerError,
};
use testutils::plan_fixture::{self, HASH_JOIN_PLAN, SEQ_SCAN_PLAN};

fn loaded_viewer(text: &str) -> PlanViewer {
    let mut viewer = PlanViewer::default();
    viewer.load_str(text).expect("plan should load");
    viewer
}

#[test]
fn test_requests_before_load() {
    let mut viewer = PlanViewer::default();
    assert_eq!(viewer.scene().unwrap_err(), ViewerError::NoPlanLoaded);
    assert_eq!(viewer.click(NodeId::ROOT).unwrap_err(), ViewerError::NoPlanLoaded);
    assert!(viewer.export().is_err());
}

#[test]
fn test_failed_load_keeps_previous_plan() {
    let mut viewer = loaded_viewer(HASH_JOIN_PLAN);
    viewer.click(NodeId::ROOT).unwrap();
    let scene_before = viewer.scene().unwrap();
    let summary_before = viewer.summary().unwrap().clone();

    assert_eq!(
        viewer.load_str(r#"{"foo": 1}"#).unwrap_err(),
        LoadError::MissingPlan
    );
    assert!(matches!(
        viewer.load_str("{\"Plan\": ").unwrap_err(),
        LoadError::Parse(_)
    ));

    assert_eq!(viewer.scene().unwrap(), scene_before);
    assert_eq!(viewer.summary().unwrap(), &summary_before);
}

#[test]
fn test_failed_first_load_leaves_viewer_empty() {
    let mut viewer = PlanViewer::default();
    assert!(viewer.load_str(r#"{"foo": 1}"#).is_err());
    assert!(!viewer.is_loaded());
}

#[test]
fn test_single_node_scene() {
    let viewer = loaded_viewer(SEQ_SCAN_PLAN);
    let scene = viewer.scene().unwrap();

    assert_eq!(scene.nodes.len(), 1);
    assert!(scene.links.is_empty());
    let node = &scene.nodes[0];
    assert_eq!(node.label, "Seq Scan (orders)");
    assert_eq!(node.label_side, LabelSide::After);
    // Canvas margin: left 100, top 20; inner height 560
    assert_eq!(node.position, Position::new(100.0, 300.0));
}

#[test]
fn test_click_toggles_and_returns_details() {
    let mut viewer = loaded_viewer(&plan_fixture::document(&plan_fixture::deep_plan()));
    assert_eq!(viewer.scene().unwrap().nodes.len(), 2);

    let details = viewer.click(NodeId(1)).unwrap();
    assert_eq!(details.operation_type, "Sort");
    assert_eq!(details.label, "Sort");
    assert_eq!(details.detail_text, "Rows: 10\nTime: 79.00ms");

    let scene = viewer.scene().unwrap();
    assert_eq!(scene.nodes.len(), 3);
    assert_eq!(scene.links.len(), 2);
    let join = scene.node(NodeId(2)).unwrap();
    assert!(join.collapsed);
    assert_eq!(join.label_side, LabelSide::Before);

    viewer.click(NodeId(1)).unwrap();
    assert_eq!(viewer.scene().unwrap().nodes.len(), 2);
}

#[test]
fn test_click_on_leaf_still_reports_details() {
    let mut viewer = loaded_viewer(HASH_JOIN_PLAN);
    let before = viewer.scene().unwrap();
    let details = viewer.click(NodeId(2)).unwrap();
    assert_eq!(details.label, "Seq Scan (customers)");
    assert_eq!(viewer.scene().unwrap(), before);
}

#[test]
fn test_unknown_node() {
    let mut viewer = loaded_viewer(HASH_JOIN_PLAN);
    assert_eq!(viewer.click(NodeId(17)).unwrap_err(), ViewerError::UnknownNode(17));
    assert!(viewer.hover(NodeId(17), PointerPosition::new(0.0, 0.0)).is_err());
}

#[test]
fn test_metrics_ignore_collapse_state() {
    let mut rng = fastrand::Rng::with_seed(21);
    for _ in 0..10 {
        let raw = plan_fixture::random_plan(&mut rng, 60, 4);
        let mut viewer = loaded_viewer(&plan_fixture::document(&raw));
        let summary = viewer.summary().unwrap().clone();
        let timeline = viewer.timeline().unwrap();
        let len = viewer.hierarchy().unwrap().len();

        for _ in 0..25 {
            let id = NodeId(rng.usize(..len));
            if rng.bool() {
                viewer.click(id).unwrap();
            } else {
                viewer.collapse_all(id).unwrap();
            }
        }
        viewer.expand_all(NodeId::ROOT).unwrap();

        assert_eq!(viewer.summary().unwrap(), &summary);
        assert_eq!(viewer.timeline().unwrap(), timeline);
    }
}

#[test]
fn test_hover_payloads() {
    let viewer = loaded_viewer(HASH_JOIN_PLAN);
    let event = viewer
        .hover(NodeId(1), PointerPosition::new(300.0, 200.0))
        .unwrap();

    assert_eq!(
        event,
        TooltipEvent::Show {
            operation_type: "Seq Scan".to_string(),
            detail_text: "Rows: 500\nTime: 10.00ms".to_string(),
            pointer: PointerPosition::new(300.0, 200.0),
            anchor: PointerPosition::new(310.0, 172.0),
        }
    );
    assert_eq!(viewer.hover_out(), TooltipEvent::Hide);
}

#[test]
fn test_export_returns_original_record() {
    let viewer = loaded_viewer(HASH_JOIN_PLAN);
    let original: serde_json::Value = serde_json::from_str(HASH_JOIN_PLAN).unwrap();
    assert_eq!(viewer.export().unwrap(), &original);
    assert_eq!(viewer.export().unwrap()[0]["Execution Time"], 50.4);

    let written: serde_json::Value =
        serde_json::from_str(&viewer.export_json().unwrap()).unwrap();
    assert_eq!(written, original);
}

#[test]
fn test_load_timestamp() {
    let before = chrono::Utc::now();
    let viewer = loaded_viewer(SEQ_SCAN_PLAN);
    let loaded_at = viewer.loaded_at().unwrap();
    assert!(loaded_at >= before);
    assert!(loaded_at <= chrono::Utc::now());
}

#[test]
fn test_reload_discards_previous_state() {
    let mut viewer = loaded_viewer(&plan_fixture::document(&plan_fixture::deep_plan()));
    viewer.expand_all(NodeId::ROOT).unwrap();
    assert_eq!(viewer.scene().unwrap().nodes.len(), 6);

    viewer.load_str(HASH_JOIN_PLAN).unwrap();
    assert_eq!(viewer.hierarchy().unwrap().len(), 3);
    assert_eq!(viewer.summary().unwrap().rows_scanned, 900.0);
}

#[test]
fn test_custom_config() {
    let config = ViewerConfig::from_json_str(
        r#"{"canvas": {"width": 500, "height": 240, "margin": {"top": 0, "right": 0, "bottom": 0, "left": 0}},
            "depth_spacing": 50, "top_operators": 2, "timeline": {"width": 120, "margin": {"left": 20}}}"#,
    )
    .unwrap();
    let mut viewer = PlanViewer::new(config);
    viewer.load_str(HASH_JOIN_PLAN).unwrap();
    viewer.click(NodeId::ROOT).unwrap();
    viewer.click(NodeId::ROOT).unwrap();

    let scene = viewer.scene().unwrap();
    assert_eq!(scene.node(NodeId(1)).unwrap().position, Position::new(50.0, 60.0));
    assert_eq!(scene.node(NodeId(2)).unwrap().position, Position::new(50.0, 180.0));

    assert_eq!(viewer.summary().unwrap().top_operators.len(), 2);
    let bars = viewer.timeline().unwrap();
    assert_eq!(bars.bars()[0].length, 100.0);
}
