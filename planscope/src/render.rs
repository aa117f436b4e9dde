// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Render and interaction payloads
//!
//! The engine does not draw. It hands a [`Scene`] of positioned nodes and
//! links to whatever surface renders them, and answers pointer events with
//! [`DetailPanel`] and [`TooltipEvent`] payloads.

use crate::hierarchy::{NodeId, PlanHierarchy};
use crate::layout::Position;
use serde::Serialize;
use std::collections::HashMap;

/// d3's `schemeCategory10`
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Which side of the marker a label is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSide {
    /// Left of the marker, text anchored at its end; used for nodes with children
    Before,
    /// Right of the marker; used for leaves
    After,
}

/// A visible node ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub id: NodeId,
    /// Canvas coordinates, margin included
    pub position: Position,
    pub label: String,
    pub operation_type: String,
    pub color: &'static str,
    pub label_side: LabelSide,
    /// Has hidden children
    pub collapsed: bool,
}

/// A visible parent-to-child edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLink {
    pub source: NodeId,
    pub target: NodeId,
    pub from: Position,
    pub to: Position,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub links: Vec<SceneLink>,
}

impl Scene {
    /// Build a scene from a laid-out hierarchy.
    ///
    /// Nodes without a position (not yet laid out, or hidden) are skipped.
    pub fn from_hierarchy(
        hierarchy: &PlanHierarchy,
        palette: &OperatorPalette,
        origin: Position,
    ) -> Self {
        let canvas = |p: Position| p.offset(origin.x, origin.y);

        let nodes: Vec<SceneNode> = hierarchy
            .visible_ids()
            .into_iter()
            .filter_map(|id| hierarchy.get(id))
            .filter_map(|node| {
                let position = canvas(node.position?);
                Some(SceneNode {
                    id: node.id,
                    position,
                    label: node.data.label.clone(),
                    operation_type: node.data.operation_type.clone(),
                    color: palette.color(&node.data.operation_type),
                    label_side: if node.children.is_leaf() {
                        LabelSide::After
                    } else {
                        LabelSide::Before
                    },
                    collapsed: node.children.is_collapsed(),
                })
            })
            .collect();

        let links = hierarchy
            .visible_links()
            .into_iter()
            .filter_map(|(source, target)| {
                let from = hierarchy.get(source)?.position?;
                let to = hierarchy.get(target)?.position?;
                Some(SceneLink {
                    source,
                    target,
                    from: canvas(from),
                    to: canvas(to),
                })
            })
            .collect();

        Self { nodes, links }
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Ordinal color scale keyed by operation type
#[derive(Debug, Clone, Default)]
pub struct OperatorPalette {
    assigned: HashMap<String, usize>,
}

impl OperatorPalette {
    /// Assign colors in the order operation types first appear
    pub fn from_types<'a>(types: impl IntoIterator<Item = &'a str>) -> Self {
        let mut assigned = HashMap::new();
        for operation_type in types {
            let next = assigned.len();
            assigned.entry(operation_type.to_string()).or_insert(next);
        }
        Self { assigned }
    }

    /// Color for an operation type; unseen types fall back to the first color
    pub fn color(&self, operation_type: &str) -> &'static str {
        let index = self.assigned.get(operation_type).copied().unwrap_or(0);
        CATEGORY10[index % CATEGORY10.len()]
    }
}

/// Payload for the detail panel on click
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub operation_type: String,
    pub label: String,
    pub detail_text: String,
}

/// Pointer coordinates on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Tooltip instruction for pointer-over and pointer-out
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TooltipEvent {
    Show {
        operation_type: String,
        detail_text: String,
        pointer: PointerPosition,
        /// Where the tooltip box goes, already offset from the pointer
        anchor: PointerPosition,
    },
    Hide,
}
