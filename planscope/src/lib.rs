// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! planscope - execution plan tree explorer
//!
//! planscope turns a machine-generated execution plan record (the JSON
//! produced by `EXPLAIN (ANALYZE, FORMAT JSON)`) into a navigable tree
//! with a tidy 2D layout, and derives summary metrics from the same plan.
//!
//! # Features
//!
//! - **Normalization**: raw plan nodes become labelled, immutable tree nodes
//! - **Collapse state**: per-node expand/collapse with a one-level initial view
//! - **Tidy layout**: non-overlapping positions recomputed on every toggle
//! - **Metrics**: total time, rows returned/scanned, costliest operators
//! - **Timeline**: bar-chart series for the costliest operators
//!
//! # Usage
//!
//! ```no_run
//! use planscope::PlanViewer;
//!
//! let mut viewer = PlanViewer::default();
//! viewer.load_str(r#"{"Plan": {"Node Type": "Seq Scan", "Plans": []}}"#)
//!     .expect("plan should load");
//!
//! let scene = viewer.scene().expect("plan is loaded");
//! assert_eq!(scene.nodes.len(), 1);
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod layout;
pub mod metrics;
pub mod plan;
pub mod render;
pub mod viewer;

pub use config::ViewerConfig;
pub use error::{LoadError, ViewerError};
pub use hierarchy::{ChildState, HierarchyNode, NodeId, PlanHierarchy, ToggleOutcome};
pub use layout::{Extent, Position, TidyLayout};
pub use metrics::{build_timeline, summarize, OperatorSummary, PlanSummary, Timeline, TimelineBar};
pub use plan::{normalize, PlanDocument, RawPlanNode, TreeNode};
pub use render::{
    DetailPanel, LabelSide, OperatorPalette, PointerPosition, Scene, SceneLink, SceneNode,
    TooltipEvent,
};
pub use viewer::PlanViewer;

/// planscope version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// planscope crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
