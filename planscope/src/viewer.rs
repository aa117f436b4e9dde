// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plan Viewer - the engine facade
//!
//! [`PlanViewer`] owns the currently loaded plan and wires the components
//! together:
//! - loading: parse, normalize, build the initial hierarchy, lay it out,
//!   compute metrics
//! - clicks: toggle a node, re-run the full layout, answer with the
//!   detail panel payload
//! - hovers: answer with tooltip show/hide payloads
//!
//! Every operation is synchronous. A failed load leaves the previous plan
//! untouched; a successful load replaces all hierarchy and layout state.

use crate::config::ViewerConfig;
use crate::error::{LoadError, ViewerError};
use crate::hierarchy::{HierarchyNode, NodeId, PlanHierarchy, ToggleOutcome};
use crate::layout::Position;
use crate::metrics::{build_timeline, summarize, PlanSummary, Timeline};
use crate::plan::{normalize, PlanDocument, TreeNode};
use crate::render::{DetailPanel, OperatorPalette, PointerPosition, Scene, TooltipEvent};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

/// State for one loaded plan
#[derive(Debug, Clone)]
struct LoadedPlan {
    document: PlanDocument,
    tree: Arc<TreeNode>,
    hierarchy: PlanHierarchy,
    summary: PlanSummary,
    palette: OperatorPalette,
}

/// Interactive plan viewer
#[derive(Debug, Clone, Default)]
pub struct PlanViewer {
    config: ViewerConfig,
    loaded: Option<LoadedPlan>,
}

impl PlanViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            loaded: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Load plan text, replacing any previously loaded plan
    pub fn load_str(&mut self, text: &str) -> Result<&PlanSummary, LoadError> {
        let document = PlanDocument::parse(text).map_err(|e| {
            log::warn!("Rejected plan: {}", e);
            e
        })?;
        Ok(self.install(document))
    }

    /// Load an already-parsed plan record, replacing any previously loaded plan
    pub fn load_value(&mut self, value: Value) -> Result<&PlanSummary, LoadError> {
        let document = PlanDocument::from_value(value).map_err(|e| {
            log::warn!("Rejected plan: {}", e);
            e
        })?;
        Ok(self.install(document))
    }

    fn install(&mut self, document: PlanDocument) -> &PlanSummary {
        let tree = Arc::new(normalize(document.plan()));
        let mut hierarchy = PlanHierarchy::with_initial_view(tree.clone());
        self.config.layout().apply(&mut hierarchy);

        let summary = summarize(&tree, self.config.top_operators);
        let palette =
            OperatorPalette::from_types(tree.preorder().iter().map(|n| n.operation_type.as_str()));

        log::info!(
            "Loaded plan rooted at '{}' with {} nodes ({} visible)",
            tree.label,
            hierarchy.len(),
            hierarchy.visible_ids().len()
        );

        let loaded = self.loaded.insert(LoadedPlan {
            document,
            tree,
            hierarchy,
            summary,
            palette,
        });
        &loaded.summary
    }

    fn loaded(&self) -> Result<&LoadedPlan, ViewerError> {
        self.loaded.as_ref().ok_or(ViewerError::NoPlanLoaded)
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedPlan, ViewerError> {
        self.loaded.as_mut().ok_or(ViewerError::NoPlanLoaded)
    }

    /// Handle a click: toggle the node, re-lay out, and return its details
    pub fn click(&mut self, id: NodeId) -> Result<DetailPanel, ViewerError> {
        let layout = self.config.layout();
        let loaded = self.loaded_mut()?;
        if !loaded.hierarchy.contains(id) {
            return Err(ViewerError::UnknownNode(id.index()));
        }

        if loaded.hierarchy.toggle(id) != ToggleOutcome::Unchanged {
            layout.apply(&mut loaded.hierarchy);
        }

        let data = &loaded.hierarchy.get(id).ok_or(ViewerError::UnknownNode(id.index()))?.data;
        Ok(DetailPanel {
            operation_type: data.operation_type.clone(),
            label: data.label.clone(),
            detail_text: data.detail_text.clone(),
        })
    }

    /// Collapse a node and everything below it, then re-lay out
    pub fn collapse_all(&mut self, id: NodeId) -> Result<(), ViewerError> {
        let layout = self.config.layout();
        let loaded = self.loaded_mut()?;
        if !loaded.hierarchy.contains(id) {
            return Err(ViewerError::UnknownNode(id.index()));
        }
        loaded.hierarchy.collapse_all(id);
        layout.apply(&mut loaded.hierarchy);
        Ok(())
    }

    /// Expand a node and everything below it, then re-lay out
    pub fn expand_all(&mut self, id: NodeId) -> Result<(), ViewerError> {
        let layout = self.config.layout();
        let loaded = self.loaded_mut()?;
        if !loaded.hierarchy.contains(id) {
            return Err(ViewerError::UnknownNode(id.index()));
        }
        loaded.hierarchy.expand_all(id);
        layout.apply(&mut loaded.hierarchy);
        Ok(())
    }

    /// Handle pointer-over on a node
    pub fn hover(&self, id: NodeId, pointer: PointerPosition) -> Result<TooltipEvent, ViewerError> {
        let node = self.node(id)?;
        let (dx, dy) = self.config.tooltip_offset;
        Ok(TooltipEvent::Show {
            operation_type: node.data.operation_type.clone(),
            detail_text: node.data.detail_text.clone(),
            pointer,
            anchor: PointerPosition::new(pointer.x + dx, pointer.y + dy),
        })
    }

    /// Handle pointer-out
    pub fn hover_out(&self) -> TooltipEvent {
        TooltipEvent::Hide
    }

    /// Look up a node of the current hierarchy
    pub fn node(&self, id: NodeId) -> Result<&HierarchyNode, ViewerError> {
        self.loaded()?
            .hierarchy
            .get(id)
            .ok_or(ViewerError::UnknownNode(id.index()))
    }

    pub fn hierarchy(&self) -> Result<&PlanHierarchy, ViewerError> {
        Ok(&self.loaded()?.hierarchy)
    }

    /// The normalized full tree
    pub fn tree(&self) -> Result<&Arc<TreeNode>, ViewerError> {
        Ok(&self.loaded()?.tree)
    }

    /// Positioned nodes and links for the renderer, in canvas coordinates
    pub fn scene(&self) -> Result<Scene, ViewerError> {
        let loaded = self.loaded()?;
        let margin = self.config.canvas.margin;
        Ok(Scene::from_hierarchy(
            &loaded.hierarchy,
            &loaded.palette,
            Position::new(margin.left, margin.top),
        ))
    }

    /// Metrics over the full plan; unaffected by collapse state
    pub fn summary(&self) -> Result<&PlanSummary, ViewerError> {
        Ok(&self.loaded()?.summary)
    }

    /// Timeline series for the ranked operators
    pub fn timeline(&self) -> Result<Timeline, ViewerError> {
        let summary = self.summary()?;
        Ok(build_timeline(
            &summary.top_operators,
            self.config.timeline.chart_width(),
        ))
    }

    /// The original plan record, unmodified, for export
    pub fn export(&self) -> Result<&Value, ViewerError> {
        Ok(self.loaded()?.document.source())
    }

    /// The original plan record as pretty-printed JSON
    pub fn export_json(&self) -> Result<String, ViewerError> {
        Ok(self.loaded()?.document.to_pretty_json())
    }

    /// When the current plan was loaded
    pub fn loaded_at(&self) -> Result<DateTime<Utc>, ViewerError> {
        Ok(self.loaded()?.document.loaded_at())
    }
}
