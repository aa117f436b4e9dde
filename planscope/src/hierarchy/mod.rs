// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Collapsible plan hierarchy
//!
//! A [`PlanHierarchy`] is an arena of [`HierarchyNode`]s built once per
//! loaded plan. Each node shares its [`TreeNode`] through an `Arc` and
//! records whether its children are currently shown or hidden in a
//! [`ChildState`]. Parents are referenced by [`NodeId`] only; the arena owns
//! every node, so the back-reference never affects lifetimes.
//!
//! Node ids are assigned in pre-order over the full plan tree, which makes
//! them stable for the lifetime of the hierarchy regardless of collapse
//! state.

pub mod collapse;

pub use collapse::ToggleOutcome;

use crate::layout::Position;
use crate::plan::TreeNode;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Index of a node inside a [`PlanHierarchy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root of every hierarchy
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visibility of a node's children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildState {
    /// The underlying plan node has no children
    Leaf,
    /// Children are rendered and laid out
    Expanded(Vec<NodeId>),
    /// Children are kept aside and skipped by layout and rendering
    Collapsed(Vec<NodeId>),
}

impl ChildState {
    /// Children currently shown, empty when collapsed or a leaf
    pub fn visible(&self) -> &[NodeId] {
        match self {
            ChildState::Expanded(children) => children,
            _ => &[],
        }
    }

    /// Children currently hidden, empty when expanded or a leaf
    pub fn hidden(&self) -> &[NodeId] {
        match self {
            ChildState::Collapsed(children) => children,
            _ => &[],
        }
    }

    /// All children regardless of visibility
    pub fn all(&self) -> &[NodeId] {
        match self {
            ChildState::Leaf => &[],
            ChildState::Expanded(children) | ChildState::Collapsed(children) => children,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, ChildState::Collapsed(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ChildState::Leaf)
    }
}

/// One node of the collapsible hierarchy
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub id: NodeId,
    pub data: Arc<TreeNode>,
    pub parent: Option<NodeId>,
    pub children: ChildState,
    pub depth: usize,
    /// Assigned by the layout pass; `None` while hidden under a collapsed ancestor
    pub position: Option<Position>,
}

/// Arena-backed hierarchy over a normalized plan tree
#[derive(Debug, Clone)]
pub struct PlanHierarchy {
    nodes: Vec<HierarchyNode>,
}

impl PlanHierarchy {
    /// Build the full hierarchy with every node expanded
    pub fn build(root: Arc<TreeNode>) -> Self {
        let mut nodes = Vec::new();
        Self::push_subtree(&mut nodes, root, None, 0);
        log::debug!("Built plan hierarchy with {} nodes", nodes.len());
        Self { nodes }
    }

    fn push_subtree(
        nodes: &mut Vec<HierarchyNode>,
        data: Arc<TreeNode>,
        parent: Option<NodeId>,
        depth: usize,
    ) -> NodeId {
        let id = NodeId(nodes.len());
        nodes.push(HierarchyNode {
            id,
            data: data.clone(),
            parent,
            children: ChildState::Leaf,
            depth,
            position: None,
        });

        if let Some(children) = &data.children {
            let child_ids: Vec<NodeId> = children
                .iter()
                .map(|child| Self::push_subtree(nodes, child.clone(), Some(id), depth + 1))
                .collect();
            nodes[id.0].children = ChildState::Expanded(child_ids);
        }

        id
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut HierarchyNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Total number of nodes, visible or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in pre-order
    pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.nodes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut HierarchyNode> {
        self.nodes.iter_mut()
    }

    /// Ids of nodes reachable from the root through expanded children, in pre-order
    pub fn visible_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            out.push(id);
            for child in self.nodes[id.0].children.visible().iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Visible parent-to-child edges, in pre-order of the child
    pub fn visible_links(&self) -> Vec<(NodeId, NodeId)> {
        self.visible_ids()
            .into_iter()
            .filter_map(|id| self.nodes[id.0].parent.map(|parent| (parent, id)))
            .collect()
    }

    /// Whether every ancestor of `id` is expanded
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.ancestors(id)
            .iter()
            .all(|ancestor| !self.nodes[ancestor.0].children.is_collapsed())
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.get(id).and_then(|node| node.parent);
        while let Some(parent) = current {
            out.push(parent);
            current = self.nodes[parent.0].parent;
        }
        out
    }

    /// Snapshot of every node's child state, indexed by id
    pub fn collapse_snapshot(&self) -> Vec<ChildState> {
        self.nodes.iter().map(|node| node.children.clone()).collect()
    }
}
