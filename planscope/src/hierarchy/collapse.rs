// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Expand/collapse transitions

use super::{ChildState, NodeId, PlanHierarchy};
use crate::plan::TreeNode;
use std::sync::Arc;

/// Result of a [`PlanHierarchy::toggle`] request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Children moved from visible to hidden
    Collapsed,
    /// Children moved from hidden to visible, one level only
    Expanded,
    /// The node is a leaf; nothing changed
    Unchanged,
}

impl PlanHierarchy {
    /// Build the hierarchy in its initial view: the root and its direct
    /// children are shown, everything deeper starts collapsed.
    pub fn with_initial_view(root: Arc<TreeNode>) -> Self {
        let mut hierarchy = Self::build(root);
        let root_children = hierarchy.root().children.all().to_vec();
        for child in root_children {
            hierarchy.collapse_all(child);
        }
        hierarchy
    }

    /// Collapse `id` and every expanded descendant below it.
    ///
    /// The walk only follows visible children: a node that is already
    /// collapsed is left alone, along with whatever states its hidden
    /// subtree holds. Unknown ids and leaves are ignored.
    pub fn collapse_all(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get_mut(current) else {
                continue;
            };
            let state = std::mem::replace(&mut node.children, ChildState::Leaf);
            node.children = match state {
                ChildState::Expanded(children) => {
                    stack.extend(children.iter().copied());
                    ChildState::Collapsed(children)
                }
                other => other,
            };
        }
    }

    /// Expand `id` and every descendant below it
    pub fn expand_all(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get_mut(current) else {
                continue;
            };
            let state = std::mem::replace(&mut node.children, ChildState::Leaf);
            node.children = match state {
                ChildState::Expanded(children) | ChildState::Collapsed(children) => {
                    stack.extend(children.iter().copied());
                    ChildState::Expanded(children)
                }
                ChildState::Leaf => ChildState::Leaf,
            };
        }
    }

    /// Flip a single node between expanded and collapsed.
    ///
    /// Only `id` changes: collapsing keeps the hidden descendants' own
    /// states, and expanding reveals exactly one level.
    pub fn toggle(&mut self, id: NodeId) -> ToggleOutcome {
        let Some(node) = self.get_mut(id) else {
            return ToggleOutcome::Unchanged;
        };

        let state = std::mem::replace(&mut node.children, ChildState::Leaf);
        let (next, outcome) = match state {
            ChildState::Expanded(children) => {
                (ChildState::Collapsed(children), ToggleOutcome::Collapsed)
            }
            ChildState::Collapsed(children) => {
                (ChildState::Expanded(children), ToggleOutcome::Expanded)
            }
            ChildState::Leaf => (ChildState::Leaf, ToggleOutcome::Unchanged),
        };
        node.children = next;

        log::debug!("Toggled node {}: {:?}", id, outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{normalize, RawPlanNode};

    fn sample_tree() -> Arc<TreeNode> {
        // 0 Limit
        // 1   Hash Join
        // 2     Seq Scan
        // 3     Hash
        // 4       Seq Scan
        let raw = RawPlanNode::new("Limit").with_child(
            RawPlanNode::new("Hash Join")
                .with_child(RawPlanNode::new("Seq Scan"))
                .with_child(RawPlanNode::new("Hash").with_child(RawPlanNode::new("Seq Scan"))),
        );
        Arc::new(normalize(&raw))
    }

    #[test]
    fn test_build_assigns_depths_and_parents() {
        let hierarchy = PlanHierarchy::build(sample_tree());
        let depths: Vec<usize> = hierarchy.iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 2, 3]);
        assert_eq!(hierarchy.get(NodeId(4)).unwrap().parent, Some(NodeId(3)));
        assert_eq!(hierarchy.visible_ids().len(), 5);
    }

    #[test]
    fn test_initial_view_shows_one_level() {
        let hierarchy = PlanHierarchy::with_initial_view(sample_tree());
        assert_eq!(hierarchy.visible_ids(), vec![NodeId(0), NodeId(1)]);
        assert!(hierarchy.get(NodeId(1)).unwrap().children.is_collapsed());
        assert!(hierarchy.get(NodeId(3)).unwrap().children.is_collapsed());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut hierarchy = PlanHierarchy::with_initial_view(sample_tree());
        assert_eq!(hierarchy.toggle(NodeId(1)), ToggleOutcome::Expanded);
        assert_eq!(
            hierarchy.visible_ids(),
            vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]
        );
        assert_eq!(hierarchy.toggle(NodeId(1)), ToggleOutcome::Collapsed);
        assert_eq!(hierarchy.visible_ids(), vec![NodeId(0), NodeId(1)]);
    }

    #[test]
    fn test_toggle_leaf_is_noop() {
        let mut hierarchy = PlanHierarchy::build(sample_tree());
        let before = hierarchy.collapse_snapshot();
        assert_eq!(hierarchy.toggle(NodeId(2)), ToggleOutcome::Unchanged);
        assert_eq!(hierarchy.collapse_snapshot(), before);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut hierarchy = PlanHierarchy::build(sample_tree());
        assert_eq!(hierarchy.toggle(NodeId(99)), ToggleOutcome::Unchanged);
    }

    #[test]
    fn test_expand_all() {
        let mut hierarchy = PlanHierarchy::with_initial_view(sample_tree());
        hierarchy.expand_all(NodeId::ROOT);
        assert_eq!(hierarchy.visible_ids().len(), 5);
    }
}
