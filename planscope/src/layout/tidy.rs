// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tidy tree layout
//!
//! Walker's algorithm in Buchheim's linear-time formulation, the same
//! variant d3's `tree()` implements. Siblings are kept one unit apart and
//! cousins two units apart; subtrees are packed as tightly as those
//! separations allow and parents are centred over their children.
//!
//! Only visible nodes take part. The layout is recomputed from scratch on
//! every call, so it is deterministic for a given visible set.

use super::{Extent, Position};
use crate::hierarchy::{NodeId, PlanHierarchy};

/// Tidy tree layout settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TidyLayout {
    extent: Extent,
    depth_spacing: Option<f64>,
}

impl TidyLayout {
    /// Layout fitting the sibling axis into `extent.height`, with a fixed
    /// distance between depth levels
    pub fn new(extent: Extent, depth_spacing: f64) -> Self {
        Self {
            extent,
            depth_spacing: Some(depth_spacing),
        }
    }

    /// Layout stretching the deepest visible level to `extent.width`
    pub fn fit_width(extent: Extent) -> Self {
        Self {
            extent,
            depth_spacing: None,
        }
    }

    /// Assign positions to every visible node and clear hidden ones
    pub fn apply(&self, hierarchy: &mut PlanHierarchy) {
        let mut walker = Walker::new(hierarchy);
        walker.run();

        let breadth = walker.normalized_breadth(self.extent.height);
        let max_depth = walker.slots.iter().map(|s| s.depth).max().unwrap_or(0);
        let depth_step = match self.depth_spacing {
            Some(spacing) => spacing,
            None => self.extent.width / max_depth.max(1) as f64,
        };

        for node in hierarchy.iter_mut() {
            node.position = None;
        }
        for (slot, y) in walker.slots.iter().zip(breadth) {
            if let Some(node) = hierarchy.get_mut(slot.node) {
                node.position = Some(Position::new(slot.depth as f64 * depth_step, y));
            }
        }

        log::debug!(
            "Laid out {} visible nodes across depth {}",
            walker.slots.len(),
            max_depth
        );
    }
}

/// Working state for one visible node
#[derive(Debug, Clone)]
struct Slot {
    node: NodeId,
    depth: usize,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Position among its siblings
    number: usize,
    ancestor: usize,
    default_ancestor: Option<usize>,
    thread: Option<usize>,
    prelim: f64,
    modifier: f64,
    change: f64,
    shift: f64,
    x: f64,
}

/// Slots are stored in visible pre-order, so index 0 is the root
struct Walker {
    slots: Vec<Slot>,
}

impl Walker {
    fn new(hierarchy: &PlanHierarchy) -> Self {
        let mut slot_of: Vec<Option<usize>> = vec![None; hierarchy.len()];
        let mut slots: Vec<Slot> = Vec::new();

        for id in hierarchy.visible_ids() {
            let Some(node) = hierarchy.get(id) else {
                continue;
            };
            let index = slots.len();
            let parent = node.parent.and_then(|p| slot_of[p.index()]);
            let number = match parent {
                Some(p) => {
                    let siblings: &mut Vec<usize> = &mut slots[p].children;
                    siblings.push(index);
                    siblings.len() - 1
                }
                None => 0,
            };

            slot_of[id.index()] = Some(index);
            slots.push(Slot {
                node: id,
                depth: node.depth,
                parent,
                children: Vec::new(),
                number,
                ancestor: index,
                default_ancestor: None,
                thread: None,
                prelim: 0.0,
                modifier: 0.0,
                change: 0.0,
                shift: 0.0,
                x: 0.0,
            });
        }

        Self { slots }
    }

    fn run(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        for v in self.postorder() {
            self.first_walk(v);
        }
        self.second_walk();
    }

    /// Left-to-right post-order over the slot tree
    fn postorder(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.slots.len());
        let mut stack = vec![0];
        while let Some(v) = stack.pop() {
            out.push(v);
            stack.extend(self.slots[v].children.iter().copied());
        }
        out.reverse();
        out
    }

    fn separation(&self, a: usize, b: usize) -> f64 {
        if self.slots[a].parent == self.slots[b].parent {
            1.0
        } else {
            2.0
        }
    }

    fn left_sibling(&self, v: usize) -> Option<usize> {
        let slot = &self.slots[v];
        match (slot.parent, slot.number) {
            (Some(parent), number) if number > 0 => Some(self.slots[parent].children[number - 1]),
            _ => None,
        }
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.slots[v].children.first().copied().or(self.slots[v].thread)
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.slots[v].children.last().copied().or(self.slots[v].thread)
    }

    fn first_walk(&mut self, v: usize) {
        let left = self.left_sibling(v);

        let children = &self.slots[v].children;
        let ends = children.first().copied().zip(children.last().copied());

        if let Some((first, last)) = ends {
            self.execute_shifts(v);
            let midpoint = (self.slots[first].prelim + self.slots[last].prelim) / 2.0;
            match left {
                Some(w) => {
                    self.slots[v].prelim = self.slots[w].prelim + self.separation(v, w);
                    self.slots[v].modifier = self.slots[v].prelim - midpoint;
                }
                None => self.slots[v].prelim = midpoint,
            }
        } else if let Some(w) = left {
            self.slots[v].prelim = self.slots[w].prelim + self.separation(v, w);
        }

        if let Some(parent) = self.slots[v].parent {
            let default = self.slots[parent]
                .default_ancestor
                .unwrap_or(self.slots[parent].children[0]);
            let next = self.apportion(v, left, default);
            self.slots[parent].default_ancestor = Some(next);
        }
    }

    /// Push `v`'s subtree right until it clears the subtrees on its left
    fn apportion(&mut self, v: usize, left: Option<usize>, mut ancestor: usize) -> usize {
        let (Some(w), Some(parent)) = (left, self.slots[v].parent) else {
            return ancestor;
        };

        let mut vip = Some(v);
        let mut vop = v;
        let mut vim = Some(w);
        let mut vom = self.slots[parent].children[0];
        let mut sip = self.slots[v].modifier;
        let mut sop = sip;
        let mut sim = self.slots[w].modifier;
        let mut som = self.slots[vom].modifier;

        loop {
            vim = vim.and_then(|n| self.next_right(n));
            vip = vip.and_then(|n| self.next_left(n));
            let (Some(im), Some(ip)) = (vim, vip) else {
                break;
            };
            let (Some(om), Some(op)) = (self.next_left(vom), self.next_right(vop)) else {
                break;
            };
            vom = om;
            vop = op;
            self.slots[vop].ancestor = v;

            let shift = self.slots[im].prelim + sim - self.slots[ip].prelim - sip
                + self.separation(im, ip);
            if shift > 0.0 {
                let from = self.next_ancestor(im, v, ancestor);
                self.move_subtree(from, v, shift);
                sip += shift;
                sop += shift;
            }

            sim += self.slots[im].modifier;
            sip += self.slots[ip].modifier;
            som += self.slots[vom].modifier;
            sop += self.slots[vop].modifier;
        }

        if let Some(im) = vim {
            if self.next_right(vop).is_none() {
                self.slots[vop].thread = Some(im);
                self.slots[vop].modifier += sim - sop;
            }
        }
        if let Some(ip) = vip {
            if self.next_left(vom).is_none() {
                self.slots[vom].thread = Some(ip);
                self.slots[vom].modifier += sip - som;
                ancestor = v;
            }
        }

        ancestor
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let candidate = self.slots[vim].ancestor;
        if self.slots[candidate].parent == self.slots[v].parent {
            candidate
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let subtrees = self.slots[wp].number.saturating_sub(self.slots[wm].number).max(1);
        let change = shift / subtrees as f64;
        self.slots[wp].change -= change;
        self.slots[wp].shift += shift;
        self.slots[wm].change += change;
        self.slots[wp].prelim += shift;
        self.slots[wp].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for i in (0..self.slots[v].children.len()).rev() {
            let w = self.slots[v].children[i];
            let child = &mut self.slots[w];
            child.prelim += shift;
            child.modifier += shift;
            change += child.change;
            shift += child.shift + change;
        }
    }

    /// Resolve absolute sibling-axis coordinates, parents before children
    fn second_walk(&mut self) {
        for v in 0..self.slots.len() {
            let parent_modifier = match self.slots[v].parent {
                Some(parent) => self.slots[parent].modifier,
                None => -self.slots[v].prelim,
            };
            self.slots[v].x = self.slots[v].prelim + parent_modifier;
            self.slots[v].modifier += parent_modifier;
        }
    }

    /// Scale sibling-axis coordinates into `[0, size]`, leaving half a
    /// separation of padding at both ends
    fn normalized_breadth(&self, size: f64) -> Vec<f64> {
        if self.slots.is_empty() {
            return Vec::new();
        }

        let mut left = 0;
        let mut right = 0;
        for (v, slot) in self.slots.iter().enumerate() {
            if slot.x < self.slots[left].x {
                left = v;
            }
            if slot.x > self.slots[right].x {
                right = v;
            }
        }

        let s = if left == right {
            1.0
        } else {
            self.separation(left, right) / 2.0
        };
        let tx = s - self.slots[left].x;
        let kx = size / (self.slots[right].x + s + tx);

        self.slots.iter().map(|slot| (slot.x + tx) * kx).collect()
    }
}
