// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Tree layout
//!
//! The layout engine assigns a 2D [`Position`] to every visible node of a
//! [`PlanHierarchy`](crate::hierarchy::PlanHierarchy). The tree grows from
//! left to right: `x` is the depth axis and `y` the sibling axis.

pub mod tidy;

pub use tidy::TidyLayout;

use serde::{Deserialize, Serialize};

/// Screen position of a laid-out node, relative to the drawing area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Depth axis
    pub x: f64,
    /// Sibling axis
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift by a fixed offset
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Size of the drawing area the layout must fit into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
