// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Viewer configuration

use crate::error::LoadError;
use crate::layout::{Extent, TidyLayout};
use crate::metrics::DEFAULT_TOP_OPERATORS;
use serde::{Deserialize, Serialize};

/// Top-level viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Plan diagram canvas
    pub canvas: CanvasConfig,

    /// Distance between depth levels; `None` stretches the tree to the canvas width
    pub depth_spacing: Option<f64>,

    /// Radius of a node marker
    pub node_radius: f64,

    /// Gap between a node marker and its label
    pub label_offset: f64,

    /// Number of operators kept in the cost ranking
    pub top_operators: usize,

    /// Timeline chart
    pub timeline: TimelineConfig,

    /// Tooltip placement relative to the pointer
    pub tooltip_offset: (f64, f64),
}

/// Canvas size and the margin reserved around the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

/// Timeline chart size and margins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            depth_spacing: Some(180.0),
            node_radius: 8.0,
            label_offset: 12.0,
            top_operators: DEFAULT_TOP_OPERATORS,
            timeline: TimelineConfig::default(),
            tooltip_offset: (10.0, -28.0),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 600.0,
            margin: Margin::new(20.0, 20.0, 20.0, 100.0),
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 150.0,
            margin: Margin::new(20.0, 20.0, 30.0, 100.0),
        }
    }
}

impl CanvasConfig {
    /// Area left for the tree once margins are removed
    pub fn inner_extent(&self) -> Extent {
        Extent::new(
            (self.width - self.margin.left - self.margin.right).max(0.0),
            (self.height - self.margin.top - self.margin.bottom).max(0.0),
        )
    }
}

impl TimelineConfig {
    /// Length available to the longest bar
    pub fn chart_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height available to the bars
    pub fn chart_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

impl ViewerConfig {
    /// Parse a JSON configuration; missing keys take their defaults
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::Config(e.to_string()))
    }

    /// Tree layout for the configured canvas
    pub fn layout(&self) -> TidyLayout {
        let extent = self.canvas.inner_extent();
        match self.depth_spacing {
            Some(spacing) => TidyLayout::new(extent, spacing),
            None => TidyLayout::fit_width(extent),
        }
    }
}
