// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Comparative timeline series

use super::summary::OperatorSummary;
use serde::Serialize;

/// Drawable bar width of the default 300px chart with 100px/20px side margins
pub const DEFAULT_CHART_WIDTH: f64 = 180.0;

/// Message shown in place of an empty chart
pub const NO_DATA_MESSAGE: &str = "No operators to display.";

/// One horizontal bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBar {
    /// Operator type; repeated types produce repeated labels
    pub label: String,
    pub time: f64,
    /// Bar length in chart units
    pub length: f64,
}

/// Bar-chart series for the ranked operators
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "bars", rename_all = "snake_case")]
pub enum Timeline {
    /// Nothing to plot
    NoData,
    Bars(Vec<TimelineBar>),
}

impl Timeline {
    pub fn bars(&self) -> &[TimelineBar] {
        match self {
            Timeline::NoData => &[],
            Timeline::Bars(bars) => bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Timeline::NoData)
    }
}

/// Scale operator times against the slowest one.
///
/// When every time is zero all bars have zero length.
pub fn build_timeline(operators: &[OperatorSummary], chart_width: f64) -> Timeline {
    if operators.is_empty() {
        return Timeline::NoData;
    }

    let max_time = operators.iter().map(|op| op.time).fold(0.0_f64, f64::max);
    let bars = operators
        .iter()
        .map(|op| TimelineBar {
            label: op.operation_type.clone(),
            time: op.time,
            length: if max_time > 0.0 {
                op.time / max_time * chart_width
            } else {
                0.0
            },
        })
        .collect();

    Timeline::Bars(bars)
}
