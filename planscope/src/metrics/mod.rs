// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plan metrics
//!
//! Metrics are always derived from the full normalized tree. They never
//! look at the collapse hierarchy, so expanding or collapsing nodes for
//! display cannot change any reported number.

pub mod summary;
pub mod timeline;

pub use summary::{summarize, OperatorSummary, PlanSummary, DEFAULT_TOP_OPERATORS};
pub use timeline::{build_timeline, Timeline, TimelineBar, DEFAULT_CHART_WIDTH};
