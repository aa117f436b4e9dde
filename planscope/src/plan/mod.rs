// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plan records and their normalized tree form
//!
//! This module owns the input side of the engine: the serde model of a raw
//! plan node, the document loader that locates the plan inside an
//! `EXPLAIN` output, and the normalizer that converts raw nodes into
//! immutable [`TreeNode`]s shared by layout and metrics.

pub mod document;
pub mod raw;
pub mod tree;

pub use document::PlanDocument;
pub use raw::RawPlanNode;
pub use tree::{normalize, TreeNode};
