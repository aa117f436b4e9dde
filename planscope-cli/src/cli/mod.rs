// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for planscope
//!
//! Provides one-off summary/tree/render commands and an interactive
//! explorer that drives the plan viewer the way a pointer would.

pub mod commands;
pub mod explorer;
pub mod output;
pub mod svg;

pub use commands::{Cli, Commands};
pub use explorer::{handle_explore, handle_render, handle_summary, handle_tree, load_config};
