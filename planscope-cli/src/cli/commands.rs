// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// planscope - explore execution plans as collapsible trees
#[derive(Parser, Debug)]
#[command(name = "planscope", author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,

    /// Viewer configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Print plan metrics, the costliest operators and the timeline
    Summary {
        /// Plan file (EXPLAIN ... FORMAT JSON output)
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the visible plan tree with layout coordinates
    Tree {
        /// Plan file
        file: PathBuf,

        /// Expand every node instead of the one-level initial view
        #[arg(long)]
        expand_all: bool,
    },

    /// Render the plan diagram and timeline to an SVG file
    Render {
        /// Plan file
        file: PathBuf,

        /// Output SVG path
        #[arg(short, long)]
        output: PathBuf,

        /// Expand every node instead of the one-level initial view
        #[arg(long)]
        expand_all: bool,
    },

    /// Interactive explorer: click, hover and collapse nodes
    Explore {
        /// Plan file to open on start
        file: Option<PathBuf>,
    },
}

/// Output format for metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
