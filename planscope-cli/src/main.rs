// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! planscope CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Version => {
            println!("{} {}", "planscope".bold().green(), planscope::VERSION);
            println!("Execution plan tree explorer");
            Ok(())
        }

        Commands::Summary { file, format } => cli::handle_summary(config, file, format),

        Commands::Tree { file, expand_all } => cli::handle_tree(config, file, expand_all),

        Commands::Render {
            file,
            output,
            expand_all,
        } => cli::handle_render(config, file, output, expand_all),

        Commands::Explore { file } => cli::handle_explore(config, file),
    }
}
