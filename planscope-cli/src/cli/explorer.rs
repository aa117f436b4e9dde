// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for planscope

use colored::Colorize;
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::path::{Path, PathBuf};

use super::commands::OutputFormat;
use super::output::PlanFormatter;
use super::svg::SvgRenderer;
use planscope::{NodeId, PlanViewer, PointerPosition, ViewerConfig};

/// Load the viewer configuration, falling back to defaults
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config {:?}: {}", path, e))?;
            let config = ViewerConfig::from_json_str(&text)?;
            log::debug!("Loaded viewer config from {:?}", path);
            Ok(config)
        }
        None => Ok(ViewerConfig::default()),
    }
}

/// Handle the summary command
pub fn handle_summary(
    config: ViewerConfig,
    file: PathBuf,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let viewer = open_plan(config, &file)?;
    let output = PlanFormatter::format_summary(viewer.summary()?, &viewer.timeline()?, format);
    println!("{}", output);
    Ok(())
}

/// Handle the tree command
pub fn handle_tree(
    config: ViewerConfig,
    file: PathBuf,
    expand_all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut viewer = open_plan(config, &file)?;
    if expand_all {
        viewer.expand_all(NodeId::ROOT)?;
    }
    print!("{}", PlanFormatter::format_tree(viewer.hierarchy()?));
    Ok(())
}

/// Handle the render command
pub fn handle_render(
    config: ViewerConfig,
    file: PathBuf,
    output: PathBuf,
    expand_all: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut viewer = open_plan(config, &file)?;
    if expand_all {
        viewer.expand_all(NodeId::ROOT)?;
    }
    write_svg(&viewer, &output)?;
    println!("{}", format!("Rendered plan to {:?}", output).green());
    Ok(())
}

/// Handle the explore (REPL) command
pub fn handle_explore(
    config: ViewerConfig,
    file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut viewer = PlanViewer::new(config);
    if let Some(file) = file {
        load_and_announce(&mut viewer, &file)?;
    }

    println!("{}", "planscope explorer".bold().green());
    println!("Type 'help' for commands, 'exit' or 'quit' to exit\n");
    if viewer.is_loaded() {
        print_tree(&viewer);
    }

    let config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(true)
        .build();

    let mut rl = Editor::<(), _>::with_config(config)?;

    let history_path = ".planscope/history.txt";
    if let Some(parent) = Path::new(&history_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.load_history(&history_path);

    loop {
        let line = match rl.readline(&format!("{}> ", "plan".cyan())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();

        let result: Result<(), Box<dyn std::error::Error>> = match command.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("{}", "Goodbye!".green());
                break;
            }
            "help" => {
                print_help();
                Ok(())
            }
            "clear" => {
                print!("\x1B[2J\x1B[1;1H");
                std::io::Write::flush(&mut std::io::stdout())?;
                Ok(())
            }
            "tree" => {
                print_tree(&viewer);
                Ok(())
            }
            "status" => print_status(&viewer),
            "click" => parse_id(argument).and_then(|id| {
                let details = viewer.click(id)?;
                print!("{}", PlanFormatter::format_details(&details));
                print_tree(&viewer);
                Ok(())
            }),
            "hover" => parse_id(argument).and_then(|id| {
                let scene = viewer.scene()?;
                let position = scene
                    .node(id)
                    .map(|node| node.position)
                    .ok_or_else(|| format!("Node #{} is not visible", id))?;
                let event = viewer.hover(id, PointerPosition::new(position.x, position.y))?;
                print!("{}", PlanFormatter::format_tooltip(&event));
                Ok(())
            }),
            "collapse" => parse_id(argument).and_then(|id| {
                viewer.collapse_all(id)?;
                print_tree(&viewer);
                Ok(())
            }),
            "expand" => parse_id(argument).and_then(|id| {
                viewer.expand_all(id)?;
                print_tree(&viewer);
                Ok(())
            }),
            "summary" => print_summary(&viewer),
            "timeline" => viewer
                .timeline()
                .map(|timeline| print!("{}", PlanFormatter::format_timeline(&timeline)))
                .map_err(Into::into),
            "load" => require_path(argument).and_then(|path| {
                load_and_announce(&mut viewer, &path)?;
                print_tree(&viewer);
                Ok(())
            }),
            "export" => require_path(argument).and_then(|path| {
                std::fs::write(&path, viewer.export_json()?)?;
                println!("{}", format!("Exported original plan to {:?}", path).green());
                Ok(())
            }),
            "svg" => require_path(argument).and_then(|path| {
                write_svg(&viewer, &path)?;
                println!("{}", format!("Rendered plan to {:?}", path).green());
                Ok(())
            }),
            other => Err(format!("Unknown command '{}'. Type 'help' for commands.", other).into()),
        };

        if let Err(e) = result {
            eprintln!("{}", format!("Error: {}", e).red());
        }
    }

    let _ = rl.save_history(&history_path);

    Ok(())
}

/// Read a plan file into a fresh viewer
fn open_plan(config: ViewerConfig, file: &Path) -> Result<PlanViewer, Box<dyn std::error::Error>> {
    let mut viewer = PlanViewer::new(config);
    load_plan(&mut viewer, file)?;
    Ok(viewer)
}

/// Read a plan file into an existing viewer; on failure the viewer keeps its plan
fn load_plan(viewer: &mut PlanViewer, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read plan {:?}: {}", file, e))?;
    viewer.load_str(&text)?;
    log::info!("Loaded plan from {:?}", file);
    Ok(())
}

/// Load a plan in the explorer and announce it
fn load_and_announce(
    viewer: &mut PlanViewer,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    load_plan(viewer, file)?;
    let summary = viewer.summary()?;
    println!(
        "{}",
        format!(
            "Loaded {:?}: total time {} ms, {} rows returned",
            file,
            summary.total_time_text(),
            summary.rows_returned
        )
        .green()
    );
    Ok(())
}

fn write_svg(viewer: &PlanViewer, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let svg = SvgRenderer::new(viewer.config()).render(&viewer.scene()?, &viewer.timeline()?);
    std::fs::write(path, svg)?;
    Ok(())
}

fn print_summary(viewer: &PlanViewer) -> Result<(), Box<dyn std::error::Error>> {
    let output =
        PlanFormatter::format_summary(viewer.summary()?, &viewer.timeline()?, OutputFormat::Table);
    println!("{}", output);
    Ok(())
}

fn print_status(viewer: &PlanViewer) -> Result<(), Box<dyn std::error::Error>> {
    let hierarchy = viewer.hierarchy()?;
    println!(
        "Loaded at {}: {} nodes, {} visible",
        viewer.loaded_at()?.format("%Y-%m-%d %H:%M:%S UTC"),
        hierarchy.len(),
        hierarchy.visible_ids().len()
    );
    Ok(())
}

fn print_tree(viewer: &PlanViewer) {
    match viewer.hierarchy() {
        Ok(hierarchy) => print!("{}", PlanFormatter::format_tree(hierarchy)),
        Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
    }
}

fn parse_id(argument: Option<&str>) -> Result<NodeId, Box<dyn std::error::Error>> {
    let raw = argument.ok_or("Missing node id")?;
    let id = raw
        .trim_start_matches('#')
        .parse::<usize>()
        .map_err(|_| format!("Invalid node id '{}'", raw))?;
    Ok(NodeId(id))
}

fn require_path(argument: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    argument
        .map(PathBuf::from)
        .ok_or_else(|| "Missing file path".into())
}

/// Print help message
fn print_help() {
    println!("{}", "Available commands:".bold().green());
    println!("  {}  - Show the visible plan tree", "tree".cyan());
    println!("  {}  - Expand/collapse a node and show its details", "click <id>".cyan());
    println!("  {}  - Show the tooltip for a visible node", "hover <id>".cyan());
    println!("  {}  - Collapse a node and all of its descendants", "collapse <id>".cyan());
    println!("  {}  - Expand a node and all of its descendants", "expand <id>".cyan());
    println!("  {}  - Show load time and node counts", "status".cyan());
    println!("  {}  - Show metrics and prominent operators", "summary".cyan());
    println!("  {}  - Show the execution timeline", "timeline".cyan());
    println!("  {}  - Load another plan file", "load <file>".cyan());
    println!("  {}  - Write the original plan JSON", "export <file>".cyan());
    println!("  {}  - Render the diagram to SVG", "svg <file>".cyan());
    println!("  {}  - Clear the screen", "clear".cyan());
    println!("  {}  - Exit the explorer", "exit/quit".cyan());
}
