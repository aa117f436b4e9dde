// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plan formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use planscope::{DetailPanel, NodeId, PlanHierarchy, PlanSummary, Timeline, TooltipEvent};

use super::commands::OutputFormat;

/// Width in characters of the longest timeline bar
const BAR_COLUMNS: f64 = 40.0;

/// Formatter for summaries, trees and interaction payloads
pub struct PlanFormatter;

impl PlanFormatter {
    /// Format metrics and timeline in the specified format
    pub fn format_summary(
        summary: &PlanSummary,
        timeline: &Timeline,
        format: OutputFormat,
    ) -> String {
        match format {
            OutputFormat::Table => Self::format_summary_table(summary, timeline),
            OutputFormat::Json => Self::format_summary_json(summary, timeline),
        }
    }

    fn format_summary_table(summary: &PlanSummary, timeline: &Timeline) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Query Summary".bold().green()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Metric").fg(Color::Green),
            Cell::new("Value").fg(Color::Green),
        ]);
        table.add_row(vec!["Total time (ms)".to_string(), summary.total_time_text()]);
        table.add_row(vec!["Rows returned".to_string(), summary.rows_returned.to_string()]);
        table.add_row(vec!["Rows scanned".to_string(), summary.rows_scanned.to_string()]);
        output.push_str(&table.to_string());
        output.push('\n');

        output.push_str(&format!("\n{}\n", "Prominent Operators".bold().green()));
        for line in summary.compact_lines() {
            output.push_str(&format!("  {}\n", line));
        }

        output.push_str(&format!("\n{}\n", "Execution Timeline".bold().green()));
        output.push_str(&Self::format_timeline(timeline));

        output
    }

    fn format_summary_json(summary: &PlanSummary, timeline: &Timeline) -> String {
        let json_result = serde_json::json!({
            "status": "success",
            "summary": summary,
            "prominent_operators": summary.compact(),
            "timeline": timeline,
        });

        serde_json::to_string_pretty(&json_result).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize summary to JSON\"}".to_string()
        })
    }

    /// Horizontal text bars, scaled to the longest bar
    pub fn format_timeline(timeline: &Timeline) -> String {
        let bars = match timeline {
            Timeline::NoData => {
                return format!("{}\n", planscope::metrics::timeline::NO_DATA_MESSAGE.yellow())
            }
            Timeline::Bars(bars) => bars,
        };

        let longest = bars.iter().map(|bar| bar.length).fold(0.0_f64, f64::max);
        let label_width = bars.iter().map(|bar| bar.label.len()).max().unwrap_or(0);

        let mut output = String::new();
        for bar in bars {
            let columns = if longest > 0.0 {
                (bar.length / longest * BAR_COLUMNS).round() as usize
            } else {
                0
            };
            output.push_str(&format!(
                "  {:<width$} │{} {:.2} ms\n",
                bar.label,
                "█".repeat(columns).blue(),
                bar.time,
                width = label_width
            ));
        }
        output
    }

    /// Visible tree with ids, collapse markers and layout coordinates
    pub fn format_tree(hierarchy: &PlanHierarchy) -> String {
        let mut output = String::new();
        Self::format_tree_node(hierarchy, NodeId::ROOT, &mut output, "", true, true);
        output
    }

    fn format_tree_node(
        hierarchy: &PlanHierarchy,
        id: NodeId,
        output: &mut String,
        indent: &str,
        is_last: bool,
        is_root: bool,
    ) {
        let Some(node) = hierarchy.get(id) else {
            return;
        };

        let connector = match (is_root, is_last) {
            (true, _) => "",
            (false, true) => "└── ",
            (false, false) => "├── ",
        };
        let marker = if node.children.is_collapsed() {
            format!(" [+{}]", node.children.hidden().len()).yellow().to_string()
        } else {
            String::new()
        };
        let position = node
            .position
            .map(|p| format!(" @ ({:.1}, {:.1})", p.x, p.y))
            .unwrap_or_default();

        output.push_str(&format!(
            "{}{}{} {}{}{}\n",
            indent,
            connector,
            format!("#{}", id).dimmed(),
            node.data.label.bold(),
            marker,
            position.dimmed()
        ));

        let child_indent = if is_root {
            String::new()
        } else if is_last {
            format!("{}    ", indent)
        } else {
            format!("{}│   ", indent)
        };
        let children = node.children.visible();
        for (i, child) in children.iter().enumerate() {
            Self::format_tree_node(
                hierarchy,
                *child,
                output,
                &child_indent,
                i + 1 == children.len(),
                false,
            );
        }
    }

    /// Detail panel for a clicked node
    pub fn format_details(details: &DetailPanel) -> String {
        format!(
            "{} {}\n{} {}\n{}\n{}\n",
            "Node Type:".bold(),
            details.operation_type,
            "Label:".bold(),
            details.label,
            "Details:".bold(),
            details.detail_text
        )
    }

    /// Tooltip box for hover events
    pub fn format_tooltip(event: &TooltipEvent) -> String {
        match event {
            TooltipEvent::Show {
                operation_type,
                detail_text,
                anchor,
                ..
            } => format!(
                "{} {}\n{}\n",
                operation_type.bold().cyan(),
                format!("(tooltip at {:.0}, {:.0})", anchor.x, anchor.y).dimmed(),
                detail_text
            ),
            TooltipEvent::Hide => String::new(),
        }
    }
}
