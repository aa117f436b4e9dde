// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SVG rendering of a plan scene and its timeline

use planscope::config::{TimelineConfig, ViewerConfig};
use planscope::{LabelSide, Scene, Timeline};
use std::fmt::Write;

const LINK_STYLE: &str = "fill:none;stroke:#ccc;stroke-width:2px";
const BAR_COLOR: &str = "#3498db";

/// Writes the diagram and the timeline as one SVG document
pub struct SvgRenderer<'a> {
    config: &'a ViewerConfig,
}

impl<'a> SvgRenderer<'a> {
    pub fn new(config: &'a ViewerConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, scene: &Scene, timeline: &Timeline) -> String {
        let canvas = &self.config.canvas;
        let chart = &self.config.timeline;
        let height = canvas.height + chart.height;
        let width = canvas.width.max(chart.width);

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="sans-serif" font-size="12">"#,
            width, height
        );
        self.render_scene(scene, &mut out);
        self.render_timeline(timeline, chart, canvas.height, &mut out);
        out.push_str("</svg>\n");
        out
    }

    fn render_scene(&self, scene: &Scene, out: &mut String) {
        let _ = writeln!(out, r#"  <g class="plan">"#);

        for link in &scene.links {
            // Horizontal cubic link, as d3.linkHorizontal draws it
            let mid_x = (link.from.x + link.to.x) / 2.0;
            let _ = writeln!(
                out,
                r#"    <path class="link" style="{}" d="M{:.2},{:.2}C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}"/>"#,
                LINK_STYLE,
                link.from.x,
                link.from.y,
                mid_x,
                link.from.y,
                mid_x,
                link.to.y,
                link.to.x,
                link.to.y
            );
        }

        for node in &scene.nodes {
            let (dx, anchor) = match node.label_side {
                LabelSide::Before => (-self.config.label_offset, "end"),
                LabelSide::After => (self.config.label_offset, "start"),
            };
            let _ = writeln!(
                out,
                r#"    <g class="node" data-id="{}" transform="translate({:.2},{:.2})">"#,
                node.id, node.position.x, node.position.y
            );
            let _ = writeln!(
                out,
                r#"      <circle r="{}" fill="{}" stroke="{}"/>"#,
                self.config.node_radius,
                node.color,
                if node.collapsed { "#333" } else { "none" }
            );
            let _ = writeln!(
                out,
                r#"      <text dy="3" x="{}" text-anchor="{}">{}</text>"#,
                dx,
                anchor,
                escape(&node.label)
            );
            out.push_str("    </g>\n");
        }

        out.push_str("  </g>\n");
    }

    fn render_timeline(
        &self,
        timeline: &Timeline,
        chart: &TimelineConfig,
        top: f64,
        out: &mut String,
    ) {
        let origin_x = chart.margin.left;
        let origin_y = top + chart.margin.top;
        let _ = writeln!(
            out,
            r#"  <g class="timeline" transform="translate({:.2},{:.2})">"#,
            origin_x, origin_y
        );

        match timeline {
            Timeline::NoData => {
                let _ = writeln!(
                    out,
                    r#"    <text>{}</text>"#,
                    planscope::metrics::timeline::NO_DATA_MESSAGE
                );
            }
            Timeline::Bars(bars) => {
                // One band per bar with 10% padding, like a d3 band scale
                let band = chart.chart_height() / bars.len() as f64;
                let bar_height = band * 0.9;
                for (i, bar) in bars.iter().enumerate() {
                    let y = i as f64 * band + band * 0.05;
                    let _ = writeln!(
                        out,
                        r#"    <text class="axis" x="-6" y="{:.2}" text-anchor="end">{}</text>"#,
                        y + bar_height / 2.0 + 4.0,
                        escape(&bar.label)
                    );
                    let _ = writeln!(
                        out,
                        r#"    <rect class="bar" x="0" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                        y, bar.length, bar_height, BAR_COLOR
                    );
                    let _ = writeln!(
                        out,
                        r##"    <text class="label" x="{:.2}" y="{:.2}" fill="#333">{:.2} ms</text>"##,
                        bar.length + 4.0,
                        y + bar_height / 2.0 + 4.0,
                        bar.time
                    );
                }
            }
        }

        out.push_str("  </g>\n");
    }
}

/// Escape text for XML content
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
