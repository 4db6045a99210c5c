// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! CLI output reporter with colored formatting

use super::MeshSummary;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report mesh statistics
    pub fn report_summary(file: &str, summary: &MeshSummary) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Vertices:".bright_black(),
            summary.vertices.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Triangles:".bright_black(),
            summary.faces.to_string().cyan()
        );

        let boundary = summary.boundary_edges.to_string();
        println!(
            "  {} {}",
            "Boundary edges:".bright_black(),
            if summary.is_closed() {
                boundary.green()
            } else {
                boundary.yellow()
            }
        );

        if let (Some(min), Some(max)) = (summary.bbox_min, summary.bbox_max) {
            println!(
                "  {} [{}, {}, {}] .. [{}, {}, {}]",
                "Bounds:".bright_black(),
                min[0],
                min[1],
                min[2],
                max[0],
                max[1],
                max[2]
            );
        }
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a written mesh
    pub fn report_written(file: &str, vertices: usize, triangles: usize, duration: Duration) {
        println!(
            "{} {} {} ({} vertices, {} triangles, {})",
            "✅".green(),
            "Wrote".green(),
            file.cyan(),
            vertices,
            triangles,
            Self::format_duration(duration).yellow()
        );
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
