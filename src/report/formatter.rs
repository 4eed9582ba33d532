// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report formatting and output

use crate::report::{BuildReport, ReportOutputFormat};
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

const LINE_LENGTH: usize = 80;

pub struct ReportFormatter;

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, report: &BuildReport) {
        println!("{}", "*".repeat(LINE_LENGTH));
        for line in self.summary_lines(report) {
            println!("{}", line);
        }
        println!("{}", "*".repeat(LINE_LENGTH));
    }

    /// Plain-text statistics, one sentence per line
    pub fn summary_lines(&self, report: &BuildReport) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Processed {} photos in {} seconds.",
                report.photo_count.to_string().bold(),
                report.duration_secs.round()
            ),
            format!(
                "{} photos had a title and {} of them had a description.",
                report.title_count, report.description_count
            ),
        ];
        if !report.exif_tags.is_empty() {
            lines.push(format!(
                "EXIF tags found: {}",
                report
                    .exif_tags
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
                    .dimmed()
            ));
        }
        lines
    }

    pub fn save(
        &self,
        report: &BuildReport,
        path: &Path,
        format: Option<ReportOutputFormat>,
    ) -> Result<()> {
        let format = format.unwrap_or_else(|| ReportOutputFormat::from_path(path));
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let content = format.serialize(report)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        println!(
            "{} {}",
            "Report saved to:".green(),
            path.display()
        );
        Ok(())
    }
}
