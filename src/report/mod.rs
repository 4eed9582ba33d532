// SPDX-License-Identifier: PMPL-1.0-or-later

//! Build reports: what a run produced and how long it took

pub mod formatter;
pub mod output;

use crate::gallery::ProcessedGallery;
use crate::types::{OutputFormat, Photo};
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub use formatter::ReportFormatter;
pub use output::ReportOutputFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub created_at: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub theme: String,
    pub output_format: OutputFormat,
    pub output_quality: u8,
    pub duration_secs: f64,
    pub photo_count: usize,
    pub title_count: usize,
    pub description_count: usize,
    pub exif_tags: BTreeSet<String>,
    pub photos: Vec<PhotoSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSummary {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sizes: Vec<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub translations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<NaiveDateTime>,
}

impl From<&Photo> for PhotoSummary {
    fn from(photo: &Photo) -> Self {
        Self {
            file_name: photo.file_name.clone(),
            title: photo.text.title.clone(),
            description: photo.text.description.clone(),
            sizes: photo.sizes.clone(),
            translations: photo.translations.keys().cloned().collect(),
            taken_at: photo.taken_at,
        }
    }
}

/// Where and how a build was run
#[derive(Debug, Clone)]
pub struct BuildSettings<'a> {
    pub source: &'a Path,
    pub destination: &'a Path,
    pub theme: String,
    pub output_format: OutputFormat,
    pub output_quality: u8,
}

impl BuildReport {
    pub fn new(settings: BuildSettings<'_>, gallery: &ProcessedGallery) -> Self {
        let stats = &gallery.statistics;
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            source: settings.source.to_path_buf(),
            destination: settings.destination.to_path_buf(),
            theme: settings.theme,
            output_format: settings.output_format,
            output_quality: settings.output_quality,
            duration_secs: stats.duration.as_secs_f64(),
            photo_count: stats.photo_count,
            title_count: stats.title_count,
            description_count: stats.description_count,
            exif_tags: stats.exif_tags.clone(),
            photos: gallery.photos.iter().map(PhotoSummary::from).collect(),
        }
    }
}

/// Print the statistics block to the console
pub fn print_report(report: &BuildReport) {
    ReportFormatter::new().print(report);
}

/// Save the report, in `format` or the format implied by the extension
pub fn save_report<P: AsRef<Path>>(
    report: &BuildReport,
    path: P,
    format: Option<ReportOutputFormat>,
) -> Result<()> {
    ReportFormatter::new().save(report, path.as_ref(), format)
}
