// SPDX-License-Identifier: PMPL-1.0-or-later

//! phogg: a photo gallery site generator
//!
//! Reads the photos of a source directory, writes resized copies and renders
//! a single-page slideshow site into a fresh destination directory.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use phogg::config::{SiteConfig, DEFAULT_SITE_CONFIG};
use phogg::gallery;
use phogg::report::{self, BuildReport, BuildSettings, ReportOutputFormat};
use phogg::site::{self, load_template, SiteOptions, Theme};
use phogg::types::{OutputFormat, ProcessingOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "phogg")]
#[command(version)]
#[command(about = "A photo gallery site generator")]
#[command(long_about = None)]
struct Cli {
    /// Source directory with your photos
    #[arg(short, long, value_name = "DIRECTORY")]
    source: PathBuf,

    /// Destination directory for your generated site (will be created)
    #[arg(short, long, value_name = "DIRECTORY")]
    destination: PathBuf,

    /// Force overwrite of the destination directory if it exists
    #[arg(short, long)]
    force: bool,

    /// Site configuration file [default: site.toml]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output image format
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = OutputFormat::Jpeg)]
    output_format: OutputFormat,

    /// Output image compression quality (JPEG only)
    #[arg(
        short = 'q',
        long,
        value_name = "QUALITY",
        default_value_t = 80,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    output_quality: u8,

    /// Theme directory containing index.jinja [default: built-in theme]
    #[arg(short, long, value_name = "DIRECTORY")]
    theme: Option<PathBuf>,

    /// wasm-pack output of the slideshow, published as pkg/
    #[arg(long, value_name = "DIRECTORY")]
    web_bundle: Option<PathBuf>,

    /// Number of photos processed in parallel [default: one per CPU]
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Save a build report to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Report format [default: from the report file extension]
    #[arg(long, value_enum, requires = "report")]
    report_format: Option<ReportOutputFormat>,
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => println!("{}", "Done".green().bold()),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            eprintln!("Aborted");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("configuring worker threads")?;
    }

    // Everything that can be checked up front is checked before the
    // destination is (re)created.
    gallery::check_source_directory(&cli.source)?;
    let config = load_config(cli.config.as_deref())?;
    let theme = Theme::from_option(cli.theme);
    let env = theme.environment()?;
    load_template(&env, &theme)?;
    if let Some(bundle) = &cli.web_bundle {
        site::check_web_bundle(bundle)?;
    }

    let destination = site::create_site_directory(&cli.destination, cli.force)?;

    let options = ProcessingOptions {
        format: cli.output_format,
        quality: cli.output_quality,
        languages: config.languages.clone(),
    };
    let processed = gallery::process_photos(&cli.source, &destination, &options)?;

    let site_options = SiteOptions {
        theme,
        web_bundle: cli.web_bundle,
    };
    site::generate_site(&config, &processed.photos, &destination, &site_options)?;

    let build_report = BuildReport::new(
        BuildSettings {
            source: &cli.source,
            destination: &destination,
            theme: site_options.theme.name(),
            output_format: options.format,
            output_quality: options.quality,
        },
        &processed,
    );
    report::print_report(&build_report);

    if let Some(path) = cli.report {
        report::save_report(&build_report, path, cli.report_format)?;
    }

    Ok(())
}

/// An explicitly named config file must exist; a missing `site.toml` in the
/// working directory falls back to the defaults.
fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path),
        None => {
            let default_path = Path::new(DEFAULT_SITE_CONFIG);
            if default_path.is_file() {
                SiteConfig::load(default_path)
            } else {
                println!(
                    "No {} found, using default site configuration",
                    DEFAULT_SITE_CONFIG
                );
                Ok(SiteConfig::default())
            }
        }
    }
}
