// SPDX-License-Identifier: PMPL-1.0-or-later

//! Site generation
//!
//! Renders the theme's `index.jinja` with the site configuration and the
//! processed photos, then copies the theme's static files (and optionally a
//! `wasm-pack` bundle of the slideshow) next to the page.

pub mod theme;

use crate::config::SiteConfig;
use crate::i18n::{labels, language_name, native_name, Lang, LocalePair};
use crate::types::{ExifData, Photo, PhotoText};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use theme::{copy_tree, load_template, Theme, TEMPLATE_INDEX_FILE_NAME};

/// Directory below the site root that receives the slideshow bundle
pub const WEB_BUNDLE_DIR: &str = "pkg";

#[derive(Debug, Clone, Default)]
pub struct SiteOptions {
    pub theme: Theme,
    /// `wasm-pack --target web` output directory to publish with the page
    pub web_bundle: Option<PathBuf>,
}

/// Create the destination directory, clearing it first when `force` is set
pub fn create_site_directory(path: &Path, force: bool) -> Result<PathBuf> {
    println!(
        "Creating destination directory {}{}",
        path.display(),
        if force { " (forcing cleanup)" } else { "" }
    );
    if path.exists() {
        if !force {
            bail!("{} already exists", path.display());
        }
        if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
        .with_context(|| format!("removing {}", path.display()))?;
    }

    fs::create_dir_all(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(path.to_path_buf())
}

#[derive(Serialize)]
struct PageContext<'a> {
    #[serde(flatten)]
    extra: &'a toml::Table,
    title: &'a str,
    description: Option<&'a str>,
    author: Option<&'a str>,
    primary_language: &'static str,
    secondary_language: &'static str,
    languages: Vec<LanguageView>,
    photos: Vec<PhotoView<'a>>,
    web_bundle: bool,
    generator: String,
    generated_at: String,
}

#[derive(Serialize)]
struct LanguageView {
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    primary: bool,
    labels: BTreeMap<&'static str, &'static str>,
}

impl LanguageView {
    fn new(lang: Lang, primary: bool) -> Self {
        let code = lang.code();
        Self {
            code,
            name: language_name(code).unwrap_or(code),
            native_name: native_name(code).unwrap_or(code),
            primary,
            labels: labels(lang),
        }
    }
}

#[derive(Serialize)]
struct PhotoView<'a> {
    file_name: &'a str,
    path: String,
    srcset: String,
    sizes: &'a [u32],
    width: u32,
    height: u32,
    mime_type: &'static str,
    title: Option<&'a str>,
    description: Option<&'a str>,
    /// Caption per page language
    texts: BTreeMap<&'static str, &'a PhotoText>,
    exif: &'a ExifData,
    taken_at: Option<String>,
}

impl<'a> PhotoView<'a> {
    fn new(photo: &'a Photo, locales: LocalePair) -> Self {
        let texts = locales
            .as_array()
            .into_iter()
            .map(|lang| (lang.code(), photo.text_for(lang.code())))
            .collect();
        Self {
            file_name: &photo.file_name,
            path: photo.path(),
            srcset: photo.srcset(),
            sizes: &photo.sizes,
            width: photo.width,
            height: photo.height,
            mime_type: photo.format.mime_type(),
            title: photo.title(),
            description: photo.description(),
            texts,
            exif: &photo.exif,
            taken_at: photo.taken_at.map(|t| t.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Render the theme's index page to a string
pub fn render_index(
    config: &SiteConfig,
    photos: &[Photo],
    theme: &Theme,
    web_bundle: bool,
) -> Result<String> {
    let locales = config.locales()?;
    let env = theme.environment()?;
    let template = load_template(&env, theme)?;

    let context = PageContext {
        extra: &config.extra,
        title: &config.title,
        description: config.description.as_deref(),
        author: config.author.as_deref(),
        primary_language: locales.primary.code(),
        secondary_language: locales.secondary.code(),
        languages: vec![
            LanguageView::new(locales.primary, true),
            LanguageView::new(locales.secondary, false),
        ],
        photos: photos.iter().map(|p| PhotoView::new(p, locales)).collect(),
        web_bundle,
        generator: format!("phogg {}", env!("CARGO_PKG_VERSION")),
        generated_at: chrono::Utc::now().to_rfc3339(),
    };

    template
        .render(&context)
        .with_context(|| format!("rendering {} of theme {}", TEMPLATE_INDEX_FILE_NAME, theme.name()))
}

/// Render `index.html` into `destination_dir` and copy the theme's assets.
///
/// Returns the path of the written page.
pub fn generate_site(
    config: &SiteConfig,
    photos: &[Photo],
    destination_dir: &Path,
    options: &SiteOptions,
) -> Result<PathBuf> {
    println!("Loading theme {}", options.theme.name());
    println!("Rendering template");
    let html = render_index(config, photos, &options.theme, options.web_bundle.is_some())?;

    let index_path = destination_dir.join("index.html");
    fs::write(&index_path, html).with_context(|| format!("writing {}", index_path.display()))?;

    let copied = options.theme.copy_static_files(destination_dir)?;
    if !copied.is_empty() {
        let names: Vec<String> = copied.iter().map(|p| p.display().to_string()).collect();
        println!("Copying static theme files {}", names.join(", "));
    }

    if let Some(bundle) = &options.web_bundle {
        copy_web_bundle(bundle, destination_dir)?;
    }

    Ok(index_path)
}

/// Check that `bundle` is a `wasm-pack` output directory
pub fn check_web_bundle(bundle: &Path) -> Result<()> {
    if !bundle.is_dir() {
        bail!("web bundle directory not found: {}", bundle.display());
    }
    let has_module = fs::read_dir(bundle)
        .with_context(|| format!("reading {}", bundle.display()))?
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.path().extension().is_some_and(|ext| ext == "wasm"));
    if !has_module {
        bail!(
            "{} contains no .wasm module (build it with wasm-pack build --target web -- --features web)",
            bundle.display()
        );
    }
    Ok(())
}

/// Publish a `wasm-pack` output directory as `<destination>/pkg`
pub fn copy_web_bundle(bundle: &Path, destination_dir: &Path) -> Result<Vec<PathBuf>> {
    check_web_bundle(bundle)?;
    println!("Copying slideshow bundle from {}", bundle.display());
    let target = destination_dir.join(WEB_BUNDLE_DIR);
    fs::create_dir_all(&target).with_context(|| format!("creating {}", target.display()))?;
    copy_tree(bundle, &target)
}
