// SPDX-License-Identifier: PMPL-1.0-or-later

//! Site configuration (`site.toml`)
//!
//! ```toml
//! title = "Summer 2024"
//! description = "Two weeks on the coast"
//! author = "Jo"
//! languages = ["en", "de"]
//!
//! # anything else is handed to the theme untouched
//! accent_color = "#d94f30"
//! ```

use crate::i18n::{is_valid_iso639_1, Lang, LocalePair};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SITE_CONFIG: &str = "site.toml";
pub const DEFAULT_TITLE: &str = "Photo Gallery";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Primary locale first, secondary second
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Theme-specific keys
    #[serde(flatten)]
    pub extra: toml::Table,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string(), "de".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: None,
            author: None,
            languages: default_languages(),
            extra: toml::Table::new(),
        }
    }
}

impl SiteConfig {
    /// Read and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        println!("Reading site configuration file {}", name);

        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading site configuration {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid site configuration {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(raw)?;
        config.locales()?;
        Ok(config)
    }

    /// The page's two locales, validated
    pub fn locales(&self) -> Result<LocalePair> {
        if self.languages.len() != 2 {
            bail!(
                "languages: expected exactly two language codes, found {}",
                self.languages.len()
            );
        }
        let primary = parse_language(&self.languages[0])?;
        let secondary = parse_language(&self.languages[1])?;
        if primary == secondary {
            bail!("languages: both entries are '{}'", primary);
        }
        Ok(LocalePair::new(primary, secondary))
    }
}

fn parse_language(code: &str) -> Result<Lang> {
    if let Some(lang) = Lang::from_code(code) {
        return Ok(lang);
    }
    if is_valid_iso639_1(code) {
        let supported: Vec<&str> = Lang::all().iter().map(Lang::code).collect();
        bail!(
            "languages: '{}' is not supported (supported: {})",
            code,
            supported.join(", ")
        );
    }
    bail!("languages: '{}' is not an ISO 639-1 language code", code)
}
