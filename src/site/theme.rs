// SPDX-License-Identifier: PMPL-1.0-or-later

//! Site themes
//!
//! A theme is a Jinja template `index.jinja` plus an optional `static/`
//! directory copied verbatim next to the rendered page. The `default` theme
//! is compiled into the binary; other themes are read from disk.

use anyhow::{anyhow, bail, Context, Result};
use minijinja::{AutoEscape, Environment, ErrorKind, Template};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const TEMPLATE_INDEX_FILE_NAME: &str = "index.jinja";
pub const STATIC_DIR_NAME: &str = "static";

const BUILTIN_INDEX: &str = include_str!("../../templates/default/index.jinja");
const BUILTIN_STATIC: &[(&str, &str)] = &[(
    "style.css",
    include_str!("../../templates/default/static/style.css"),
)];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Builtin,
    Directory(PathBuf),
}

impl Theme {
    pub fn from_option(dir: Option<PathBuf>) -> Self {
        dir.map(Theme::Directory).unwrap_or_default()
    }

    pub fn name(&self) -> String {
        match self {
            Theme::Builtin => "default".to_string(),
            Theme::Directory(dir) => dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| dir.display().to_string()),
        }
    }

    /// Template environment with HTML auto-escaping for every template
    pub fn environment(&self) -> Result<Environment<'static>> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        match self {
            Theme::Builtin => env
                .add_template(TEMPLATE_INDEX_FILE_NAME, BUILTIN_INDEX)
                .context("loading built-in theme")?,
            Theme::Directory(dir) => {
                if !dir.is_dir() {
                    bail!("theme directory not found: {}", dir.display());
                }
                env.set_loader(minijinja::path_loader(dir));
            }
        }
        Ok(env)
    }

    /// Copy the theme's static files into `destination`.
    ///
    /// Returns the copied paths relative to `destination`.
    pub fn copy_static_files(&self, destination: &Path) -> Result<Vec<PathBuf>> {
        match self {
            Theme::Builtin => {
                let mut copied = Vec::new();
                for (name, content) in BUILTIN_STATIC {
                    let target = destination.join(name);
                    fs::write(&target, content)
                        .with_context(|| format!("writing {}", target.display()))?;
                    copied.push(PathBuf::from(name));
                }
                Ok(copied)
            }
            Theme::Directory(dir) => {
                let static_dir = dir.join(STATIC_DIR_NAME);
                if !static_dir.is_dir() {
                    return Ok(Vec::new());
                }
                copy_tree(&static_dir, destination)
            }
        }
    }
}

/// Fetch `index.jinja`, turning a missing template into a readable error
pub fn load_template<'env>(env: &'env Environment<'static>, theme: &Theme) -> Result<Template<'env, 'env>> {
    env.get_template(TEMPLATE_INDEX_FILE_NAME).map_err(|err| {
        if err.kind() == ErrorKind::TemplateNotFound {
            anyhow!(
                "no {} found in theme {}",
                TEMPLATE_INDEX_FILE_NAME,
                theme.name()
            )
        } else {
            anyhow!(err).context(format!("loading theme {}", theme.name()))
        }
    })
}

/// Recursively copy the files below `source` into `destination`, merging
/// with anything already there.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{} escapes {}", entry.path().display(), source.display()))?
            .to_path_buf();
        let target = destination.join(&relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).with_context(|| format!("creating {}", target.display()))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!("copying {} to {}", entry.path().display(), target.display())
            })?;
            copied.push(relative);
        }
    }
    Ok(copied)
}
