// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for phogg

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bounding box (max width, max height) of one generated image size.
pub type Size = (u32, u32);

/// Generated sizes, largest first. The width doubles as the directory name.
pub const TARGET_RESOLUTIONS: [Size; 4] = [(1920, 1080), (1280, 720), (640, 360), (320, 180)];

/// EXIF tag name to human-readable value.
pub type ExifData = BTreeMap<String, String>;

/// Encoded format of the generated images
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    Jpeg,
    Webp,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Webp => "image/webp",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Jpeg => write!(f, "JPEG"),
            OutputFormat::Webp => write!(f, "WEBP"),
        }
    }
}

/// Settings for one processing run
#[derive(Debug, Clone)]
pub struct ProcessingOptions {
    pub format: OutputFormat,
    /// 0-100; ignored for WebP, which is always written lossless
    pub quality: u8,
    /// Locale codes to look for `<stem>.<code>.txt` description files
    pub languages: Vec<String>,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: 80,
            languages: Vec::new(),
        }
    }
}

/// Title and description read from a photo's description file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoText {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PhotoText {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// A processed photo, ready for the page template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Output file name, identical in every size directory
    pub file_name: String,
    /// Available max widths, ascending
    pub sizes: Vec<u32>,
    /// Pixel dimensions of the largest generated copy
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub text: PhotoText,
    /// Localized texts by language code
    pub translations: BTreeMap<String, PhotoText>,
    pub exif: ExifData,
    pub taken_at: Option<NaiveDateTime>,
}

impl Photo {
    /// Smallest generated size, used as the fallback `src`
    pub fn default_size(&self) -> u32 {
        self.sizes.first().copied().unwrap_or_default()
    }

    /// Site-relative URL of the copy with the given max width
    pub fn url(&self, width: u32) -> String {
        format!("img/{}/{}", width, self.file_name)
    }

    /// Site-relative URL of the default copy
    pub fn path(&self) -> String {
        self.url(self.default_size())
    }

    /// `srcset` attribute value covering every size
    pub fn srcset(&self) -> String {
        self.sizes
            .iter()
            .map(|width| format!("{} {}w", self.url(*width), width))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn title(&self) -> Option<&str> {
        self.text.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.text.description.as_deref()
    }

    /// Text for a language, falling back to the untranslated description file
    pub fn text_for(&self, code: &str) -> &PhotoText {
        self.translations.get(code).unwrap_or(&self.text)
    }
}

impl std::fmt::Display for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name)
    }
}
