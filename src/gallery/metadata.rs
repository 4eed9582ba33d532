// SPDX-License-Identifier: PMPL-1.0-or-later

//! Photo metadata: EXIF fields and description files

use crate::types::{ExifData, PhotoText};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

// Longer values are binary blobs (MakerNote, PrintIM) rendered as hex.
const MAX_EXIF_VALUE_LEN: usize = 200;

/// What the gallery uses from a photo's EXIF block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifSummary {
    pub fields: ExifData,
    pub taken_at: Option<NaiveDateTime>,
    /// Raw `Orientation` value, 1 when absent
    pub orientation: u32,
}

/// Read EXIF metadata from an in-memory JPEG.
///
/// A photo without EXIF yields an empty summary; a corrupt block is reported
/// on stderr and treated the same way.
pub fn read_exif(bytes: &[u8], origin: &Path) -> ExifSummary {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return ExifSummary::empty(),
        Err(err) => {
            eprintln!("Ignoring unreadable EXIF in {}: {}", origin.display(), err);
            return ExifSummary::empty();
        }
    };

    let mut fields = ExifData::new();
    for field in exif.fields() {
        if field.ifd_num != exif::In::PRIMARY || field.tag.description().is_none() {
            continue;
        }
        let value = field.display_value().with_unit(&exif).to_string();
        if value.len() <= MAX_EXIF_VALUE_LEN {
            fields.insert(field.tag.to_string(), value);
        }
    }

    let orientation = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(1);

    let taken_at = exif
        .get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)
        .or_else(|| exif.get_field(exif::Tag::DateTime, exif::In::PRIMARY))
        .and_then(|field| match field.value {
            exif::Value::Ascii(ref values) => values.first().and_then(|raw| parse_exif_datetime(raw)),
            _ => None,
        });

    ExifSummary {
        fields,
        taken_at,
        orientation,
    }
}

impl ExifSummary {
    fn empty() -> Self {
        Self {
            orientation: 1,
            ..Self::default()
        }
    }
}

/// Parse an EXIF `YYYY:MM:DD HH:MM:SS` timestamp
pub fn parse_exif_datetime(raw: &[u8]) -> Option<NaiveDateTime> {
    let dt = exif::DateTime::from_ascii(raw).ok()?;
    NaiveDate::from_ymd_opt(dt.year.into(), dt.month.into(), dt.day.into())?.and_hms_opt(
        dt.hour.into(),
        dt.minute.into(),
        dt.second.into(),
    )
}

/// Path of the description file for `photo`, optionally localized.
///
/// `beach.jpg` → `beach.txt`, or `beach.de.txt` for German.
pub fn description_path(photo: &Path, language: Option<&str>) -> PathBuf {
    match language {
        Some(code) => photo.with_extension(format!("{}.txt", code)),
        None => photo.with_extension("txt"),
    }
}

/// Read the untranslated description file of a photo, if any
pub fn read_description_file(photo: &Path) -> Result<PhotoText> {
    let text = read_text_file(&description_path(photo, None))?.unwrap_or_default();
    if !text.is_empty() {
        println!(
            "Found title \"{}\" and {} description",
            text.title.as_deref().unwrap_or(""),
            if text.description.is_some() { "a" } else { "no" }
        );
    }
    Ok(text)
}

/// Read the localized description files of a photo
pub fn read_translations(photo: &Path, languages: &[String]) -> Result<BTreeMap<String, PhotoText>> {
    let mut translations = BTreeMap::new();
    for code in languages {
        if let Some(text) = read_text_file(&description_path(photo, Some(code)))? {
            if !text.is_empty() {
                translations.insert(code.clone(), text);
            }
        }
    }
    Ok(translations)
}

fn read_text_file(path: &Path) -> Result<Option<PhotoText>> {
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Some(parse_description(&decode_text(&bytes))))
}

/// First line is the title, second line the description. Blank lines count
/// as missing.
pub fn parse_description(content: &str) -> PhotoText {
    let mut lines = content.lines().map(str::trim);
    let mut next_field = || {
        lines
            .next()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
    };
    let title = next_field();
    let description = next_field();
    PhotoText { title, description }
}

/// UTF-8 (with or without BOM), falling back to Windows-1252 for files saved
/// by older editors.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text.into_owned();
    }
    WINDOWS_1252.decode(bytes).0.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_description() {
        let text = parse_description("  Sunset  \nOver the bay\nignored third line\n");
        assert_eq!(text.title.as_deref(), Some("Sunset"));
        assert_eq!(text.description.as_deref(), Some("Over the bay"));
    }

    #[test]
    fn blank_title_is_missing() {
        let text = parse_description("\nOnly a description");
        assert_eq!(text.title, None);
        assert_eq!(text.description.as_deref(), Some("Only a description"));
    }

    #[test]
    fn empty_file_is_empty() {
        assert!(parse_description("").is_empty());
    }

    #[test]
    fn bom_is_stripped() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFHafen"), "Hafen");
    }

    #[test]
    fn latin1_fallback() {
        assert_eq!(decode_text(b"K\xF6ln"), "Köln");
    }

    #[test]
    fn description_paths() {
        let photo = Path::new("/photos/beach.jpg");
        assert_eq!(description_path(photo, None), Path::new("/photos/beach.txt"));
        assert_eq!(
            description_path(photo, Some("de")),
            Path::new("/photos/beach.de.txt")
        );
    }

    #[test]
    fn exif_timestamp() {
        let parsed = parse_exif_datetime(b"2023:07:14 18:30:05").expect("valid timestamp");
        assert_eq!(parsed.to_string(), "2023-07-14 18:30:05");
        assert!(parse_exif_datetime(b"not a date").is_none());
    }

    #[test]
    fn missing_exif_is_empty() {
        let summary = read_exif(b"\xFF\xD8\xFF\xD9", Path::new("blank.jpg"));
        assert!(summary.fields.is_empty());
        assert_eq!(summary.orientation, 1);
        assert_eq!(summary.taken_at, None);
    }
}
