// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation catalog for gallery page labels.
//!
//! ## Adding a new language
//!
//! 1. Add a variant to [`Lang`] and its arms in `code()` / `from_code()`
//! 2. Create a `const XX: &[(&str, &str)]` table below
//! 3. Add `Lang::Xx => XX` to `catalog_for()`
//!
//! ## Adding a new key
//!
//! Add the English entry to `EN` and to [`LABEL_KEYS`] if themes should see
//! it, then translate it in the other tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Languages a gallery page can be published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    De,
    Fr,
    Es,
    Ja,
}

impl Lang {
    /// ISO 639-1 two-letter code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::De => "de",
            Lang::Fr => "fr",
            Lang::Es => "es",
            Lang::Ja => "ja",
        }
    }

    /// Parse a lowercase ISO 639-1 code.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "de" => Some(Lang::De),
            "fr" => Some(Lang::Fr),
            "es" => Some(Lang::Es),
            "ja" => Some(Lang::Ja),
            _ => None,
        }
    }

    /// Parse a browser locale tag such as `de-AT`, `en_US` or `FR`.
    ///
    /// Only the primary language subtag is considered.
    pub fn from_locale(tag: &str) -> Option<Lang> {
        let primary = tag.trim().split(['-', '_']).next()?;
        Lang::from_code(&primary.to_ascii_lowercase())
    }

    pub fn all() -> &'static [Lang] {
        &[Lang::En, Lang::De, Lang::Fr, Lang::Es, Lang::Ja]
    }
}

impl Default for Lang {
    fn default() -> Self {
        Lang::En
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Keys exposed to page templates as `labels`.
pub const LABEL_KEYS: &[&str] = &[
    "gallery.previous",
    "gallery.next",
    "gallery.language",
    "gallery.photos",
    "gallery.taken",
    "gallery.camera",
    "gallery.empty",
];

/// Look up `key` in `lang`, falling back to English.
///
/// Returns an empty string when the key is unknown in English too.
pub fn t(lang: Lang, key: &str) -> &'static str {
    if let Some(value) = lookup(catalog_for(lang), key) {
        return value;
    }
    if lang != Lang::En {
        if let Some(value) = lookup(EN, key) {
            return value;
        }
    }
    ""
}

/// All template labels for `lang`, keyed by the part after `gallery.`.
pub fn labels(lang: Lang) -> BTreeMap<&'static str, &'static str> {
    LABEL_KEYS
        .iter()
        .map(|key| {
            let short = key.strip_prefix("gallery.").unwrap_or(key);
            (short, t(lang, key))
        })
        .collect()
}

fn lookup(catalog: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    catalog
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}

fn catalog_for(lang: Lang) -> &'static [(&'static str, &'static str)] {
    match lang {
        Lang::En => EN,
        Lang::De => DE,
        Lang::Fr => FR,
        Lang::Es => ES,
        Lang::Ja => JA,
    }
}

// ─── English (source language, all keys defined here) ──────────────

const EN: &[(&str, &str)] = &[
    ("gallery.previous", "Previous"),
    ("gallery.next", "Next"),
    ("gallery.language", "Language"),
    ("gallery.photos", "photos"),
    ("gallery.taken", "Taken on"),
    ("gallery.camera", "Camera"),
    ("gallery.empty", "No photos yet."),
];

// ─── German ─────────────────────────────────────────────────────────

const DE: &[(&str, &str)] = &[
    ("gallery.previous", "Zurück"),
    ("gallery.next", "Weiter"),
    ("gallery.language", "Sprache"),
    ("gallery.photos", "Fotos"),
    ("gallery.taken", "Aufgenommen am"),
    ("gallery.camera", "Kamera"),
    ("gallery.empty", "Noch keine Fotos."),
];

// ─── French ─────────────────────────────────────────────────────────

const FR: &[(&str, &str)] = &[
    ("gallery.previous", "Précédent"),
    ("gallery.next", "Suivant"),
    ("gallery.language", "Langue"),
    ("gallery.photos", "photos"),
    ("gallery.taken", "Pris le"),
    ("gallery.camera", "Appareil"),
    ("gallery.empty", "Pas encore de photos."),
];

// ─── Spanish ────────────────────────────────────────────────────────

const ES: &[(&str, &str)] = &[
    ("gallery.previous", "Anterior"),
    ("gallery.next", "Siguiente"),
    ("gallery.language", "Idioma"),
    ("gallery.photos", "fotos"),
    ("gallery.taken", "Tomada el"),
    ("gallery.camera", "Cámara"),
    ("gallery.empty", "Todavía no hay fotos."),
];

// ─── Japanese ───────────────────────────────────────────────────────

const JA: &[(&str, &str)] = &[
    ("gallery.previous", "前へ"),
    ("gallery.next", "次へ"),
    ("gallery.language", "言語"),
    ("gallery.photos", "枚の写真"),
    ("gallery.taken", "撮影日"),
    ("gallery.camera", "カメラ"),
    ("gallery.empty", "写真はまだありません。"),
];
