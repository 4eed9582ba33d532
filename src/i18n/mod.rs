// SPDX-License-Identifier: PMPL-1.0-or-later

//! Page languages for generated galleries.
//!
//! A gallery is published in exactly two static locales. Every localized
//! element in the page carries a `data-locale` attribute and only the elements
//! of the active locale are shown. The active locale starts from the browser's
//! preferred languages and the visitor can flip it with the toggle button.
//!
//! | Code | Language | Native name |
//! |------|----------|-------------|
//! | en   | English  | English     |
//! | de   | German   | Deutsch     |
//! | fr   | French   | Français    |
//! | es   | Spanish  | Español     |
//! | ja   | Japanese | 日本語       |
//!
//! Page labels (button captions, photo counters) come from a static catalog
//! compiled into the binary. Lookups fall back to English, and unknown keys
//! resolve to an empty string.

mod catalog;
mod iso639;
mod locale;

pub use catalog::{labels, t, Lang, LABEL_KEYS};
pub use iso639::{is_valid_iso639_1, language_name, native_name};
pub use locale::{visible_for, LocalePair};
