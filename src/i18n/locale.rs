// SPDX-License-Identifier: PMPL-1.0-or-later

//! Two-state locale selection for a gallery page.

use super::catalog::Lang;
use serde::{Deserialize, Serialize};

/// The two locales a gallery is published in.
///
/// `primary` is the fallback: it wins whenever the browser prefers neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalePair {
    pub primary: Lang,
    pub secondary: Lang,
}

impl LocalePair {
    pub fn new(primary: Lang, secondary: Lang) -> Self {
        Self { primary, secondary }
    }

    /// Pick the initial locale from the browser's preferred languages.
    ///
    /// The first preference naming either locale decides; otherwise the
    /// primary locale is used.
    pub fn select<S: AsRef<str>>(&self, browser_locales: &[S]) -> Lang {
        browser_locales
            .iter()
            .filter_map(|tag| Lang::from_locale(tag.as_ref()))
            .find(|lang| *lang == self.primary || *lang == self.secondary)
            .unwrap_or(self.primary)
    }

    /// The other locale of the pair.
    ///
    /// A language outside the pair toggles to the primary locale.
    pub fn toggle(&self, current: Lang) -> Lang {
        if current == self.primary {
            self.secondary
        } else {
            self.primary
        }
    }

    pub fn as_array(&self) -> [Lang; 2] {
        [self.primary, self.secondary]
    }
}

impl Default for LocalePair {
    fn default() -> Self {
        Self::new(Lang::En, Lang::De)
    }
}

/// Whether an element tagged with `element_locale` is shown for `active`.
///
/// Untagged elements are always visible. Tags are matched on their primary
/// language subtag, so `de-CH` content shows for German.
pub fn visible_for(element_locale: Option<&str>, active: Lang) -> bool {
    match element_locale.map(str::trim) {
        None | Some("") => true,
        Some(tag) => Lang::from_locale(tag) == Some(active),
    }
}
