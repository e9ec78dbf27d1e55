//! Load direction: source literals into per-locale datasets.

use std::collections::{
    BTreeMap,
    HashSet,
};

use serde_json::Value;

use super::key::QualifiedKey;
use super::types::{
    DatasetError,
    LocaleEntries,
    value_kind,
};

/// Everything found while scanning sources during one `load` run.
///
/// Created empty, filled by [`LoadAggregate::record_literal`] for every
/// evaluated literal, then merged into each persisted dataset.
#[derive(Debug, Default)]
pub struct LoadAggregate {
    /// Locale to qualified key to translation.
    found: BTreeMap<String, LocaleEntries>,
    /// Every qualified key seen in a literal, with or without translations.
    known_keys: HashSet<String>,
    /// Literals recorded, including empty ones.
    literal_count: usize,
    /// Key and locale pairs recorded.
    translation_count: usize,
}

/// Result of merging one locale's findings into its persisted dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMerge {
    /// The dataset after the merge.
    pub entries: LocaleEntries,
    /// Keys appended from the sources.
    pub added: Vec<String>,
    /// Keys dropped because no source has them anymore.
    pub removed: Vec<String>,
    /// No dataset existed for the locale before
    pub created: bool,
}

impl LoadMerge {
    /// Returns true if the dataset has to be written.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.created || !self.added.is_empty() || !self.removed.is_empty()
    }
}

impl LoadAggregate {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the translations of one evaluated literal from `file`.
    ///
    /// Every top-level key of the literal counts as present in the sources,
    /// whether or not it has translations. A later literal overrides an
    /// earlier one for the same qualified key and locale.
    ///
    /// # Errors
    /// Returns `DatasetError::NotAnObject` if the literal is not an object.
    /// Keys whose value is not an object of locales are skipped.
    pub fn record_literal(&mut self, file: &str, literal: &Value) -> Result<usize, DatasetError> {
        let Value::Object(keys) = literal else {
            return Err(DatasetError::NotAnObject { found: value_kind(literal) });
        };

        let mut recorded = 0;
        for (key, locales) in keys {
            let qualified = QualifiedKey::new(file, key.as_str()).to_string();
            self.known_keys.insert(qualified.clone());

            let Value::Object(locales) = locales else {
                tracing::warn!(
                    "Ignoring `{qualified}`: expected an object of locales, found {}",
                    value_kind(locales)
                );
                continue;
            };

            for (locale, translation) in locales {
                self.found
                    .entry(locale.clone())
                    .or_default()
                    .insert(qualified.clone(), translation.clone());
                recorded += 1;
            }
        }

        self.literal_count += 1;
        self.translation_count += recorded;
        Ok(recorded)
    }

    /// Number of literals recorded so far.
    #[must_use]
    pub const fn literal_count(&self) -> usize {
        self.literal_count
    }

    /// Number of key and locale pairs recorded so far.
    #[must_use]
    pub const fn translation_count(&self) -> usize {
        self.translation_count
    }

    /// Returns true if not a single translation was recorded.
    ///
    /// Literals without any key and locale pair leave the aggregate empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.translation_count == 0
    }

    /// Locales that appear in at least one literal, sorted.
    pub fn found_locales(&self) -> impl Iterator<Item = &str> {
        self.found.keys().map(String::as_str)
    }

    /// Returns true if some literal has the qualified key.
    #[must_use]
    pub fn is_known(&self, qualified: &str) -> bool {
        self.known_keys.contains(qualified)
    }

    /// Merges the findings for `locale` into its persisted entries.
    ///
    /// Without a persisted dataset the result is exactly the findings.
    /// Otherwise entries that are missing are appended, existing values are
    /// kept, and entries whose key is no longer in any source are removed.
    #[must_use]
    pub fn merge_locale(&self, locale: &str, existing: Option<LocaleEntries>) -> LoadMerge {
        let found = self.found.get(locale);

        let Some(mut entries) = existing else {
            return LoadMerge {
                entries: found.cloned().unwrap_or_default(),
                added: Vec::new(),
                removed: Vec::new(),
                created: true,
            };
        };

        let mut added = Vec::new();
        for (key, translation) in found.into_iter().flatten() {
            if !entries.contains_key(key) {
                entries.insert(key.clone(), translation.clone());
                added.push(key.clone());
            }
        }

        let mut removed = Vec::new();
        entries.retain(|key, _| {
            let keep = self.is_known(key);
            if !keep {
                removed.push(key.clone());
            }
            keep
        });

        LoadMerge { entries, added, removed, created: false }
    }
}
