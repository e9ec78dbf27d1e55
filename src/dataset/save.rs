//! Save direction: per-locale datasets back into source literals.

use std::collections::BTreeMap;

use serde_json::Value;

use super::key::QualifiedKey;
use super::types::{
    DatasetError,
    FileTranslations,
    LocaleEntries,
    value_kind,
};

/// Persisted translations regrouped by source file for one `save` run.
#[derive(Debug, Default)]
pub struct SaveAggregate {
    /// Source file to its translations.
    files: BTreeMap<String, FileTranslations>,
}

/// Counts of what a save merge changed in one literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveMerge {
    /// Existing locales that got a new value.
    pub updated: usize,
    /// Locales appended to a key.
    pub added: usize,
}

impl SaveAggregate {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Regroups the entries of one locale's dataset by file and local key.
    ///
    /// Returns the number of entries taken; entries without a file
    /// qualifier are skipped.
    pub fn record_dataset(&mut self, locale: &str, entries: &LocaleEntries) -> usize {
        let mut recorded = 0;
        for (qualified, translation) in entries {
            let Some(QualifiedKey { file, key }) = QualifiedKey::parse(qualified) else {
                tracing::warn!("Ignoring `{qualified}` in locale {locale}: no file qualifier");
                continue;
            };

            self.files
                .entry(file)
                .or_default()
                .entry(key)
                .or_default()
                .insert(locale.to_string(), translation.clone());
            recorded += 1;
        }
        recorded
    }

    /// Source files referenced by the datasets, sorted, with their translations.
    pub fn files(&self) -> impl Iterator<Item = (&str, &FileTranslations)> {
        self.files.iter().map(|(file, translations)| (file.as_str(), translations))
    }
}

/// Merges `supplied` translations into an evaluated literal.
///
/// Only keys already in the literal are touched. For each of them, locales
/// the literal has are overwritten by a supplied value, then supplied
/// locales it lacks are appended. Locales without a supplied value keep
/// their current text.
///
/// # Errors
/// Returns `DatasetError::NotAnObject` if the literal is not an object.
pub fn merge_for_save(
    literal: &mut Value,
    supplied: &FileTranslations,
) -> Result<SaveMerge, DatasetError> {
    let kind = value_kind(literal);
    let Value::Object(keys) = literal else {
        return Err(DatasetError::NotAnObject { found: kind });
    };

    let mut merge = SaveMerge::default();
    for (key, locales) in keys.iter_mut() {
        let Some(translations) = supplied.get(key) else {
            continue;
        };
        let Value::Object(locales) = locales else {
            tracing::warn!("Not updating `{key}`: its value is not an object of locales");
            continue;
        };

        for (locale, current) in locales.iter_mut() {
            if let Some(translation) = translations.get(locale).filter(|t| **t != *current) {
                current.clone_from(translation);
                merge.updated += 1;
            }
        }

        for (locale, translation) in translations {
            if !locales.contains_key(locale) {
                locales.insert(locale.clone(), translation.clone());
                merge.added += 1;
            }
        }
    }

    Ok(merge)
}
