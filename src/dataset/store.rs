//! Persisted per-locale datasets: `<outputDir>/words-<locale>.json`.

use std::path::{
    Path,
    PathBuf,
};

use encoding_rs::Encoding;
use jsonc_parser::ParseOptions;
use serde_json::Value;

use super::types::{
    DatasetError,
    LocaleEntries,
    value_kind,
};
use crate::input::{
    read_text_file,
    write_text_file,
};

/// Common start of every dataset file name.
const FILE_PREFIX: &str = "words-";
/// Extension of every dataset file.
const FILE_EXTENSION: &str = ".json";

/// A dataset file found in the output directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PersistedDataset {
    /// Locale taken from the file name.
    pub locale: String,
    /// Absolute path of the file.
    pub path: PathBuf,
}

/// File name of the dataset for `locale`.
#[must_use]
pub fn dataset_file_name(locale: &str) -> String {
    format!("{FILE_PREFIX}{locale}{FILE_EXTENSION}")
}

/// Detects the locale from a dataset file name.
///
/// e.g., `i18n/words-de.json` -> `de`. Locales never contain dots.
#[must_use]
pub fn locale_from_path(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let locale = file_name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_EXTENSION)?;

    if locale.is_empty() || locale.contains('.') {
        return None;
    }
    Some(locale.to_string())
}

/// Lists the dataset files in `dir`, sorted by locale.
///
/// A missing directory holds no datasets.
pub fn list_datasets(dir: &Path) -> Result<Vec<PersistedDataset>, DatasetError> {
    if !dir.is_dir() {
        tracing::debug!("Dataset directory not found: {:?}", dir);
        return Ok(Vec::new());
    }

    let mut datasets = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(locale) = locale_from_path(&path) {
            datasets.push(PersistedDataset { locale, path });
        }
    }

    datasets.sort();
    Ok(datasets)
}

/// Parses dataset text. Comments and trailing commas are tolerated; an empty
/// file is an empty dataset.
pub fn parse_dataset(text: &str) -> Result<LocaleEntries, DatasetError> {
    let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|e| DatasetError::Syntax(e.to_string()))?;

    match value {
        None => Ok(LocaleEntries::new()),
        Some(Value::Object(entries)) => Ok(entries),
        Some(other) => Err(DatasetError::NotAnObject { found: value_kind(&other) }),
    }
}

/// Reads and parses the dataset at `path`.
pub fn read_dataset(path: &Path, fallback: &'static Encoding) -> Result<LocaleEntries, DatasetError> {
    let text = read_text_file(path, fallback)?;
    parse_dataset(&text)
}

/// Renders entries the way datasets are stored: two-space indentation, key
/// order kept, no trailing newline.
pub fn render_dataset(entries: &LocaleEntries) -> Result<String, DatasetError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Writes a dataset, creating the directory if needed.
pub fn write_dataset(path: &Path, entries: &LocaleEntries) -> Result<(), DatasetError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    write_text_file(path, &render_dataset(entries)?)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    #[case::simple("i18n/words-de.json", Some("de"))]
    #[case::region("words-pt-BR.json", Some("pt-BR"))]
    #[case::underscore("words-zh_CN.json", Some("zh_CN"))]
    #[case::dotted("words-de.backup.json", None)]
    #[case::empty("words-.json", None)]
    #[case::other_prefix("strings-de.json", None)]
    #[case::other_extension("words-de.txt", None)]
    fn test_locale_from_path(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_that!(locale_from_path(Path::new(path)).as_deref(), eq(expected));
    }

    #[rstest]
    fn test_list_datasets_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("words-en.json"), "{}").unwrap();
        fs::write(temp.path().join("words-de.json"), "{}").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp.path().join("words-fr.json")).unwrap();

        let datasets = list_datasets(temp.path()).unwrap();

        assert_that!(
            datasets.iter().map(|d| d.locale.as_str()).collect::<Vec<_>>(),
            elements_are![eq(&"de"), eq(&"en")]
        );
    }

    #[rstest]
    fn test_list_datasets_missing_directory() {
        let temp = TempDir::new().unwrap();

        let datasets = list_datasets(&temp.path().join("i18n")).unwrap();

        assert_that!(datasets, is_empty());
    }

    #[rstest]
    #[case::object(r#"{"a.js#A": "A"}"#, json!({"a.js#A": "A"}))]
    #[case::comments("// edited\n{\"a.js#A\": \"A\",}", json!({"a.js#A": "A"}))]
    #[case::empty_file("", json!({}))]
    fn test_parse_dataset(#[case] text: &str, #[case] expected: Value) {
        assert_eq!(Value::Object(parse_dataset(text).unwrap()), expected);
    }

    #[rstest]
    #[case::array("[1]")]
    #[case::string("\"x\"")]
    fn test_parse_dataset_rejects_non_object(#[case] text: &str) {
        assert!(matches!(parse_dataset(text), Err(DatasetError::NotAnObject { .. })));
    }

    #[rstest]
    fn test_parse_dataset_syntax_error() {
        assert!(matches!(parse_dataset("{\"a\": }"), Err(DatasetError::Syntax(_))));
    }

    #[rstest]
    fn test_write_dataset_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("i18n").join(dataset_file_name("de"));
        let entries =
            json!({"widget.js#Hello": "Hallo", "a.js#Z": "Ü"}).as_object().unwrap().clone();

        write_dataset(&path, &entries).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"widget.js#Hello\": \"Hallo\",\n  \"a.js#Z\": \"Ü\"\n}"
        );
    }
}
