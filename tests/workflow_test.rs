//! End-to-end tests of `load` and `save` over real workspaces.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::TestWorkspace;
use googletest::prelude::*;
use ioblate::Workspace;
use ioblate::workflow::{
    ProcessError,
    WorkspaceError,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const WIDGET: &str = "var systemDictionary = {\"Hello\": {\"en\": \"Hello\", \"de\": \"Hallo\"}};\n";

#[rstest]
fn test_widget_load_then_save() {
    let test = TestWorkspace::new();
    test.write("widget.js", WIDGET);

    let report = test.workspace().load();

    assert_that!(report.literals, eq(1));
    assert_that!(report.created, elements_are![eq("de"), eq("en")]);
    assert_that!(report.errors, is_empty());
    assert_eq!(test.read("i18n/words-en.json"), "{\n  \"widget.js#Hello\": \"Hello\"\n}");
    assert_eq!(test.read("i18n/words-de.json"), "{\n  \"widget.js#Hello\": \"Hallo\"\n}");

    test.write("i18n/words-de.json", "{\n  \"widget.js#Hello\": \"Hallo!\"\n}");
    let report = test.workspace().save();

    assert_that!(report.updated_files, elements_are![eq("widget.js")]);
    assert_that!(report.replaced_sections, eq(1));
    assert_that!(report.errors, is_empty());
    assert_eq!(
        test.read("widget.js"),
        "var systemDictionary = {\n  \"Hello\": {\n    \"en\": \"Hello\",\n    \"de\": \"Hallo!\"\n  }\n};\n"
    );
}

#[rstest]
fn test_load_is_idempotent() {
    let test = TestWorkspace::new();
    test.write("widget.js", WIDGET);
    test.workspace().load();
    let en = test.read("i18n/words-en.json");
    let de = test.read("i18n/words-de.json");

    let report = test.workspace().load();

    assert_that!(report.created, is_empty());
    assert_that!(report.updated, is_empty());
    assert_that!(report.unchanged, elements_are![eq("de"), eq("en")]);
    assert_eq!(test.read("i18n/words-en.json"), en);
    assert_eq!(test.read("i18n/words-de.json"), de);
}

#[rstest]
fn test_load_prunes_keys_missing_from_sources() {
    let test = TestWorkspace::new();
    test.write(
        "widget.js",
        "var systemDictionary = {\"Hello\": {\"en\": \"Hello\", \"de\": \"Hallo\"}, \"Bye\": {\"en\": \"Bye\"}};\n",
    );
    test.workspace().load();
    test.write("i18n/words-fr.json", "{\"widget.js#Hello\": \"Bonjour\", \"old.js#Gone\": \"x\"}");
    test.write("widget.js", "var systemDictionary = {\"Bye\": {\"en\": \"Bye\"}};\n");

    let report = test.workspace().load();

    assert_that!(report.updated, elements_are![eq("de"), eq("en"), eq("fr")]);
    assert_eq!(test.read("i18n/words-en.json"), "{\n  \"widget.js#Bye\": \"Bye\"\n}");
    assert_eq!(test.read("i18n/words-de.json"), "{}");
    assert_eq!(test.read("i18n/words-fr.json"), "{}");
}

#[rstest]
fn test_load_keeps_persisted_values() {
    let test = TestWorkspace::new();
    test.write("widget.js", WIDGET);
    test.write("i18n/words-de.json", "{\n  \"widget.js#Hello\": \"Servus\"\n}");

    let report = test.workspace().load();

    assert_that!(report.created, elements_are![eq("en")]);
    assert_that!(report.unchanged, elements_are![eq("de")]);
    assert_eq!(test.read("i18n/words-de.json"), "{\n  \"widget.js#Hello\": \"Servus\"\n}");
}

#[rstest]
fn test_save_prefers_persisted_values_and_keeps_untouched_entries() {
    let test = TestWorkspace::new();
    test.write(
        "greet.js",
        "function init() {\n    _systemDictionary = {\n        'Hello': {'en': 'Hello', 'de': 'Hallo'},\n        'Keep': {'en': 'Keep'}\n    };\n}\n",
    );
    test.write("i18n/words-en.json", "{\"greet.js#Hello\": \"Hi\", \"greet.js#Unknown\": \"X\"}");
    test.write("i18n/words-ru.json", "{\"greet.js#Hello\": \"Привет\"}");

    let report = test.workspace().save();

    assert_that!(report.errors, is_empty());
    assert_eq!(
        test.read("greet.js"),
        "function init() {\n    _systemDictionary = {\n      \"Hello\": {\n        \"en\": \"Hi\",\n        \"de\": \"Hallo\",\n        \"ru\": \"Привет\"\n      },\n      \"Keep\": {\n        \"en\": \"Keep\"\n      }\n    };\n}\n"
    );
}

#[rstest]
fn test_markup_literal_round_trip() {
    let page = "<html>\n<head>\n  <script>\n    systemDictionary = {\n      \"Save\": {\"en\": \"Save\", \"de\": \"Speichern\"}\n    };\n  </script>\n</head>\n<body>Save</body>\n</html>\n";
    let test = TestWorkspace::new();
    test.write("admin/page.html", page);

    let report = test.workspace().load();

    assert_that!(report.literals, eq(1));
    assert_eq!(test.read("i18n/words-de.json"), "{\n  \"admin/page.html#Save\": \"Speichern\"\n}");

    test.write("i18n/words-de.json", "{\"admin/page.html#Save\": \"Sichern\"}");
    let report = test.workspace().save();

    assert_that!(report.updated_files, elements_are![eq("admin/page.html")]);
    assert_eq!(
        test.read("admin/page.html"),
        "<html>\n<head>\n  <script>\n    systemDictionary = {\n      \"Save\": {\n        \"en\": \"Save\",\n        \"de\": \"Sichern\"\n      }\n    };\n  </script>\n</head>\n<body>Save</body>\n</html>\n"
    );
}

#[rstest]
fn test_markup_is_skipped_when_scripts_have_literals() {
    let test = TestWorkspace::new();
    test.write("widget.js", WIDGET);
    test.write("page.html", "<script>systemDictionary = {\"Page\": {\"en\": \"Page\"}};</script>");

    test.workspace().load();

    assert_eq!(test.read("i18n/words-en.json"), "{\n  \"widget.js#Hello\": \"Hello\"\n}");
}

#[rstest]
fn test_empty_script_literal_falls_back_to_markup() {
    let test = TestWorkspace::new();
    test.write("lib.js", "var systemDictionary = {};\n");
    test.write(
        "admin/index.html",
        "<script>systemDictionary = {\"Save\": {\"en\": \"Save\"}};</script>",
    );
    test.write("i18n/words-en.json", "{\n  \"admin/index.html#Save\": \"Save\"\n}");

    let report = test.workspace().load();

    assert_that!(report.literals, eq(2));
    assert_that!(report.unchanged, elements_are![eq("en")]);
    assert_eq!(test.read("i18n/words-en.json"), "{\n  \"admin/index.html#Save\": \"Save\"\n}");
}

#[rstest]
fn test_empty_literals_leave_datasets_untouched() {
    let test = TestWorkspace::new();
    test.write("lib.js", "var systemDictionary = {};\n");
    test.write("i18n/words-en.json", "{\"old.js#Keep\": \"Keep\"}");

    let report = test.workspace().load();

    assert_that!(report.literals, eq(1));
    assert_eq!(test.read("i18n/words-en.json"), "{\"old.js#Keep\": \"Keep\"}");
}

#[rstest]
fn test_configuration_file() {
    let test = TestWorkspace::new();
    test.write(
        ".ioblate.json",
        "{\n  // project layout\n  \"outputDir\": \"locales\",\n  \"markupScan\": \"always\",\n  \"identifiers\": [\"dict\"],\n}",
    );
    test.write("app.js", "var dict = {\"X\": {\"en\": \"X\"}};\nvar systemDictionary = {\"Z\": {\"en\": \"Z\"}};\n");
    test.write("page.html", "<script>dict = {\"Y\": {\"en\": \"Y\"}};</script>");

    test.workspace().load();

    assert!(!test.exists("i18n"));
    assert_eq!(
        test.read("locales/words-en.json"),
        "{\n  \"app.js#X\": \"X\",\n  \"page.html#Y\": \"Y\"\n}"
    );
}

#[rstest]
fn test_invalid_configuration_is_rejected() {
    let test = TestWorkspace::new();
    test.write(".ioblate.json", "{\"indentWidth\": 0}");

    let result = Workspace::open(test.path(""));

    assert!(matches!(result, Err(WorkspaceError::Config(_))));
}

#[rstest]
fn test_failed_literal_does_not_stop_others() {
    let test = TestWorkspace::new();
    test.write(
        "mixed.js",
        "var systemDictionary = {\"A\": {\"en\": lookup(\"A\")}};\nsystemDictionary = {\"B\": {\"en\": \"B\"}};\n",
    );
    test.write("broken.js", "var systemDictionary = {\"C\": {\"en\": \"C\"};\n");

    let report = test.workspace().load();

    assert_that!(report.literals, eq(1));
    assert_that!(report.errors, len(eq(2)));
    assert!(report.errors.iter().any(|e| matches!(e, ProcessError::Evaluation { path, .. } if path == "mixed.js")));
    assert!(report.errors.iter().any(|e| matches!(e, ProcessError::Parse { path, .. } if path == "broken.js")));
    assert_eq!(test.read("i18n/words-en.json"), "{\n  \"mixed.js#B\": \"B\"\n}");
}

#[rstest]
fn test_nothing_written_without_literals() {
    let test = TestWorkspace::new();
    test.write("notes.js", "var x = 1;\n");
    test.write("i18n/words-en.json", "{\"a.js#A\": \"A\"}");

    let report = test.workspace().load();

    assert_that!(report.literals, eq(0));
    assert_eq!(test.read("i18n/words-en.json"), "{\"a.js#A\": \"A\"}");
}

#[rstest]
fn test_save_skips_missing_targets() {
    let test = TestWorkspace::new();
    test.write("widget.js", WIDGET);
    test.write(
        "i18n/words-en.json",
        "{\"gone.js#X\": \"x\", \"../outside.js#Y\": \"y\", \"widget.js#Hello\": \"Hi\"}",
    );

    let report = test.workspace().save();

    assert_that!(report.updated_files, elements_are![eq("widget.js")]);
    assert_that!(report.errors, len(eq(2)));
    assert!(report.errors.iter().all(|e| matches!(e, ProcessError::MissingTarget { .. })));
    assert!(test.read("widget.js").contains("\"en\": \"Hi\""));
}

#[rstest]
fn test_second_save_leaves_file_unchanged() {
    let test = TestWorkspace::new();
    test.write("widget.js", WIDGET);
    test.workspace().load();
    test.workspace().save();
    let saved = test.read("widget.js");

    let report = test.workspace().save();

    assert_that!(report.updated_files, is_empty());
    assert_that!(report.unchanged_files, elements_are![eq("widget.js")]);
    assert_eq!(test.read("widget.js"), saved);
}

#[rstest]
fn test_legacy_encoded_source() {
    let test = TestWorkspace::new();
    let mut source = b"var systemDictionary = {\"Hi\": {\"ru\": \"".to_vec();
    source.extend_from_slice(&[0xcf, 0xf0, 0xe8, 0xe2, 0xe5, 0xf2]);
    source.extend_from_slice(b"\"}};\n");
    test.write("legacy.js", source);

    test.workspace().load();

    assert_eq!(test.read("i18n/words-ru.json"), "{\n  \"legacy.js#Hi\": \"Привет\"\n}");
}
