//! The `load` and `save` runs over a workspace.
//!
//! Every file is handled on its own: a failure is logged, recorded in the
//! run's report and the run moves on to the next literal or file.
mod load;
mod save;
pub mod types;

use std::path::{
    Component,
    Path,
    PathBuf,
};

use encoding_rs::Encoding;
use serde_json::Value;
pub use types::{
    LoadReport,
    ProcessError,
    SaveReport,
    WorkspaceError,
};

use crate::config::{
    FileMatcher,
    Settings,
    load_settings,
};
use crate::input::discovery::relative_name;
use crate::input::encoding::fallback_encoding;
use crate::input::{
    SourceLanguage,
    WorkspaceFile,
    read_text_file,
};
use crate::literal::evaluate;
use crate::syntax::{
    LiteralMatch,
    locate_dictionaries,
};
use crate::types::SourceRange;

/// A workspace root together with its settings.
#[derive(Debug)]
pub struct Workspace {
    /// Directory every relative name is resolved against.
    root: PathBuf,
    /// Validated settings.
    settings: Settings,
    /// Compiled file patterns.
    matcher: FileMatcher,
    /// Encoding for files that are not valid UTF-8.
    fallback: &'static Encoding,
}

/// A source file with the literals that evaluated successfully.
#[derive(Debug)]
struct ScannedFile {
    /// Decoded file content.
    text: String,
    /// Literals in document order.
    literals: Vec<EvaluatedLiteral>,
}

/// A located literal and its data.
#[derive(Debug)]
struct EvaluatedLiteral {
    /// Where the literal sits.
    literal: LiteralMatch,
    /// Statement range, for messages.
    range: SourceRange,
    /// Evaluated data.
    value: Value,
}

/// Logs a per-file failure and keeps it for the report.
fn record(errors: &mut Vec<ProcessError>, error: ProcessError) {
    tracing::warn!("{error}");
    errors.push(error);
}

impl Workspace {
    /// Creates a workspace from already validated settings.
    pub fn new(root: impl Into<PathBuf>, settings: Settings) -> Result<Self, WorkspaceError> {
        let root = root.into();
        let matcher = FileMatcher::new(root.clone(), &settings)?;
        let fallback = fallback_encoding(&settings.fallback_encoding);

        Ok(Self { root, settings, matcher, fallback })
    }

    /// Opens the workspace at `root`, reading `.ioblate.json` if present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let root = root.into();
        let settings = load_settings(&root)?;
        Self::new(root, settings)
    }

    /// Directory holding the persisted datasets.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.settings.output_dir)
    }

    /// Name of `path` relative to the workspace root, for messages and keys.
    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.display().to_string(), relative_name)
    }

    /// Resolves a workspace-relative name from a dataset key.
    ///
    /// Names that would leave the workspace resolve to nothing.
    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative);
        relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }

    /// Reads one file, locates its dictionary literals and evaluates them.
    ///
    /// Returns `None` if the file as a whole could not be used. Literals
    /// that fail to evaluate are recorded and left out.
    fn scan_file(&self, file: &WorkspaceFile, errors: &mut Vec<ProcessError>) -> Option<ScannedFile> {
        let Some(language) = SourceLanguage::from_path(&file.path) else {
            record(errors, ProcessError::UnsupportedFile { path: file.relative.clone() });
            return None;
        };

        let text = match read_text_file(&file.path, self.fallback) {
            Ok(text) => text,
            Err(source) => {
                record(errors, ProcessError::Read { path: file.relative.clone(), source });
                return None;
            }
        };

        let located = match locate_dictionaries(&text, language, &self.settings.identifiers) {
            Ok(located) => located,
            Err(source) => {
                record(errors, ProcessError::Parse { path: file.relative.clone(), source });
                return None;
            }
        };

        let mut literals = Vec::new();
        for literal in located {
            let range = SourceRange::from_span(&text, literal.statement);
            tracing::info!("Found {} in {} from {range}", literal.identifier, file.relative);

            match evaluate(&text, literal.value) {
                Ok(value) => literals.push(EvaluatedLiteral { literal, range, value }),
                Err(source) => record(
                    errors,
                    ProcessError::Evaluation { path: file.relative.clone(), range, source },
                ),
            }
        }

        Some(ScannedFile { text, literals })
    }
}
