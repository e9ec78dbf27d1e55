//! Workflow type definitions.

use thiserror::Error;

use crate::config::{
    ConfigError,
    MatcherError,
};
use crate::dataset::DatasetError;
use crate::literal::EvaluationError;
use crate::splice::SpliceError;
use crate::syntax::LocateError;
use crate::types::SourceRange;

/// Errors that make a workspace unusable before any file is touched.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// `.ioblate.json` could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A configured glob pattern is invalid
    #[error("Invalid file patterns: {0}")]
    Matcher(#[from] MatcherError),
}

/// A failure confined to one file or one literal. The run continues.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The source file could not be read
    #[error("Couldn't read {path}: {source}")]
    Read {
        /// Workspace-relative file name
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// The source file could not be parsed
    #[error("Couldn't parse {path}: {source}")]
    Parse {
        /// Workspace-relative file name
        path: String,
        /// Why locating failed
        source: LocateError,
    },
    /// A located literal is not plain data
    #[error("Couldn't evaluate the literal in {path} from {range}: {source}")]
    Evaluation {
        /// Workspace-relative file name
        path: String,
        /// Statement holding the literal
        range: SourceRange,
        /// Why evaluation failed
        source: EvaluationError,
    },
    /// A literal evaluated to something other than an object of keys
    #[error("Unexpected literal in {path} from {range}: {source}")]
    Shape {
        /// Workspace-relative file name
        path: String,
        /// Statement holding the literal
        range: SourceRange,
        /// What was found instead
        source: DatasetError,
    },
    /// A dataset key names a file that does not exist in the workspace
    #[error("Couldn't find {path}, ignoring it")]
    MissingTarget {
        /// File name as qualified in the dataset
        path: String,
    },
    /// The merged literals could not be written into the text
    #[error("Couldn't update {path}: {source}")]
    Splice {
        /// Workspace-relative file name
        path: String,
        /// Why splicing failed
        source: SpliceError,
    },
    /// The updated source file could not be written
    #[error("Couldn't write {path}: {source}")]
    Write {
        /// Workspace-relative file name
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },
    /// A dataset could not be listed, read or written
    #[error("Couldn't use dataset {path}: {source}")]
    Dataset {
        /// Dataset path relative to the workspace
        path: String,
        /// Underlying dataset error
        source: DatasetError,
    },
    /// The file has an extension no parser handles
    #[error("Unsupported file extension in {path}")]
    UnsupportedFile {
        /// Workspace-relative file name
        path: String,
    },
}

/// Outcome of one `load` run.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Script and markup files read
    pub scanned_files: usize,
    /// Literals that evaluated successfully
    pub literals: usize,
    /// Locales whose dataset was written for the first time
    pub created: Vec<String>,
    /// Locales whose dataset gained or lost entries
    pub updated: Vec<String>,
    /// Locales whose dataset already matched the sources
    pub unchanged: Vec<String>,
    /// Failures skipped during the run
    pub errors: Vec<ProcessError>,
}

/// Outcome of one `save` run.
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Source files that were rewritten
    pub updated_files: Vec<String>,
    /// Source files whose text came out identical
    pub unchanged_files: Vec<String>,
    /// Literals regenerated across all files
    pub replaced_sections: usize,
    /// Failures skipped during the run
    pub errors: Vec<ProcessError>,
}
