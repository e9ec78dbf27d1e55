//! File pattern matcher for script and markup files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::Settings;

/// Errors raised while compiling the configured glob patterns.
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    /// A script include pattern is not a valid glob.
    #[error("Invalid include pattern '{pattern}': {source}")]
    InvalidIncludePattern {
        /// The offending pattern.
        pattern: String,
        /// Why globset rejected it.
        #[source]
        source: globset::Error,
    },

    /// A markup pattern is not a valid glob.
    #[error("Invalid markup pattern '{pattern}': {source}")]
    InvalidMarkupPattern {
        /// The offending pattern.
        pattern: String,
        /// Why globset rejected it.
        #[source]
        source: globset::Error,
    },

    /// An exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        /// The offending pattern.
        pattern: String,
        /// Why globset rejected it.
        #[source]
        source: globset::Error,
    },

    /// The compiled patterns could not be combined.
    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// The two families of files that may carry dictionary literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// JavaScript sources.
    Script,
    /// HTML documents with inline scripts.
    Markup,
}

/// Matches workspace-relative paths against configured glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    /// Directory all patterns are relative to.
    workspace_root: PathBuf,
    /// Compiled `includePatterns`.
    script_set: GlobSet,
    /// Compiled `markupPatterns`.
    markup_set: GlobSet,
    /// Compiled `excludePatterns`, applied to both kinds.
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(workspace_root: PathBuf, settings: &Settings) -> Result<Self, MatcherError> {
        let script_set = Self::build_glob_set(&settings.include_patterns, |pattern, source| {
            MatcherError::InvalidIncludePattern { pattern, source }
        })?;

        let markup_set = Self::build_glob_set(&settings.markup_patterns, |pattern, source| {
            MatcherError::InvalidMarkupPattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { workspace_root, script_set, markup_set, exclude_set })
    }

    /// Compiles `patterns`, reporting the first invalid one through `make_error`.
    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Directory the matcher resolves relative paths against.
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Returns true if the workspace-relative path is of `kind` and not excluded.
    #[must_use]
    pub fn matches_relative(&self, kind: FileKind, relative_path: &Path) -> bool {
        let include_set = match kind {
            FileKind::Script => &self.script_set,
            FileKind::Markup => &self.markup_set,
        };

        include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}
