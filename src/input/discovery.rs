//! Workspace file discovery.
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::{
    FileKind,
    FileMatcher,
};

/// A discovered file: its absolute path and its workspace-relative name.
///
/// The relative name uses `/` separators on every platform and is the file
/// part of qualified dataset keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkspaceFile {
    /// Name relative to the workspace root, `/`-separated.
    pub relative: String,
    /// Absolute path on disk.
    pub path: PathBuf,
}

/// Converts a workspace-relative path into the `/`-separated form used in datasets.
#[must_use]
pub fn relative_name(relative_path: &Path) -> String {
    relative_path
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Finds all files of `kind` below the workspace root, sorted by relative name.
///
/// `.gitignore` rules are respected; unreadable directory entries are skipped.
#[must_use]
pub fn find_files(matcher: &FileMatcher, kind: FileKind) -> Vec<WorkspaceFile> {
    let workspace_root = matcher.workspace_root();
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(workspace_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(workspace_root) else {
            continue;
        };
        if !matcher.matches_relative(kind, relative_path) {
            continue;
        }

        found_files.push(WorkspaceFile {
            relative: relative_name(relative_path),
            path: path.to_path_buf(),
        });
    }

    found_files.sort();
    tracing::debug!(?kind, count = found_files.len(), "Discovered files");
    found_files
}
