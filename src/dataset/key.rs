//! Qualified keys: `<file>#<key>`.

use std::fmt;

/// Separator between the file path and the local key.
pub const KEY_SEPARATOR: char = '#';

/// A local key qualified by the workspace-relative path of its file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedKey {
    /// Workspace-relative path of the source file.
    pub file: String,
    /// Key as written in the literal.
    pub key: String,
}

impl QualifiedKey {
    /// Qualifies `key` with `file`.
    #[must_use]
    pub fn new(file: impl Into<String>, key: impl Into<String>) -> Self {
        Self { file: file.into(), key: key.into() }
    }

    /// Splits a persisted key at its first `#`.
    ///
    /// Local keys may contain `#` themselves; file paths may not.
    #[must_use]
    pub fn parse(qualified: &str) -> Option<Self> {
        let (file, key) = qualified.split_once(KEY_SEPARATOR)?;
        if file.is_empty() {
            return None;
        }
        Some(Self::new(file, key))
    }
}

impl fmt::Display for QualifiedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.file, self.key)
    }
}
