//! Reading source files with legacy encodings.
//!
//! Files are decoded to UTF-8 on read and always written back as UTF-8.

use std::path::Path;

use encoding_rs::{
    Encoding,
    UTF_8,
    WINDOWS_1251,
};

/// Resolves an encoding label, falling back to windows-1251 for unknown labels.
#[must_use]
pub fn fallback_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label(label.as_bytes()).unwrap_or(WINDOWS_1251)
}

/// Decodes raw file contents.
///
/// A byte order mark selects UTF-8 or UTF-16 and is removed. Otherwise the
/// bytes are used as-is when they are valid UTF-8 and decoded with
/// `fallback` when they are not.
#[must_use]
pub fn decode_text(bytes: &[u8], fallback: &'static Encoding) -> String {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let body = bytes.get(bom_length..).unwrap_or_default();
        let (text, _) = encoding.decode_without_bom_handling(body);
        return text.into_owned();
    }

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return text.into_owned();
    }

    tracing::debug!(encoding = fallback.name(), "Decoding non-UTF-8 content");
    let (text, had_errors) = fallback.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::warn!(encoding = fallback.name(), "Replaced undecodable bytes");
    }
    text.into_owned()
}

/// Reads a text file, detecting its encoding.
pub fn read_text_file(path: &Path, fallback: &'static Encoding) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(&bytes, fallback))
}

/// Writes a text file as UTF-8.
pub fn write_text_file(path: &Path, text: &str) -> std::io::Result<()> {
    std::fs::write(path, text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    #[case::plain_utf8(b"var a = \"\xc3\xa4\";".to_vec(), "var a = \"ä\";")]
    #[case::utf8_bom(b"\xef\xbb\xbfabc".to_vec(), "abc")]
    #[case::utf16le_bom(vec![0xff, 0xfe, b'h', 0, b'i', 0], "hi")]
    #[case::windows_1251(vec![0xcf, 0xf0, 0xe8, 0xe2, 0xe5, 0xf2], "Привет")]
    fn test_decode_text(#[case] bytes: Vec<u8>, #[case] expected: &str) {
        assert_that!(decode_text(&bytes, WINDOWS_1251), eq(expected));
    }

    #[rstest]
    #[case::known("iso-8859-1", "windows-1252")]
    #[case::default_label("windows-1251", "windows-1251")]
    #[case::unknown("no-such-encoding", "windows-1251")]
    fn test_fallback_encoding(#[case] label: &str, #[case] expected: &str) {
        assert_that!(fallback_encoding(label).name(), eq(expected));
    }

    #[rstest]
    fn test_read_and_write_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("words.js");

        write_text_file(&path, "var systemDictionary = {\"Привет\": {}};").unwrap();
        let text = read_text_file(&path, WINDOWS_1251).unwrap();

        assert_that!(text, eq("var systemDictionary = {\"Привет\": {}};"));
    }

    #[rstest]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = read_text_file(&temp_dir.path().join("missing.js"), WINDOWS_1251);

        assert_that!(result.is_err(), eq(true));
    }
}
