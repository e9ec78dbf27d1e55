//! File input: discovery, decoding and source kinds.
pub mod discovery;
pub mod encoding;
pub mod source;

pub use discovery::{
    WorkspaceFile,
    find_files,
};
pub use encoding::{
    read_text_file,
    write_text_file,
};
pub use source::SourceLanguage;
