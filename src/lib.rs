//! ioblate
//!
//! Moves translation dictionaries (`systemDictionary = {...}` literals) out of
//! JavaScript and HTML sources into per-locale JSON datasets, and writes edited
//! datasets back into the sources.

pub mod config;
pub mod dataset;
pub mod input;
pub mod literal;
pub mod splice;
pub mod syntax;
pub mod types;
pub mod workflow;

pub use workflow::Workspace;
