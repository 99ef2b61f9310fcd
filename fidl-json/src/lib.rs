//! JSON intermediate representation for resolved FIDL libraries
//!
//! This crate turns a fully resolved [`Library`] into the canonical JSON IR
//! consumed by language backends. The output is deterministic down to the
//! byte: field order, indentation and omission of absent optional fields are
//! fixed so golden-file comparisons stay stable.
//!
//! ```
//! use fidl_json::{produce_json, Library};
//!
//! let json = produce_json(&Library::new("example"));
//! assert!(json.starts_with("{\n  \"name\": \"example\""));
//! ```

pub mod builder;
pub mod emit;
pub mod error;
pub mod generate;
pub mod library;
pub mod parse;
pub mod types;

pub use builder::Position;
pub use emit::JsonWriter;
pub use error::*;
pub use generate::Generate;
pub use library::{check_unique_names, produce_json, write_json, JsonGenerator};
pub use parse::{parse_library_content, parse_library_file};
pub use types::*;
