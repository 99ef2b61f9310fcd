//! Error types for loading libraries and writing the IR

use std::path::PathBuf;

use thiserror::Error;

use crate::types::DeclarationKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read library file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse resolved library JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to write JSON IR: {0}")]
    Io(#[from] std::io::Error),

    #[error("Declaration '{name}' is declared as both {first} and {second}")]
    DuplicateDeclaration {
        name: String,
        first: DeclarationKind,
        second: DeclarationKind,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
