//! Loading resolved libraries from their JSON interchange form

use crate::error::{Error, Result};
use crate::types::Library;
use std::fs;
use std::path::Path;

pub fn parse_library_file<P: AsRef<Path>>(path: P) -> Result<Library> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let library = parse_library_content(&content)?;
    tracing::debug!(
        path = %path.display(),
        library = %library.name,
        declarations = library.declaration_count(),
        "loaded resolved library"
    );
    Ok(library)
}

pub fn parse_library_content(content: &str) -> Result<Library> {
    Ok(serde_json::from_str(content)?)
}
