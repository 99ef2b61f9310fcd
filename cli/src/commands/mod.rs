pub mod check;
pub mod generate;

use anyhow::{Context, Result};
use fidl_json::{parse_library_file, Library};
use std::path::Path;

/// Load a resolved library, returning a clear error on failure.
fn load_library(path: &Path) -> Result<Library> {
    parse_library_file(path)
        .with_context(|| format!("Failed to load resolved library '{}'", path.display()))
}
