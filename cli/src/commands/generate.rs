use anyhow::{Context, Result};
use colored::Colorize;
use fidl_json::{check_unique_names, write_json};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use super::load_library;

pub fn generate(input: &Path, output: Option<&Path>, strict: bool) -> Result<()> {
    let library = load_library(input)?;

    if strict {
        check_unique_names(&library)
            .with_context(|| format!("Strict name check failed for '{}'", input.display()))?;
    }

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file '{}'", path.display()))?;
            write_json(&library, BufWriter::new(file))
                .with_context(|| format!("Failed to write JSON IR to '{}'", path.display()))?;

            println!(
                "{} Wrote JSON IR for {} to {}",
                "✓".green(),
                library.name.bold(),
                path.display().to_string().cyan()
            );
        }
        None => {
            let stdout = io::stdout();
            write_json(&library, stdout.lock()).context("Failed to write JSON IR to stdout")?;
        }
    }

    Ok(())
}
