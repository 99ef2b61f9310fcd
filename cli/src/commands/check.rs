use anyhow::Result;
use colored::Colorize;
use fidl_json::check_unique_names;
use std::path::Path;

use super::load_library;

pub fn check(input: &Path) -> Result<()> {
    let library = load_library(input)?;

    println!("{}", "Library Summary".bold());
    println!("  {} {}", "Name:".bold(), library.name.green());
    println!(
        "  {} {}",
        "Order:".bold(),
        library.declaration_order.len().to_string().cyan()
    );
    println!();
    println!("{}", "Counts".bold());
    println!("  {:<12} {}", "Consts".bold(), library.const_declarations.len());
    println!("  {:<12} {}", "Enums".bold(), library.enum_declarations.len());
    println!(
        "  {:<12} {}",
        "Interfaces".bold(),
        library.interface_declarations.len()
    );
    println!("  {:<12} {}", "Structs".bold(), library.struct_declarations.len());
    println!("  {:<12} {}", "Unions".bold(), library.union_declarations.len());
    println!();

    check_unique_names(&library)?;

    println!(
        "{} All {} declaration names are unique",
        "✓".green(),
        library.declaration_count()
    );
    Ok(())
}
