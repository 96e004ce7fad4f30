//! Table and JSON rendering for command results.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use compline_core::error::AppError;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print rows as a table, or as a JSON array.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("Nothing to show."),
        OutputFormat::Table => println!("{}", Table::new(rows).with(Style::rounded())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
    }
    Ok(())
}

/// Print one value: debug form for tables, JSON otherwise.
pub fn print_item<T: Serialize + std::fmt::Debug>(
    item: &T,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Table => println!("{:#?}", item),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
    }
    Ok(())
}

/// Print a success line
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning line to stderr
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {}", msg);
}

/// Print an error line to stderr
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print an aligned key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<20} {}", format!("{}:", key), value);
}
