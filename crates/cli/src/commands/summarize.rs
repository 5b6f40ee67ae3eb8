//! Offline summary of a CSV file. Never touches the database.
//!
//! ```bash
//! sb-cli summarize sales.csv
//! ```

use std::fmt::Write as _;

use salesboard_core::CategorySummary;
use salesboard_web::services::upload::UploadService;

use super::{CommandError, read_file};

const HEADERS: [&str; 4] = [
    "category",
    "total_revenue",
    "top_product",
    "top_product_quantity_sold",
];

/// Summarize a CSV file and return the rendered table.
///
/// # Errors
///
/// Returns `CommandError` if the file cannot be read or cleaned.
pub fn run(path: &str) -> Result<String, CommandError> {
    let bytes = read_file(path)?;
    let summary = UploadService::preview(&bytes)?;
    Ok(render_table(&summary))
}

/// Render summary rows as a left-aligned plain text table.
pub fn render_table(rows: &[CategorySummary]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.category.clone(),
                row.total_revenue.to_string(),
                row.top_product.clone(),
                row.top_product_quantity_sold.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &HEADERS, &widths);
    for row in &cells {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}
