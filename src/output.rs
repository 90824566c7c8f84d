//! Presentation-layer rendering of query results.
//!
//! Converts a [`QueryResult`] into an aligned text table or JSON records.
//! The transport (stdout, a GUI binding, an HTTP response) is the caller's
//! concern.

use crate::db::QueryResult;
use crate::error::{RelayError, Result};

/// Renders a result as an aligned text table with a header row.
pub fn render_table(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return format!("OK ({} rows)\n", result.row_count);
    }

    // Column widths: max of header and every cell
    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.name.len()).collect();
    let rendered_rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_display_string()).collect())
        .collect();

    for row in &rendered_rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();

    let header: Vec<String> = result
        .columns
        .iter()
        .zip(widths.iter().copied())
        .map(|(c, w)| format!("{:<w$}", c.name, w = w))
        .collect();
    out.push_str(&header.join(" | "));
    out.push('\n');

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&separator.join("-+-"));
    out.push('\n');

    for row in &rendered_rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, w)| format!("{:<w$}", cell, w = w))
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }

    if let Some(warning) = result.truncation_warning() {
        out.push_str(&warning);
        out.push('\n');
    }

    out
}

/// Renders a result as pretty-printed JSON records, one object per row.
pub fn render_json(result: &QueryResult) -> Result<String> {
    serde_json::to_string_pretty(&result.to_json_records())
        .map_err(|e| RelayError::internal(format!("Failed to serialize result: {e}")))
}
