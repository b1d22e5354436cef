//! Plain-text and JSON renderings of the record table for text mode.

use crate::store::StatusCounts;
use crate::view::{TableView, COLUMNS};
use anyhow::Result;

/// Pre-formatted lines for text output.
pub(crate) struct TextTable {
    pub lines: Vec<String>,
}

/// Build a fixed-width table from a fresh projection. Every call lays out the
/// whole table again; column widths follow the current contents.
pub(crate) fn build_text_table(view: &TableView, counts: StatusCounts) -> TextTable {
    let mut header: Vec<String> = vec!["#".to_string()];
    header.extend(COLUMNS.iter().map(|c| c.to_string()));

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.title.clone(),
                r.description.clone(),
                r.priority.to_string(),
                r.status.to_string(),
                r.actions_text(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(format_row(&header, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    if rows.is_empty() {
        lines.push("(no tickets)".to_string());
    }
    for row in &rows {
        lines.push(format_row(row, &widths));
    }
    lines.push(format!(
        "{} ticket(s): {} open, {} resolved",
        counts.total(),
        counts.open,
        counts.resolved
    ));

    TextTable { lines }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}", w = *w))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Pretty-printed JSON array of `records`.
pub(crate) fn build_json_snapshot(records: &[crate::model::Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
