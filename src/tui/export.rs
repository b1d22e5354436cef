use anyhow::{Context, Result};
use time::macros::format_description;
use time::OffsetDateTime;

use super::state::UiState;

/// File name for an interactive export, e.g. `tickets-2024-01-15_14-30-45.json`.
pub fn default_export_name(now: OffsetDateTime) -> String {
    let stamp = now
        .format(format_description!(
            "[year]-[month]-[day]_[hour]-[minute]-[second]"
        ))
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    format!("tickets-{stamp}.json")
}

/// Export the current tickets as JSON into the working directory.
/// Returns the absolute path of the exported file.
pub fn export_tickets_json(state: &UiState) -> Result<std::path::PathBuf> {
    let current_dir = std::env::current_dir().context("get current directory")?;
    let path = current_dir.join(default_export_name(OffsetDateTime::now_utc()));
    crate::snapshot::write_json(&path, state.store.list())?;
    Ok(path)
}

/// Export and report the outcome in the status line.
pub fn export_and_show_path(state: &mut UiState) {
    match export_tickets_json(state) {
        Ok(p) => {
            state.info = format!("Exported JSON: {}", p.display());
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "export failed");
            state.info = format!("JSON export failed: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn export_name_is_filesystem_safe() {
        let name = default_export_name(datetime!(2024-01-15 14:30:45 UTC));
        assert_eq!(name, "tickets-2024-01-15_14-30-45.json");
    }
}
