//! Write-only JSON snapshots of the ticket list. Nothing reads these back.

use crate::model::Record;
use anyhow::{Context, Result};
use std::path::Path;

pub fn write_json(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let body = crate::text_view::build_json_snapshot(records)?;
    std::fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), count = records.len(), "exported tickets");
    Ok(())
}
