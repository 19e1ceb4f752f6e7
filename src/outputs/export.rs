//! CSV export of the transformed records.
//!
//! The header comes from [`ArticleRecord`]'s serde field names:
//! `Title,By,Section,Date,keywords,keycount`.
//!
//! # Atomic replace
//!
//! Rows are written to a temporary file in the destination directory, which
//! is renamed over the target only after the last row is flushed. A failed
//! or interrupted run leaves either the previous file or nothing.

use crate::error::{PipelineError, Result};
use crate::models::ArticleRecord;
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, instrument};

#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub fn write_records(path: &Path, records: &[ArticleRecord]) -> Result<()> {
    if records.is_empty() {
        // no header can be derived from zero records
        return Err(PipelineError::EmptyResult { stage: "load" });
    }

    let file_write = |source: std::io::Error| PipelineError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(file_write)?;
    let tmp = NamedTempFile::new_in(dir).map_err(file_write)?;

    let mut writer = csv::Writer::from_writer(tmp);
    for record in records {
        writer.serialize(record).map_err(|source| PipelineError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let tmp = writer.into_inner().map_err(|e| file_write(e.into_error()))?;
    // temp files are created 0600; give the result a normal file mode
    let permissions = target_permissions(path, tmp.as_file()).map_err(file_write)?;
    tmp.as_file().set_permissions(permissions).map_err(file_write)?;
    tmp.as_file().sync_all().map_err(file_write)?;
    tmp.persist(path).map_err(|e| file_write(e.error))?;

    info!("Wrote CSV");
    Ok(())
}

/// Mode for the finished file: the replaced file's if there is one, else 0644.
fn target_permissions(path: &Path, tmp: &fs::File) -> std::io::Result<fs::Permissions> {
    if let Ok(existing) = fs::metadata(path) {
        return Ok(existing.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = tmp;
        Ok(fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        tmp.metadata().map(|m| m.permissions())
    }
}
