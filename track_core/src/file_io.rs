//! # Backup File I/O
//!
//! Serializes the per-user hierarchy (or a single project) to pretty-printed
//! JSON for manual backup across devices, and reads such files back for
//! restore. Saves are atomic: write to a `.tmp` file, fsync, then rename,
//! so an interrupted write never corrupts an existing backup.
//!
//! ## Example
//!
//! ```rust,no_run
//! use track_core::file_io::{export_backup, load_backup, backup_file_name};
//! use track_core::model::Store;
//! use std::path::Path;
//!
//! let store = Store::default();
//! let name = backup_file_name("mason");   // work_tracker_mason_backup.json
//! export_backup(&store, "mason", Path::new(&name)).unwrap();
//!
//! let restored = load_backup(Path::new(&name)).unwrap();
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{TrackError, TrackResult};
use crate::model::Store;
use crate::project::Project;

/// Full-hierarchy backup payload, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupPayload {
    pub username: String,
    #[serde(rename = "exportedAt")]
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub store: Store,
}

/// Suggested download name for a full backup.
pub fn backup_file_name(username: &str) -> String {
    format!("work_tracker_{}_backup.json", username)
}

/// Suggested download name for a single-project export.
pub fn project_file_name(project_name: &str) -> String {
    let flat: String = project_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_export.json", flat)
}

/// Export the full per-user hierarchy to a backup file.
pub fn export_backup(store: &Store, username: &str, path: &Path) -> TrackResult<()> {
    let payload = BackupPayload {
        username: username.to_string(),
        exported_at: Utc::now(),
        store: store.clone(),
    };
    let json = serde_json::to_string_pretty(&payload).map_err(|e| {
        TrackError::SerializationError {
            reason: e.to_string(),
        }
    })?;
    write_atomic(&json, path)
}

/// Export a single project subtree to a file.
pub fn export_project(project: &Project, path: &Path) -> TrackResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| {
        TrackError::SerializationError {
            reason: e.to_string(),
        }
    })?;
    write_atomic(&json, path)
}

/// Read a backup file and extract the hierarchy it contains.
///
/// Accepts any prior export payload; the only requirement is a `dealers`
/// object at the top level. The result is handed to the remote restore
/// endpoint as-is.
pub fn load_backup(path: &Path) -> TrackResult<Store> {
    let mut file = File::open(path)
        .map_err(|e| TrackError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| TrackError::file_error("read", path.display().to_string(), e.to_string()))?;

    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| TrackError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    if !value.get("dealers").map(|d| d.is_object()).unwrap_or(false) {
        return Err(TrackError::invalid_input(
            "dealers",
            path.display().to_string(),
            "Invalid backup file: missing dealers object",
        ));
    }

    serde_json::from_value(value).map_err(|e| TrackError::SerializationError {
        reason: e.to_string(),
    })
}

/// Read a previously exported project file back into a [`Project`].
pub fn load_project(path: &Path) -> TrackResult<Project> {
    let mut file = File::open(path)
        .map_err(|e| TrackError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| TrackError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| TrackError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Write with atomic semantics: temp file, fsync, rename.
fn write_atomic(json: &str, path: &Path) -> TrackResult<()> {
    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        TrackError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        TrackError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.sync_all().map_err(|e| {
        TrackError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        TrackError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}
