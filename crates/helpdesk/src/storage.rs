//! JSON file helpers shared by the knowledge base, the translation store and the
//! UI string catalog.
//!
//! Loading never aborts the session: callers turn a [`DataLoadError`] into a
//! visible warning and continue with an empty structure.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{de::DeserializeOwned, Serialize};

/// Failure to load one of the JSON data files.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("{} not found", .path.display())]
    Missing { path: PathBuf },

    #[error("{} is empty", .path.display())]
    Empty { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to write a JSON data file back to disk.
#[derive(Debug, thiserror::Error)]
pub enum DataSaveError {
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads and parses a JSON document.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(DataLoadError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(DataLoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if content.trim().is_empty() {
        return Err(DataLoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    serde_json::from_str(&content).map_err(|source| DataLoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Serializes `value` as pretty JSON and replaces `path`. Last writer wins.
///
/// The document goes to a uniquely named sibling file first and is renamed into
/// place, so concurrent writers never leave a partially written file behind.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DataSaveError> {
    let encoded = serde_json::to_string_pretty(value).map_err(|source| DataSaveError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source: std::io::Error| DataSaveError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let temp_path = temp_sibling(path);
    if let Err(source) = tokio::fs::write(&temp_path, encoded).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(write_err(source));
    }
    if let Err(source) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(write_err(source));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data.json"));
    name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    path.with_file_name(name)
}
