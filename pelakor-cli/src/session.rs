//! Session storage for the PELAKOR CLI.
//!
//! The stored session is the only persisted client-side state: server URL,
//! bearer token, and the authenticated user. All storage access lives here;
//! commands load and save through these typed operations only.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pelakor_core::User;

use crate::CliResult;

/// Stored CLI session on disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSession {
    /// Base URL the session was created against.
    pub server_url: String,
    /// Bearer token.
    pub token: String,
    /// Authenticated user.
    pub user: User,
}

impl StoredSession {
    /// Build a new session record.
    pub fn new(server_url: &str, token: &str, user: User) -> Self {
        Self {
            server_url: server_url.to_string(),
            token: token.to_string(),
            user,
        }
    }
}

/// Resolve the local path where sessions are stored.
pub fn session_store_path(auth_path: Option<PathBuf>) -> CliResult<PathBuf> {
    if let Some(path) = auth_path {
        return Ok(path);
    }
    if let Ok(path) = std::env::var("PELAKOR_AUTH_PATH") {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    if let Ok(base) = std::env::var("XDG_CONFIG_HOME") {
        if !base.trim().is_empty() {
            return Ok(PathBuf::from(base).join("pelakor").join("session.json"));
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home).join(".config/pelakor/session.json"));
        }
    }
    Err("unable to resolve session storage path".into())
}

/// Persist the session JSON to disk.
pub async fn write_session(path: &Path, session: &StoredSession) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(session)?;
    tokio::fs::write(path, payload).await?;
    Ok(())
}

/// Load the stored session, with a login hint when none exists.
pub async fn load_session(path: &Path) -> CliResult<StoredSession> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err("belum login. Jalankan `pelakor login` terlebih dahulu.".into());
        }
        Err(err) => return Err(err.into()),
    };
    let session = serde_json::from_str(&contents)?;
    Ok(session)
}

/// Remove the stored session; missing is not an error.
pub async fn remove_session(path: &Path) -> CliResult<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}
