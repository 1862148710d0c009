//! Follow-up history records and the validated follow-up payload.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PelakorError, Result};
use crate::status::StatusTindakLanjut;

/// One follow-up entry in a report's history. Append-only per report; the
/// last entry mirrors the parent report's status, but the client re-fetches
/// the parent instead of deriving it from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TindakLanjutRecord {
    /// Server-assigned identifier.
    pub id_tindak_lanjut: i64,
    /// Progress note.
    pub catatan_tindak_lanjut: String,
    /// Status written by this entry.
    pub status_tindak_lanjut: StatusTindakLanjut,
    /// Server-relative attachment path, if any.
    #[serde(default)]
    pub lampiran: Option<String>,
    /// Acting officer.
    #[serde(default)]
    pub penindak: Option<String>,
    /// Acting officer's position title.
    #[serde(default)]
    pub jabatan: Option<String>,
    /// Entry time, server-assigned.
    pub created_at: DateTime<Utc>,
}

/// Validated follow-up submission: a mandatory note, a status choice, and an
/// optional attachment that must exist on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct TindakLanjutDraft {
    catatan_tindak_lanjut: String,
    status_tindak_lanjut: StatusTindakLanjut,
    lampiran: Option<PathBuf>,
}

impl TindakLanjutDraft {
    /// Build a follow-up payload, rejecting an empty note or a missing
    /// attachment file.
    pub fn new(
        catatan: impl Into<String>,
        status: StatusTindakLanjut,
        lampiran: Option<PathBuf>,
    ) -> Result<Self> {
        let catatan = catatan.into();
        if catatan.trim().is_empty() {
            return Err(PelakorError::Validation(
                "catatan tindak lanjut wajib diisi".to_string(),
            ));
        }
        if let Some(path) = &lampiran {
            if !path.is_file() {
                return Err(PelakorError::Validation(format!(
                    "lampiran tidak ditemukan: {}",
                    path.display()
                )));
            }
        }
        Ok(Self {
            catatan_tindak_lanjut: catatan.trim().to_string(),
            status_tindak_lanjut: status,
            lampiran,
        })
    }

    /// Progress note.
    pub fn catatan(&self) -> &str {
        &self.catatan_tindak_lanjut
    }

    /// Status choice.
    pub fn status(&self) -> StatusTindakLanjut {
        self.status_tindak_lanjut
    }

    /// Attachment path, if given.
    pub fn lampiran(&self) -> Option<&Path> {
        self.lampiran.as_deref()
    }
}
