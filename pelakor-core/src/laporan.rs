//! Report records and validated submission payloads.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PelakorError, Result};
use crate::status::StatusLaporan;

/// Maximum length of a report title.
pub const MAX_JUDUL: usize = 100;
/// Maximum length of a report body.
pub const MAX_ISI: usize = 2000;

/// Report category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kategori {
    /// Consumables request.
    Konsumsi,
    /// Supply need.
    Kebutuhan,
    /// Damage report.
    Kerusakan,
    /// Anything else.
    Lainnya,
}

impl Kategori {
    /// Wire string for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Kategori::Konsumsi => "konsumsi",
            Kategori::Kebutuhan => "kebutuhan",
            Kategori::Kerusakan => "kerusakan",
            Kategori::Lainnya => "lainnya",
        }
    }
}

impl fmt::Display for Kategori {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kategori {
    type Err = PelakorError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "konsumsi" => Ok(Kategori::Konsumsi),
            "kebutuhan" => Ok(Kategori::Kebutuhan),
            "kerusakan" => Ok(Kategori::Kerusakan),
            "lainnya" => Ok(Kategori::Lainnya),
            other => Err(PelakorError::Parse(format!("kategori '{other}'"))),
        }
    }
}

/// A report as returned by the backend.
///
/// Server-assigned fields (`id_laporan`, `status_laporan`, timestamps) are
/// authoritative; the client never recomputes them after a mutation and
/// re-fetches instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laporan {
    /// Server-assigned identifier.
    pub id_laporan: i64,
    /// Title.
    pub judul_laporan: String,
    /// Body.
    pub isi_laporan: String,
    /// Optional category.
    #[serde(default)]
    pub kategori: Option<Kategori>,
    /// Server-relative attachment path, if any.
    #[serde(default)]
    pub lampiran: Option<String>,
    /// Lifecycle state.
    pub status_laporan: StatusLaporan,
    /// Submitter's NIP.
    pub nip_pelapor: String,
    /// Submitter's display name.
    #[serde(default)]
    pub pelapor: Option<String>,
    /// Submission time, server-assigned.
    pub created_at: DateTime<Utc>,
    /// Last mutation time, server-assigned.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Laporan {
    /// Submitter display name, falling back to the NIP.
    pub fn nama_pelapor(&self) -> &str {
        self.pelapor.as_deref().unwrap_or(&self.nip_pelapor)
    }
}

fn validate_content(judul: &str, isi: &str) -> Result<()> {
    if judul.trim().is_empty() {
        return Err(PelakorError::Validation("judul laporan wajib diisi".to_string()));
    }
    if judul.chars().count() > MAX_JUDUL {
        return Err(PelakorError::Validation(format!(
            "judul laporan maksimal {MAX_JUDUL} karakter"
        )));
    }
    if isi.trim().is_empty() {
        return Err(PelakorError::Validation("isi laporan wajib diisi".to_string()));
    }
    if isi.chars().count() > MAX_ISI {
        return Err(PelakorError::Validation(format!(
            "isi laporan maksimal {MAX_ISI} karakter"
        )));
    }
    Ok(())
}

/// Validated payload for submitting a new report.
///
/// Construction is the validation: an invalid draft cannot exist, so nothing
/// invalid ever reaches the network.
#[derive(Debug, Clone, PartialEq)]
pub struct LaporanDraft {
    judul_laporan: String,
    isi_laporan: String,
    kategori: Option<Kategori>,
    lampiran: Option<PathBuf>,
}

impl LaporanDraft {
    /// Build a draft, rejecting empty or oversized content and a missing
    /// attachment file.
    pub fn new(
        judul: impl Into<String>,
        isi: impl Into<String>,
        kategori: Option<Kategori>,
        lampiran: Option<PathBuf>,
    ) -> Result<Self> {
        let judul = judul.into();
        let isi = isi.into();
        validate_content(&judul, &isi)?;
        if let Some(path) = &lampiran {
            if !path.is_file() {
                return Err(PelakorError::Validation(format!(
                    "lampiran tidak ditemukan: {}",
                    path.display()
                )));
            }
        }
        Ok(Self {
            judul_laporan: judul.trim().to_string(),
            isi_laporan: isi.trim().to_string(),
            kategori,
            lampiran,
        })
    }

    /// Title field.
    pub fn judul(&self) -> &str {
        &self.judul_laporan
    }

    /// Body field.
    pub fn isi(&self) -> &str {
        &self.isi_laporan
    }

    /// Category, if chosen.
    pub fn kategori(&self) -> Option<Kategori> {
        self.kategori
    }

    /// Attachment path, if given.
    pub fn lampiran(&self) -> Option<&Path> {
        self.lampiran.as_deref()
    }
}

/// Validated payload for editing a report that is still `diajukan`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaporanPerubahan {
    judul_laporan: String,
    isi_laporan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kategori: Option<Kategori>,
}

impl LaporanPerubahan {
    /// Build an edit payload under the same content rules as a new draft.
    pub fn new(
        judul: impl Into<String>,
        isi: impl Into<String>,
        kategori: Option<Kategori>,
    ) -> Result<Self> {
        let judul = judul.into();
        let isi = isi.into();
        validate_content(&judul, &isi)?;
        Ok(Self {
            judul_laporan: judul.trim().to_string(),
            isi_laporan: isi.trim().to_string(),
            kategori,
        })
    }

    /// Title field.
    pub fn judul(&self) -> &str {
        &self.judul_laporan
    }
}
