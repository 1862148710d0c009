//! Disposition history records and the validated decision payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PelakorError, Result};

/// One routing decision in a report's history. Append-only; the client never
/// mutates or deletes entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisposisiRecord {
    /// Server-assigned identifier.
    pub id: i64,
    /// Rationale note written by the division head.
    pub catatan_disposisi: String,
    /// Deciding division head.
    #[serde(default)]
    pub kabbag_umum: Option<String>,
    /// Assigned responsible party, present on approvals.
    #[serde(default)]
    pub penanggung_jawab: Option<String>,
    /// Decision time, server-assigned.
    pub created_at: DateTime<Utc>,
}

/// A validated approve-or-reject decision, ready to send.
///
/// Built only through [`DisposisiDecision::approve`] and
/// [`DisposisiDecision::reject`], so every instance satisfies the client-side
/// rules: a non-empty rationale note always, and a responsible party on
/// approval. Serializes to the wire shape
/// `{nip_penanggung_jawab, catatan_disposisi, valid}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisposisiDecision {
    #[serde(skip_serializing_if = "Option::is_none")]
    nip_penanggung_jawab: Option<String>,
    catatan_disposisi: String,
    valid: bool,
}

impl DisposisiDecision {
    /// Approve a report, routing it to `nip_penanggung_jawab`.
    pub fn approve(
        nip_penanggung_jawab: impl Into<String>,
        catatan: impl Into<String>,
    ) -> Result<Self> {
        let nip = nip_penanggung_jawab.into();
        if nip.trim().is_empty() {
            return Err(PelakorError::Validation(
                "penanggung jawab wajib dipilih untuk disposisi".to_string(),
            ));
        }
        let catatan = non_empty_catatan(catatan.into())?;
        Ok(Self {
            nip_penanggung_jawab: Some(nip.trim().to_string()),
            catatan_disposisi: catatan,
            valid: true,
        })
    }

    /// Reject a report with a mandatory rationale.
    pub fn reject(catatan: impl Into<String>) -> Result<Self> {
        let catatan = non_empty_catatan(catatan.into())?;
        Ok(Self {
            nip_penanggung_jawab: None,
            catatan_disposisi: catatan,
            valid: false,
        })
    }

    /// Whether this decision approves the report.
    pub fn is_approval(&self) -> bool {
        self.valid
    }

    /// Rationale note.
    pub fn catatan(&self) -> &str {
        &self.catatan_disposisi
    }

    /// Assigned responsible party, present on approvals.
    pub fn penanggung_jawab(&self) -> Option<&str> {
        self.nip_penanggung_jawab.as_deref()
    }
}

fn non_empty_catatan(catatan: String) -> Result<String> {
    if catatan.trim().is_empty() {
        return Err(PelakorError::Validation(
            "catatan disposisi wajib diisi".to_string(),
        ));
    }
    Ok(catatan.trim().to_string())
}
