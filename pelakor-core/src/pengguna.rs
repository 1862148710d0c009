//! User directory records and validated user-administration payloads.
//!
//! `nip` is the canonical identifier for every user operation. Passwords are
//! write-only: they appear on create/update payloads and never on read types.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PelakorError, Result};
use crate::role::Role;

/// A user as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Display name.
    pub nama: String,
    /// National employee identifier, immutable once created.
    pub nip: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Role.
    pub role: Role,
    /// Position title.
    #[serde(default)]
    pub jabatan: Option<String>,
    /// Organizational unit, as stored by the server (may be wrapped in a
    /// Postgres array literal).
    #[serde(default)]
    pub unit_kerja: Option<String>,
}

impl User {
    /// Organizational unit with the server's array wrapping removed.
    pub fn unit_kerja_display(&self) -> Option<String> {
        self.unit_kerja.as_deref().map(unwrap_unit_kerja)
    }
}

/// Strip the Postgres-array-like wrapping the server stores `unit_kerja` in.
///
/// `{"Bagian Umum"}` and `{Bagian Umum}` both become `Bagian Umum`; anything
/// unwrapped passes through unchanged.
pub fn unwrap_unit_kerja(raw: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r#"^\{"?(.*?)"?\}$"#).expect("unit_kerja pattern compiles"));
    match pattern.captures(raw.trim()) {
        Some(captures) => captures[1].to_string(),
        None => raw.trim().to_string(),
    }
}

fn required(value: String, field: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(PelakorError::Validation(format!("{field} wajib diisi")));
    }
    Ok(value.trim().to_string())
}

/// Validated payload for creating a user. Carries the only writable password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDraft {
    nama: String,
    nip: String,
    email: String,
    password: String,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    jabatan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_kerja: Option<String>,
}

impl UserDraft {
    /// Build a create payload; name, NIP, email, and password are mandatory.
    pub fn new(
        nama: impl Into<String>,
        nip: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
        jabatan: Option<String>,
        unit_kerja: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            nama: required(nama.into(), "nama")?,
            nip: required(nip.into(), "nip")?,
            email: required(email.into(), "email")?,
            password: required(password.into(), "password")?,
            role,
            jabatan,
            unit_kerja,
        })
    }

    /// NIP the user will be created under.
    pub fn nip(&self) -> &str {
        &self.nip
    }
}

/// Validated payload for updating a user. Never carries the NIP (immutable)
/// and only carries a password when it is being changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserUpdate {
    nama: String,
    email: String,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jabatan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_kerja: Option<String>,
}

impl UserUpdate {
    /// Build an update payload; an empty replacement password is rejected.
    pub fn new(
        nama: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        password: Option<String>,
        jabatan: Option<String>,
        unit_kerja: Option<String>,
    ) -> Result<Self> {
        let password = match password {
            Some(value) => Some(required(value, "password")?),
            None => None,
        };
        Ok(Self {
            nama: required(nama.into(), "nama")?,
            email: required(email.into(), "email")?,
            role,
            password,
            jabatan,
            unit_kerja,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{User, UserDraft, UserUpdate, unwrap_unit_kerja};
    use crate::role::Role;

    #[test]
    fn user_deserializes_and_unwraps_unit_kerja() {
        let json = r#"{
            "nama": "Siti",
            "nip": "198001012005012001",
            "email": "siti@pemkab.go.id",
            "role": "kabbag_umum",
            "jabatan": "Kepala Bagian Umum",
            "unit_kerja": "{\"Bagian Umum\"}"
        }"#;
        let user: User = serde_json::from_str(json).expect("parse user");
        assert_eq!(user.role, Role::KabbagUmum);
        assert_eq!(user.unit_kerja_display().as_deref(), Some("Bagian Umum"));
    }

    #[test]
    fn unwrap_unit_kerja_handles_variants() {
        assert_eq!(unwrap_unit_kerja("{\"Bagian Umum\"}"), "Bagian Umum");
        assert_eq!(unwrap_unit_kerja("{Bagian Umum}"), "Bagian Umum");
        assert_eq!(unwrap_unit_kerja("Bagian Umum"), "Bagian Umum");
        assert_eq!(unwrap_unit_kerja("  {\"Sekretariat\"} "), "Sekretariat");
    }

    #[test]
    fn draft_requires_core_fields() {
        assert!(UserDraft::new("", "1", "a@b.c", "pw", Role::Pegawai, None, None).is_err());
        assert!(UserDraft::new("Budi", " ", "a@b.c", "pw", Role::Pegawai, None, None).is_err());
        assert!(UserDraft::new("Budi", "1", "a@b.c", "", Role::Pegawai, None, None).is_err());
    }

    #[test]
    fn draft_serializes_password_write_only_shape() {
        let draft = UserDraft::new(
            "Budi",
            "12345",
            "budi@pemkab.go.id",
            "rahasia",
            Role::Pegawai,
            Some("Staf".to_string()),
            None,
        )
        .expect("draft");
        let json = serde_json::to_value(&draft).expect("serialize");
        assert_eq!(json["nip"], "12345");
        assert_eq!(json["password"], "rahasia");
        assert_eq!(json["role"], "pegawai");
        assert!(json.get("unit_kerja").is_none());
    }

    #[test]
    fn update_never_carries_nip() {
        let update = UserUpdate::new(
            "Budi",
            "budi@pemkab.go.id",
            Role::Pegawai,
            None,
            None,
            Some("{\"Bagian Umum\"}".to_string()),
        )
        .expect("update");
        let json = serde_json::to_value(&update).expect("serialize");
        assert!(json.get("nip").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["unit_kerja"], "{\"Bagian Umum\"}");
    }

    #[test]
    fn update_rejects_blank_replacement_password() {
        assert!(
            UserUpdate::new("Budi", "b@c.d", Role::Pegawai, Some("  ".to_string()), None, None)
                .is_err()
        );
    }
}
