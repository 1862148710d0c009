#![deny(missing_docs)]
//! PELAKOR core library.
//!
//! Domain types and contracts shared by the PELAKOR client and CLI: the
//! report lifecycle state machine, role permissions, validated payloads, and
//! the archive exporter.

pub mod arsip;
pub mod disposisi;
pub mod error;
pub mod laporan;
pub mod pengguna;
pub mod role;
pub mod status;
pub mod tindak_lanjut;

pub use arsip::{ExportFile, ExportFormat, ExportOptions, Periode, export_archive};
pub use disposisi::{DisposisiDecision, DisposisiRecord};
pub use error::{PelakorError, Result};
pub use laporan::{Kategori, Laporan, LaporanDraft, LaporanPerubahan};
pub use pengguna::{User, UserDraft, UserUpdate, unwrap_unit_kerja};
pub use role::{Role, Workspace};
pub use status::{StatusLaporan, StatusTindakLanjut, can_transition};
pub use tindak_lanjut::{TindakLanjutDraft, TindakLanjutRecord};
