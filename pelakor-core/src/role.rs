//! Role model and the single routing/permission table.
//!
//! Every command checks this table instead of comparing role strings ad hoc.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PelakorError;

/// Closed set of roles known to the PELAKOR backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regent, read-only executive.
    Bupati,
    /// Vice regent, read-only executive.
    WakilBupati,
    /// Regional secretary, read-only executive.
    Sekda,
    /// Assistant to the secretary, read-only executive.
    Asisten,
    /// Expert staff, read-only executive.
    StafAhli,
    /// General affairs division head: dispositions reports and manages users.
    KabbagUmum,
    /// General affairs sub-division: acts on dispositioned reports.
    SubbagUmum,
    /// Employee: submits reports.
    Pegawai,
    /// Regional work-unit account: submits reports.
    Opd,
}

/// The workspace a role lands in after login.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Workspace {
    /// Report submission and tracking.
    Pelapor,
    /// Disposition queue.
    Disposisi,
    /// Follow-up queue.
    TindakLanjut,
    /// Read-only status recap.
    Eksekutif,
}

impl Role {
    /// All roles, in wire order.
    pub const ALL: [Role; 9] = [
        Role::Bupati,
        Role::WakilBupati,
        Role::Sekda,
        Role::Asisten,
        Role::StafAhli,
        Role::KabbagUmum,
        Role::SubbagUmum,
        Role::Pegawai,
        Role::Opd,
    ];

    /// Wire string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Bupati => "bupati",
            Role::WakilBupati => "wakil_bupati",
            Role::Sekda => "sekda",
            Role::Asisten => "asisten",
            Role::StafAhli => "staf_ahli",
            Role::KabbagUmum => "kabbag_umum",
            Role::SubbagUmum => "subbag_umum",
            Role::Pegawai => "pegawai",
            Role::Opd => "opd",
        }
    }

    /// Workspace this role is routed to.
    pub fn workspace(self) -> Workspace {
        match self {
            Role::Pegawai | Role::Opd => Workspace::Pelapor,
            Role::KabbagUmum => Workspace::Disposisi,
            Role::SubbagUmum => Workspace::TindakLanjut,
            Role::Bupati | Role::WakilBupati | Role::Sekda | Role::Asisten | Role::StafAhli => {
                Workspace::Eksekutif
            }
        }
    }

    /// Whether this role may create, edit, and delete its own reports.
    pub fn can_submit(self) -> bool {
        matches!(self.workspace(), Workspace::Pelapor)
    }

    /// Whether this role decides dispositions.
    pub fn can_disposition(self) -> bool {
        self == Role::KabbagUmum
    }

    /// Whether this role submits follow-ups.
    pub fn can_follow_up(self) -> bool {
        self == Role::SubbagUmum
    }

    /// Whether this role administers the user directory.
    pub fn can_manage_users(self) -> bool {
        self == Role::KabbagUmum
    }

    /// Whether this role only reads the status recap.
    pub fn is_executive(self) -> bool {
        matches!(self.workspace(), Workspace::Eksekutif)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PelakorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| PelakorError::Parse(format!("role '{value}'")))
    }
}
