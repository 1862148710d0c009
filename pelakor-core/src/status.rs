//! Report lifecycle states and the central transition table.
//!
//! The backend is the sole authority on transitions; this table only encodes
//! which requests a client is ever allowed to make, so no command can ask for
//! a transition the server would always refuse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PelakorError;
use crate::role::Role;

/// Lifecycle state of a report.
///
/// Linear pipeline with a single rejection exit:
/// `diajukan -> {diproses -> ditindaklanjuti -> selesai | ditolak}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLaporan {
    /// Submitted, waiting for a disposition decision.
    Diajukan,
    /// Approved and routed to a responsible party.
    Diproses,
    /// Follow-up in progress.
    Ditindaklanjuti,
    /// Closed out.
    Selesai,
    /// Rejected, terminal.
    Ditolak,
}

impl StatusLaporan {
    /// All states, in pipeline order.
    pub const ALL: [StatusLaporan; 5] = [
        StatusLaporan::Diajukan,
        StatusLaporan::Diproses,
        StatusLaporan::Ditindaklanjuti,
        StatusLaporan::Selesai,
        StatusLaporan::Ditolak,
    ];

    /// Wire string for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLaporan::Diajukan => "diajukan",
            StatusLaporan::Diproses => "diproses",
            StatusLaporan::Ditindaklanjuti => "ditindaklanjuti",
            StatusLaporan::Selesai => "selesai",
            StatusLaporan::Ditolak => "ditolak",
        }
    }

    /// Human-readable label for rendering.
    pub fn label(self) -> &'static str {
        match self {
            StatusLaporan::Diajukan => "Diajukan",
            StatusLaporan::Diproses => "Diproses",
            StatusLaporan::Ditindaklanjuti => "Ditindaklanjuti",
            StatusLaporan::Selesai => "Selesai",
            StatusLaporan::Ditolak => "Ditolak",
        }
    }

    /// Whether no further transition exists from this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, StatusLaporan::Selesai | StatusLaporan::Ditolak)
    }

    /// Whether the submitter may still edit or delete the report.
    ///
    /// Content is mutable only before the first disposition decision.
    pub fn allows_edit(self) -> bool {
        self == StatusLaporan::Diajukan
    }

    /// Transitions `role` may request from this state.
    pub fn allowed_transitions(self, role: Role) -> &'static [StatusLaporan] {
        match (self, role) {
            (StatusLaporan::Diajukan, Role::KabbagUmum) => {
                &[StatusLaporan::Diproses, StatusLaporan::Ditolak]
            }
            (StatusLaporan::Diproses | StatusLaporan::Ditindaklanjuti, Role::SubbagUmum) => &[
                StatusLaporan::Ditindaklanjuti,
                StatusLaporan::Selesai,
                StatusLaporan::Ditolak,
            ],
            _ => &[],
        }
    }
}

/// Whether `role` may request the transition `from -> to`.
pub fn can_transition(from: StatusLaporan, to: StatusLaporan, role: Role) -> bool {
    from.allowed_transitions(role).contains(&to)
}

impl fmt::Display for StatusLaporan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusLaporan {
    type Err = PelakorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        StatusLaporan::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| PelakorError::Parse(format!("status laporan '{value}'")))
    }
}

/// Status choice carried by a follow-up submission.
///
/// The subset of [`StatusLaporan`] a follow-up writes; the parent report's
/// status is re-fetched afterwards, never derived locally.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTindakLanjut {
    /// Still being worked on.
    Ditindaklanjuti,
    /// Work finished, closes the report.
    Selesai,
    /// Refused at follow-up stage.
    Ditolak,
}

impl StatusTindakLanjut {
    /// Wire string for this choice.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusTindakLanjut::Ditindaklanjuti => "ditindaklanjuti",
            StatusTindakLanjut::Selesai => "selesai",
            StatusTindakLanjut::Ditolak => "ditolak",
        }
    }

    /// The report state this choice maps to.
    pub fn as_status_laporan(self) -> StatusLaporan {
        match self {
            StatusTindakLanjut::Ditindaklanjuti => StatusLaporan::Ditindaklanjuti,
            StatusTindakLanjut::Selesai => StatusLaporan::Selesai,
            StatusTindakLanjut::Ditolak => StatusLaporan::Ditolak,
        }
    }
}

impl fmt::Display for StatusTindakLanjut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusTindakLanjut {
    type Err = PelakorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ditindaklanjuti" => Ok(StatusTindakLanjut::Ditindaklanjuti),
            "selesai" => Ok(StatusTindakLanjut::Selesai),
            "ditolak" => Ok(StatusTindakLanjut::Ditolak),
            other => Err(PelakorError::Parse(format!("status tindak lanjut '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StatusLaporan, StatusTindakLanjut, can_transition};
    use crate::role::Role;
    use std::str::FromStr;

    #[test]
    fn wire_strings_round_trip() {
        for status in StatusLaporan::ALL {
            let parsed = StatusLaporan::from_str(status.as_str()).expect("parse status");
            assert_eq!(parsed, status);
        }
        assert!(StatusLaporan::from_str("dibatalkan").is_err());
    }

    #[test]
    fn serde_uses_lowercase_wire_form() {
        let json = serde_json::to_string(&StatusLaporan::Ditindaklanjuti).expect("serialize");
        assert_eq!(json, "\"ditindaklanjuti\"");
        let parsed: StatusLaporan = serde_json::from_str("\"diajukan\"").expect("deserialize");
        assert_eq!(parsed, StatusLaporan::Diajukan);
    }

    #[test]
    fn disposition_moves_only_from_diajukan() {
        assert!(can_transition(
            StatusLaporan::Diajukan,
            StatusLaporan::Diproses,
            Role::KabbagUmum
        ));
        assert!(can_transition(
            StatusLaporan::Diajukan,
            StatusLaporan::Ditolak,
            Role::KabbagUmum
        ));
        assert!(!can_transition(
            StatusLaporan::Diajukan,
            StatusLaporan::Selesai,
            Role::KabbagUmum
        ));
        assert!(!can_transition(
            StatusLaporan::Diproses,
            StatusLaporan::Ditolak,
            Role::KabbagUmum
        ));
    }

    #[test]
    fn follow_up_moves_from_diproses_and_ditindaklanjuti() {
        for from in [StatusLaporan::Diproses, StatusLaporan::Ditindaklanjuti] {
            assert!(can_transition(from, StatusLaporan::Ditindaklanjuti, Role::SubbagUmum));
            assert!(can_transition(from, StatusLaporan::Selesai, Role::SubbagUmum));
            assert!(can_transition(from, StatusLaporan::Ditolak, Role::SubbagUmum));
            assert!(!can_transition(from, StatusLaporan::Diajukan, Role::SubbagUmum));
        }
    }

    #[test]
    fn terminal_states_allow_nothing_for_anyone() {
        for from in [StatusLaporan::Selesai, StatusLaporan::Ditolak] {
            assert!(from.is_terminal());
            for to in StatusLaporan::ALL {
                for role in Role::ALL {
                    assert!(!can_transition(from, to, role), "{from} -> {to} as {role}");
                }
            }
        }
    }

    #[test]
    fn other_roles_request_no_transitions() {
        for from in StatusLaporan::ALL {
            for to in StatusLaporan::ALL {
                for role in [Role::Pegawai, Role::Opd, Role::Bupati, Role::Sekda] {
                    assert!(!can_transition(from, to, role));
                }
            }
        }
    }

    #[test]
    fn edit_gate_is_exactly_diajukan() {
        assert!(StatusLaporan::Diajukan.allows_edit());
        for status in [
            StatusLaporan::Diproses,
            StatusLaporan::Ditindaklanjuti,
            StatusLaporan::Selesai,
            StatusLaporan::Ditolak,
        ] {
            assert!(!status.allows_edit());
        }
    }

    #[test]
    fn follow_up_status_maps_into_lifecycle() {
        assert_eq!(
            StatusTindakLanjut::Selesai.as_status_laporan(),
            StatusLaporan::Selesai
        );
        assert_eq!(
            StatusTindakLanjut::from_str("ditolak").expect("parse").as_status_laporan(),
            StatusLaporan::Ditolak
        );
        assert!(StatusTindakLanjut::from_str("diajukan").is_err());
    }
}
