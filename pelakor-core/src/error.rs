//! Error types for PELAKOR core.

use std::{error::Error, fmt, io};

/// Error type for PELAKOR core operations.
#[derive(Debug)]
pub enum PelakorError {
    /// A payload failed client-side validation and was never sent anywhere.
    Validation(String),
    /// A status or role string from the wire was not recognized.
    Parse(String),
    /// An archive export was requested for an empty report set.
    NoData,
    /// PDF document construction failed.
    Pdf(String),
    /// An underlying I/O error.
    Io(io::Error),
}

impl fmt::Display for PelakorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "validasi gagal: {message}"),
            Self::Parse(message) => write!(f, "nilai tidak dikenal: {message}"),
            Self::NoData => write!(f, "tidak ada data laporan untuk diekspor"),
            Self::Pdf(message) => write!(f, "gagal membuat PDF: {message}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl Error for PelakorError {}

impl From<io::Error> for PelakorError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Convenience result type for PELAKOR core.
pub type Result<T> = std::result::Result<T, PelakorError>;
