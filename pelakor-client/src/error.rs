//! The single error type every API call surfaces.

use std::{error::Error, fmt};

/// Fixed message for a request that hit the 30-second timeout.
pub const TIMEOUT_MESSAGE: &str = "Permintaan melebihi batas waktu. Coba lagi.";
/// Fixed message for a request that never reached the server.
pub const NETWORK_MESSAGE: &str = "Tidak dapat terhubung ke server. Periksa koneksi Anda.";
/// Fallback message when the server gives none.
pub const GENERIC_MESSAGE: &str = "Terjadi kesalahan pada server.";

/// Error carried by every failed API call: a message plus a numeric status.
///
/// The status encodes the failure class: the HTTP status for a server
/// rejection, 408 for the client-side timeout, 0 for a connectivity failure,
/// and 500 for anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Status code for the failure class.
    pub status: u16,
    /// Human-readable message, never empty.
    pub message: String,
}

impl ApiError {
    /// The request hit the client-side timeout.
    pub fn timeout() -> Self {
        Self { status: 408, message: TIMEOUT_MESSAGE.to_string() }
    }

    /// The request never reached the server.
    pub fn network() -> Self {
        Self { status: 0, message: NETWORK_MESSAGE.to_string() }
    }

    /// Any other client-side failure.
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: 500,
            message: if message.trim().is_empty() { GENERIC_MESSAGE.to_string() } else { message },
        }
    }

    /// A non-2xx response; uses the server's message when it has one.
    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| GENERIC_MESSAGE.to_string());
        Self { status, message }
    }

    /// Classify a transport-level `reqwest` failure.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout()
        } else if err.is_connect() {
            Self::network()
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl Error for ApiError {}
