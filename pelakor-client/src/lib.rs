#![deny(missing_docs)]
//! PELAKOR API client.
//!
//! Typed wrapper over the PELAKOR backend's JSON-over-HTTPS API: one choke
//! point for timeouts, bearer-token attachment, and error normalization,
//! plus one method per REST endpoint.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginResponse, MessageResponse};
pub use error::{ApiError, GENERIC_MESSAGE, NETWORK_MESSAGE, TIMEOUT_MESSAGE};
