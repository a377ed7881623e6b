//! # CipherCert Core
//!
//! Everything that talks to the scanning backend.
//!
//! * **[`http`]**: the [`http::HttpClient`] port, its reqwest implementation
//!   and a mock for tests.
//! * **[`api`]**: typed wrapper over the backend's endpoints.
//! * **[`runner`]**: the sequential bulk submission loop.
//! * **[`history`]**: history queries built on the API.

pub mod api;
pub mod error;
pub mod history;
pub mod http;
pub mod runner;
