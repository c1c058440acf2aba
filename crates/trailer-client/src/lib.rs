//! Blocking HTTP client for the TestRail API v2.
//!
//! [`TestRailClient`] implements [`TestRailApi`](trailer_transfer::TestRailApi)
//! with basic authentication. Credentials come from `TESTRAIL_USERNAME` and
//! `TESTRAIL_TOKEN`, optionally prefixed per account (`MIRANTIS_TESTRAIL_TOKEN`).
//!
//! # Example
//!
//! ```ignore
//! use trailer_client::{Credentials, DEFAULT_BASE_URL, TestRailClient};
//!
//! let client = TestRailClient::new(DEFAULT_BASE_URL, Credentials::from_env("")?)?;
//! ```

mod client;
mod credentials;
mod error;

pub use client::{DEFAULT_BASE_URL, TestRailClient};
pub use credentials::Credentials;
pub use error::{ClientError, Result};
