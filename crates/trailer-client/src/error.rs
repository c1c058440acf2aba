//! Error types for client construction.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Username or token variable is unset or empty.
    #[error("need to set {username_var} and {token_var}")]
    MissingCredentials {
        username_var: String,
        token_var: String,
    },

    /// The base URL cannot be used to build endpoint URLs.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
