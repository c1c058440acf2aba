//! Account credentials read from the environment.

use std::fmt;

use crate::error::{ClientError, Result};

const USERNAME_VAR: &str = "TESTRAIL_USERNAME";
const TOKEN_VAR: &str = "TESTRAIL_TOKEN";

/// Username and API token of one account.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Reads `{prefix}TESTRAIL_USERNAME` and `{prefix}TESTRAIL_TOKEN`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_lookup(prefix, |name| std::env::var(name).ok())
    }

    /// Like [`Credentials::from_env`], with variables resolved by `lookup`.
    pub fn from_lookup(prefix: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let username_var = format!("{prefix}{USERNAME_VAR}");
        let token_var = format!("{prefix}{TOKEN_VAR}");
        let username = lookup(&username_var).filter(|v| !v.is_empty());
        let token = lookup(&token_var).filter(|v| !v.is_empty());
        match (username, token) {
            (Some(username), Some(token)) => Ok(Self::new(username, token)),
            _ => Err(ClientError::MissingCredentials {
                username_var,
                token_var,
            }),
        }
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}
