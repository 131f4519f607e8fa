//! Run configuration from the environment.
//!
//! The suite is pointed at a deployment through environment variables; the
//! engine treats all of them as opaque strings. Credentials never appear in
//! logs or `Debug` output.

use crate::result::{Error, Result};
use std::env;
use std::fmt;

/// Environment variable naming the base URL of the site under test
pub const BASE_URL_VAR: &str = "ESCAPARATE_BASE_URL";
/// Environment variable naming the test account login
pub const LOGIN_VAR: &str = "ESCAPARATE_LOGIN";
/// Environment variable naming the test account password
pub const PASSWORD_VAR: &str = "ESCAPARATE_PASSWORD";

/// Deployment coordinates and credentials for one run
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL the main page opens with
    pub base_url: String,
    /// Login for the authorized-session variants
    pub login: String,
    /// Password for the authorized-session variants
    pub password: String,
}

impl Config {
    /// Read the full configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: required(BASE_URL_VAR)?,
            login: required(LOGIN_VAR)?,
            password: required(PASSWORD_VAR)?,
        })
    }

    /// Read only the base URL, for guest-session runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the variable is unset.
    pub fn base_url_from_env() -> Result<String> {
        required(BASE_URL_VAR)
    }
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::config(format!("environment variable {name} is not set"))),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}
