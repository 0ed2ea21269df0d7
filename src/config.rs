//! Startup configuration.
//!
//! Everything the login flow needs is collected here once, then handed to
//! [`PortalClient`](crate::PortalClient). Nothing downstream reads the process
//! environment.

use std::env;
use std::fmt;

use crate::error::ConfigError;
use crate::types::AuthOptions;

pub const LOGIN_URL: &str = "https://cp37.cs.cityu.edu.hk/cp";
pub const AUTH_URL: &str = "https://auth.cityu.edu.hk/api/v1/authn";

pub const USERNAME_ENV: &str = "AIMS_USERNAME";
pub const PASSWORD_ENV: &str = "AIMS_PASSWORD";

/// Portal login credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for PortalClient
#[derive(Debug, Clone)]
pub struct LoginConfig {
    pub credentials: Credentials,
    /// Unauthenticated page embedding the Okta `stateToken`
    pub login_url: String,
    /// Okta primary authentication endpoint
    pub auth_url: String,
    pub auth_options: AuthOptions,
}

impl LoginConfig {
    /// Config pointing at the production portal.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            login_url: LOGIN_URL.to_string(),
            auth_url: AUTH_URL.to_string(),
            auth_options: AuthOptions::default(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username = var(USERNAME_ENV).ok_or(ConfigError::MissingVar(USERNAME_ENV))?;
        let password = var(PASSWORD_ENV).ok_or(ConfigError::MissingVar(PASSWORD_ENV))?;
        Ok(Self::new(Credentials::new(username, password)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config =
            LoginConfig::from_lookup(lookup(&[(USERNAME_ENV, "student"), (PASSWORD_ENV, "pw")]))
                .unwrap();
        assert_eq!(config.credentials, Credentials::new("student", "pw"));
        assert_eq!(config.login_url, LOGIN_URL);
        assert_eq!(config.auth_url, AUTH_URL);
        assert_eq!(config.auth_options, AuthOptions::default());
    }

    #[test]
    fn test_missing_credentials() {
        let err = LoginConfig::from_lookup(lookup(&[(PASSWORD_ENV, "pw")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(USERNAME_ENV));

        let err = LoginConfig::from_lookup(lookup(&[(USERNAME_ENV, "student"), (PASSWORD_ENV, "")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(PASSWORD_ENV));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("student", "s3cr3t");
        let rendered = format!("{:?}", LoginConfig::new(creds));
        assert!(rendered.contains("student"));
        assert!(!rendered.contains("s3cr3t"));
    }
}
