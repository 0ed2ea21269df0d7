//! Error types for the portal login flow.

use thiserror::Error;

/// Errors that can abort a login run.
///
/// Every variant is fatal for the run; nothing is retried.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Network failure, body read failure, or HTTP client construction failure
    #[error("HTTP transport error: {0}")]
    Transport(#[from] wreq::Error),

    /// The login page answered with something other than 200
    #[error("login page response not 200: {status}")]
    LoginPageStatus { status: u16 },

    /// No `oktaData = {..."stateToken": "..."...}` assignment in the page
    #[error("stateToken not found in the login page HTML")]
    StateTokenNotFound,

    /// The captured `stateToken` literal is not a valid string literal
    #[error("failed to unescape stateToken literal: {0}")]
    Unescape(#[from] UnescapeError),

    /// The authentication endpoint answered with something other than 200
    #[error("authentication failed: {status} {body}")]
    AuthenticationFailed { status: u16, body: String },

    /// Encoding the static request payload failed.
    ///
    /// The payload only contains strings and booleans, so this indicates a
    /// broken internal invariant rather than an operational failure.
    #[error("internal invariant violated: failed to encode auth payload: {0}")]
    PayloadEncoding(#[source] serde_json::Error),
}

impl LoginError {
    /// Whether this error is an internal invariant violation as opposed to an
    /// operational failure (network, portal, credentials).
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::PayloadEncoding(_))
    }
}

/// Why a quoted string literal could not be decoded.
///
/// Offsets are byte positions inside the literal, quotes excluded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnescapeError {
    #[error("literal is not enclosed in double quotes")]
    Unquoted,

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("escape at offset {offset} is not a valid code point")]
    InvalidCodePoint { offset: usize },

    #[error("raw newline at offset {offset}")]
    RawNewline { offset: usize },

    #[error("decoded literal is not valid UTF-8")]
    InvalidUtf8,
}

/// Errors raised while assembling [`LoginConfig`](crate::LoginConfig).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Result type alias using LoginError.
pub type LoginResult<T> = Result<T, LoginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_message_carries_status_and_body() {
        let err = LoginError::AuthenticationFailed {
            status: 401,
            body: r#"{"errorSummary":"bad creds"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"authentication failed: 401 {"errorSummary":"bad creds"}"#
        );
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_payload_encoding_is_invariant_violation() {
        let json_err = serde_json::from_str::<String>("not json").unwrap_err();
        assert!(LoginError::PayloadEncoding(json_err).is_invariant_violation());
        assert!(!LoginError::StateTokenNotFound.is_invariant_violation());
    }
}
