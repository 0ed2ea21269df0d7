use serde::Serialize;

/// Request body for the Okta primary authentication endpoint
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub password: &'a str,
    pub username: &'a str,
    pub options: AuthOptions,
}

/// Options forwarded verbatim to the authentication endpoint.
///
/// The portal's effect of these flags is undocumented; they are sent as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOptions {
    pub warn_before_password_expired: bool,
    pub multi_optional_factor_enroll: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            warn_before_password_expired: true,
            multi_optional_factor_enroll: true,
        }
    }
}
