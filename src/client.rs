use wreq::{Client, StatusCode, header};
use wreq_util::Emulation;

use crate::config::LoginConfig;
use crate::error::{LoginError, LoginResult};
use crate::token;
use crate::types::AuthRequest;

/// Drives the three-step Okta login against the intranet portal:
/// fetch the login page, scrape its `stateToken`, then post credentials.
pub struct PortalClient {
    http_client: Client,
    config: LoginConfig,
}

impl PortalClient {
    pub fn new(config: LoginConfig) -> LoginResult<Self> {
        let http_client = Client::builder()
            .emulation(Emulation::Chrome143)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .zstd(true)
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Run the full login sequence and return the raw authentication response.
    ///
    /// The first failing step aborts the run; nothing is retried.
    pub async fn login(&self) -> LoginResult<String> {
        let login_page = self.fetch_login_page().await?;
        let state_token = token::extract_state_token(&login_page)?;
        tracing::debug!(len = state_token.len(), "Extracted stateToken");

        let res_body = self.authenticate(&state_token).await?;
        tracing::info!(res_body = %res_body, "login ok");

        Ok(res_body)
    }

    /// GET the unauthenticated login page.
    // TODO: no timeout on this request; a hung portal blocks the run forever.
    pub async fn fetch_login_page(&self) -> LoginResult<Vec<u8>> {
        tracing::debug!(url = %self.config.login_url, "Fetching login page");

        let response = self.http_client.get(&self.config.login_url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LoginError::LoginPageStatus {
                status: status.as_u16(),
            });
        }

        let page = response.bytes().await?;
        tracing::debug!(bytes = page.len(), "Login page fetched");

        Ok(page.to_vec())
    }

    /// POST the credentials to the authentication endpoint.
    ///
    /// `state_token` marks that the portal handed out a fresh login
    /// transaction; the endpoint itself only receives username, password and
    /// the fixed options.
    pub async fn authenticate(&self, state_token: &str) -> LoginResult<String> {
        let credentials = &self.config.credentials;
        let request = AuthRequest {
            password: &credentials.password,
            username: &credentials.username,
            options: self.config.auth_options,
        };
        let body = serde_json::to_vec(&request).map_err(LoginError::PayloadEncoding)?;

        tracing::debug!(
            url = %self.config.auth_url,
            username = %credentials.username,
            state_token_len = state_token.len(),
            "Submitting credentials"
        );

        let response = self
            .http_client
            .post(&self.config.auth_url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let res_body = response.text().await?;

        if status != StatusCode::OK {
            return Err(LoginError::AuthenticationFailed {
                status: status.as_u16(),
                body: res_body,
            });
        }

        Ok(res_body)
    }
}
