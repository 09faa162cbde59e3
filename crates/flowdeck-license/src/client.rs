//! HTTP client for the license server.
//!
//! Wraps `reqwest` with a fixed timeout and user agent. Non-2xx responses are
//! turned into [`LicenseError::Remote`], keeping the `message` field of a
//! structured JSON error body when the server sent one.

use std::time::Duration;

use flowdeck_core::{normalize_base_url, AppConfig};
use reqwest::{Client, Response, Url};
use serde::Serialize;

use crate::error::LicenseError;
use crate::types::{
    CommunityRegistrationRequest, CommunityRegistrationResponse, EnterpriseTrialRequest,
    RemoteErrorBody,
};

const ENTERPRISE_TRIAL_PATH: &str = "enterprise-trial";
const COMMUNITY_REGISTERED_PATH: &str = "community-registered";

/// Client for the license server endpoints.
///
/// Use [`LicenseServerClient::from_config`] in production or
/// [`LicenseServerClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct LicenseServerClient {
    client: Client,
    base_url: Url,
}

impl LicenseServerClient {
    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`LicenseError::InvalidBaseUrl`] if the configured URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, LicenseError> {
        Self::with_base_url(
            &config.license_server_url,
            config.license_timeout_secs,
            &config.user_agent,
        )
    }

    /// Builds a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`LicenseError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, LicenseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash keeps `Url::join` from replacing the last path segment.
        let normalised = normalize_base_url(base_url);
        let base_url = Url::parse(&normalised).map_err(|e| LicenseError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Requests an enterprise trial. The response body is ignored.
    ///
    /// # Errors
    ///
    /// - [`LicenseError::Http`] on network failure.
    /// - [`LicenseError::Remote`] on a non-2xx status.
    pub(crate) async fn post_enterprise_trial(
        &self,
        body: &EnterpriseTrialRequest<'_>,
    ) -> Result<(), LicenseError> {
        self.post(ENTERPRISE_TRIAL_PATH, body).await?;
        Ok(())
    }

    /// Registers a community edition instance and returns the raw response,
    /// license key included.
    ///
    /// # Errors
    ///
    /// - [`LicenseError::Http`] on network failure.
    /// - [`LicenseError::Remote`] on a non-2xx status.
    /// - [`LicenseError::Deserialize`] if the success body has the wrong shape.
    pub(crate) async fn post_community_registration(
        &self,
        body: &CommunityRegistrationRequest<'_>,
    ) -> Result<CommunityRegistrationResponse, LicenseError> {
        let response = self.post(COMMUNITY_REGISTERED_PATH, body).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| LicenseError::Deserialize {
            context: COMMUNITY_REGISTERED_PATH.to_string(),
            source: e,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, LicenseError> {
        self.base_url
            .join(path)
            .map_err(|e| LicenseError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Sends a JSON POST and returns the response if its status is 2xx.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, LicenseError> {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // An unreadable body just means there is no structured payload.
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<RemoteErrorBody>(&text)
            .ok()
            .map(|b| b.message);
        tracing::debug!(
            status = status.as_u16(),
            path,
            structured = message.is_some(),
            "license server rejected request"
        );
        Err(LicenseError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> LicenseServerClient {
        LicenseServerClient::with_base_url(base_url, 30, "flowdeck-test")
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_onto_base_path() {
        let client = test_client("https://license.example.com/v1");
        let url = client.endpoint(ENTERPRISE_TRIAL_PATH).expect("join");
        assert_eq!(url.as_str(), "https://license.example.com/v1/enterprise-trial");
    }

    #[test]
    fn endpoint_tolerates_trailing_slashes() {
        let client = test_client("https://license.example.com//");
        let url = client.endpoint(COMMUNITY_REGISTERED_PATH).expect("join");
        assert_eq!(url.as_str(), "https://license.example.com/community-registered");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = LicenseServerClient::with_base_url("::not a url::", 30, "ua").unwrap_err();
        assert!(matches!(err, LicenseError::InvalidBaseUrl { .. }));
    }
}
