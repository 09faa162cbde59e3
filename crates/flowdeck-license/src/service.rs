use std::sync::Arc;

use flowdeck_core::AppConfig;

use crate::client::LicenseServerClient;
use crate::error::LicenseError;
use crate::events::{EventNotifier, LicenseEvent};
use crate::types::{
    CommunityRegistration, CommunityRegistrationRequest, EnterpriseTrialRequest, LicenseStatus,
    LicenseUsage, PlanInfo, RegistrationResult, UsageCounter, UsageLimit, User,
};

const MANAGEMENT_JWT: &str = "valid-jwt-token";
const REGISTER_FAILED: &str = "Failed to register community edition";

/// License operations exposed to the rest of the application.
///
/// Plan checks are bypassed: the instance always reports an Enterprise plan
/// and activation/renewal always succeed. Trial requests and community
/// registrations go to the license server.
pub struct LicenseService {
    client: LicenseServerClient,
    webhook_base_url: String,
    notifier: Arc<dyn EventNotifier>,
}

impl LicenseService {
    pub fn new(
        client: LicenseServerClient,
        webhook_base_url: impl Into<String>,
        notifier: Arc<dyn EventNotifier>,
    ) -> Self {
        Self {
            client,
            webhook_base_url: webhook_base_url.into(),
            notifier,
        }
    }

    /// # Errors
    ///
    /// Returns [`LicenseError`] if the license server client cannot be built.
    pub fn from_config(
        config: &AppConfig,
        notifier: Arc<dyn EventNotifier>,
    ) -> Result<Self, LicenseError> {
        let client = LicenseServerClient::from_config(config)?;
        Ok(Self::new(client, config.webhook_base_url.clone(), notifier))
    }

    /// Current plan and usage: always Enterprise with no trigger limit.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn license_data(&self) -> LicenseStatus {
        LicenseStatus {
            usage: LicenseUsage {
                active_workflow_triggers: UsageCounter {
                    value: 0,
                    limit: UsageLimit::Unbounded,
                    warning_threshold: 0.8,
                },
            },
            license: PlanInfo {
                plan_id: "enterprise".to_string(),
                plan_name: "Enterprise".to_string(),
            },
        }
    }

    /// Asks the license server to start an enterprise trial for `user`.
    ///
    /// # Errors
    ///
    /// Any [`LicenseError`] from the request is returned as-is.
    pub async fn request_enterprise_trial(&self, user: &User) -> Result<(), LicenseError> {
        let body = EnterpriseTrialRequest {
            license_type: "enterprise",
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            instance_url: &self.webhook_base_url,
        };
        self.client.post_enterprise_trial(&body).await?;
        tracing::info!(user_id = %user.id, "enterprise trial requested");
        Ok(())
    }

    /// Registers this instance as community edition and returns the server's
    /// title/text. The issued license key is published in a
    /// `license-community-plus-registered` event and never returned.
    ///
    /// # Errors
    ///
    /// Always [`LicenseError::BadRequest`]. When the server sent a structured
    /// error its message is appended; any other failure is logged and reported
    /// with a generic message.
    pub async fn register_community_edition(
        &self,
        registration: &CommunityRegistration,
    ) -> Result<RegistrationResult, LicenseError> {
        let body = CommunityRegistrationRequest {
            email: &registration.email,
            instance_id: &registration.instance_id,
            instance_url: &registration.instance_url,
            license_type: &registration.license_type,
        };

        let response = match self.client.post_community_registration(&body).await {
            Ok(response) => response,
            Err(err) => return Err(Self::registration_error(err)),
        };

        self.notifier.emit(LicenseEvent::CommunityPlusRegistered {
            user_id: registration.user_id,
            email: registration.email.clone(),
            license_key: response.license_key,
        });
        Ok(response.result)
    }

    fn registration_error(err: LicenseError) -> LicenseError {
        if let Some(message) = err.remote_message() {
            return LicenseError::BadRequest(format!("{REGISTER_FAILED}: {message}"));
        }
        tracing::error!(error = %err, detail = ?err, "{REGISTER_FAILED}");
        LicenseError::BadRequest(REGISTER_FAILED.to_string())
    }

    /// Placeholder management token. Nothing validates it.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn management_jwt(&self) -> &'static str {
        MANAGEMENT_JWT
    }

    /// Accepts any activation key.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn activate_license(&self, _activation_key: &str) -> bool {
        tracing::debug!("License activation bypassed, returning success");
        true
    }

    /// Always succeeds and publishes `license-renewal-attempted`.
    #[must_use]
    pub fn renew_license(&self) -> bool {
        tracing::debug!("License renewal bypassed, returning success");
        self.notifier.emit(LicenseEvent::RenewalAttempted { success: true });
        true
    }
}
