#[derive(Clone)]
pub struct AppConfig {
    pub instance_id: String,
    /// Public base URL webhooks are served from. Always ends with `/`.
    pub webhook_base_url: String,
    pub license_server_url: String,
    pub license_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("instance_id", &"[redacted]")
            .field("webhook_base_url", &self.webhook_base_url)
            .field("license_server_url", &self.license_server_url)
            .field("license_timeout_secs", &self.license_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
