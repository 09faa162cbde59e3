//! License command handlers.
//!
//! Each invocation builds a [`LicenseService`] wired to a
//! [`BroadcastNotifier`]; events published during the command are drained
//! and logged before returning.

use std::sync::Arc;

use clap::Subcommand;
use flowdeck_core::AppConfig;
use flowdeck_license::{BroadcastNotifier, CommunityRegistration, LicenseService, User};
use serde_json::json;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::print_json;

/// Sub-commands available under `license`.
#[derive(Debug, Subcommand)]
pub enum LicenseCommands {
    /// Show plan and usage
    Status,
    /// Print the management token
    Token,
    /// Activate a license key
    Activate {
        /// Activation key
        key: String,
    },
    /// Renew the current license
    Renew,
    /// Request an enterprise trial
    Trial {
        #[arg(long)]
        user_id: Uuid,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
    },
    /// Register this instance as community edition
    Register {
        #[arg(long)]
        user_id: Uuid,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "community-registered")]
        license_type: String,
    },
}

pub(crate) async fn run(config: &AppConfig, command: LicenseCommands) -> anyhow::Result<()> {
    let notifier = Arc::new(BroadcastNotifier::default());
    let mut events = notifier.subscribe();
    let service = LicenseService::from_config(config, notifier)?;

    match command {
        LicenseCommands::Status => print_json(&service.license_data())?,
        LicenseCommands::Token => {
            print_json(&json!({ "token": service.management_jwt() }))?;
        }
        LicenseCommands::Activate { key } => {
            print_json(&json!({ "success": service.activate_license(&key) }))?;
        }
        LicenseCommands::Renew => {
            print_json(&json!({ "success": service.renew_license() }))?;
        }
        LicenseCommands::Trial {
            user_id,
            first_name,
            last_name,
            email,
        } => {
            let user = User {
                id: user_id,
                first_name,
                last_name,
                email,
            };
            service.request_enterprise_trial(&user).await?;
            print_json(&json!({ "success": true }))?;
        }
        LicenseCommands::Register {
            user_id,
            email,
            license_type,
        } => {
            let registration = CommunityRegistration {
                user_id,
                email,
                instance_id: config.instance_id.clone(),
                instance_url: config.webhook_base_url.clone(),
                license_type,
            };
            let result = service.register_community_edition(&registration).await?;
            print_json(&result)?;
        }
    }

    drain_events(&mut events);
    Ok(())
}

fn drain_events(events: &mut broadcast::Receiver<flowdeck_license::PublishedEvent>) {
    while let Ok(event) = events.try_recv() {
        // License keys stay out of the logs.
        let mut payload = event.payload;
        if let Some(key) = payload.get_mut("licenseKey").filter(|k| k.is_string()) {
            *key = json!("[redacted]");
        }
        tracing::info!(
            event = event.name,
            published_at = %event.published_at,
            payload = %payload,
            "license event published"
        );
    }
}
