//! License facade for flowdeck instances.
//!
//! Every license check is bypassed: status is a fixed Enterprise plan and
//! activation/renewal always succeed. The only real network traffic is the
//! enterprise-trial request and community-edition registration, both sent to
//! the license server through [`LicenseServerClient`]. Domain events go out
//! through an injected [`EventNotifier`].

pub mod client;
pub mod error;
pub mod events;
pub mod service;
pub mod types;

pub use client::LicenseServerClient;
pub use error::{map_error_message, LicenseAction, LicenseError, LicenseErrorKind, LicenseFailure};
pub use events::{BroadcastNotifier, EventNotifier, LicenseEvent, PublishedEvent};
pub use service::LicenseService;
pub use types::{
    CommunityRegistration, LicenseStatus, LicenseUsage, PlanInfo, RegistrationResult,
    UsageCounter, UsageLimit, User,
};
