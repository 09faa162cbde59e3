use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Snapshot of the instance's license plan and usage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseStatus {
    pub usage: LicenseUsage,
    pub license: PlanInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseUsage {
    pub active_workflow_triggers: UsageCounter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounter {
    pub value: u64,
    pub limit: UsageLimit,
    /// Fraction of `limit` at which the UI starts warning.
    pub warning_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInfo {
    pub plan_id: String,
    pub plan_name: String,
}

/// Quota on a usage counter. Serializes as `-1` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLimit {
    Unbounded,
    Bounded(u64),
}

impl UsageLimit {
    #[must_use]
    pub fn is_unbounded(self) -> bool {
        matches!(self, UsageLimit::Unbounded)
    }
}

impl Serialize for UsageLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UsageLimit::Unbounded => serializer.serialize_i64(-1),
            UsageLimit::Bounded(n) => serializer.serialize_u64(*n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Fields submitted when registering a community edition instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRegistration {
    pub user_id: Uuid,
    pub email: String,
    pub instance_id: String,
    pub instance_url: String,
    pub license_type: String,
}

/// What the caller gets back from a community registration. The license key
/// never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResult {
    pub title: String,
    pub text: String,
}

// Wire shapes for the license server.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnterpriseTrialRequest<'a> {
    pub license_type: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub instance_url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommunityRegistrationRequest<'a> {
    pub email: &'a str,
    pub instance_id: &'a str,
    pub instance_url: &'a str,
    pub license_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommunityRegistrationResponse {
    /// Absent when the server registered the instance without issuing a key.
    #[serde(default)]
    pub license_key: Option<String>,
    #[serde(flatten)]
    pub result: RegistrationResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoteErrorBody {
    pub message: String,
}
