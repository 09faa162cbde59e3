use std::fmt;

use thiserror::Error;

/// Errors returned by the license facade and its HTTP client.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The license server answered with a non-2xx status. `message` holds the
    /// `message` field of a structured JSON error body, when there was one.
    #[error("license server returned HTTP {status}")]
    Remote { status: u16, message: Option<String> },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid license server URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Caller-facing rejection. The message is safe to show to end users.
    #[error("{0}")]
    BadRequest(String),
}

impl LicenseError {
    /// The `message` of a structured remote error payload, if this error carries one.
    #[must_use]
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            LicenseError::Remote {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

/// Known failure tags reported by the licensing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseErrorKind {
    SchemaValidation,
    ReservationExhausted,
    ReservationExpired,
    NotFound,
    ReservationConflict,
    ReservationDuplicate,
}

impl LicenseErrorKind {
    /// Parses a backend tag such as `RESERVATION_EXPIRED`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SCHEMA_VALIDATION" => Some(Self::SchemaValidation),
            "RESERVATION_EXHAUSTED" => Some(Self::ReservationExhausted),
            "RESERVATION_EXPIRED" => Some(Self::ReservationExpired),
            "NOT_FOUND" => Some(Self::NotFound),
            "RESERVATION_CONFLICT" => Some(Self::ReservationConflict),
            "RESERVATION_DUPLICATE" => Some(Self::ReservationDuplicate),
            _ => None,
        }
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::SchemaValidation => "SCHEMA_VALIDATION",
            Self::ReservationExhausted => "RESERVATION_EXHAUSTED",
            Self::ReservationExpired => "RESERVATION_EXPIRED",
            Self::NotFound => "NOT_FOUND",
            Self::ReservationConflict => "RESERVATION_CONFLICT",
            Self::ReservationDuplicate => "RESERVATION_DUPLICATE",
        }
    }

    /// Human-readable message shown to the user.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::SchemaValidation => "Activation key is in the wrong format",
            Self::ReservationExhausted => "Activation key has been used too many times",
            Self::ReservationExpired => "Activation key has expired",
            Self::NotFound | Self::ReservationConflict => "Activation key not found",
            Self::ReservationDuplicate => "Activation key has already been used on this instance",
        }
    }
}

/// The license operation a failure happened during.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseAction {
    Activate,
    Renew,
}

impl fmt::Display for LicenseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseAction::Activate => write!(f, "activate"),
            LicenseAction::Renew => write!(f, "renew"),
        }
    }
}

/// A failure raised by the licensing backend, optionally tagged with an
/// error kind.
#[derive(Debug)]
pub struct LicenseFailure {
    pub tag: Option<String>,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl LicenseFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            tag: None,
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn kind(&self) -> Option<LicenseErrorKind> {
        self.tag.as_deref().and_then(LicenseErrorKind::from_tag)
    }
}

/// Maps a backend failure to the message presented to the user.
///
/// Known tags get their fixed message. Anything else falls back to
/// `Failed to <action> license: <message>` and is logged with its source chain.
#[must_use]
pub fn map_error_message(failure: &LicenseFailure, action: LicenseAction) -> String {
    if let Some(kind) = failure.kind() {
        return kind.message().to_string();
    }

    let message = format!("Failed to {action} license: {}", failure.message);
    tracing::error!(
        tag = failure.tag.as_deref().unwrap_or("n/a"),
        source_chain = %source_chain(failure),
        "{message}"
    );
    message
}

fn source_chain(failure: &LicenseFailure) -> String {
    let mut parts = Vec::new();
    let mut next: Option<&(dyn std::error::Error + 'static)> = failure
        .source
        .as_deref()
        .map(|e| e as &(dyn std::error::Error + 'static));
    while let Some(err) = next {
        parts.push(err.to_string());
        next = err.source();
    }
    if parts.is_empty() {
        "n/a".to_string()
    } else {
        parts.join(": ")
    }
}
