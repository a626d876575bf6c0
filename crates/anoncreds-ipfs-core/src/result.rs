//! Results of registry reads and writes.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub type Resolution<T> = Result<Resolved<T>, ResolutionFailure>;
pub type Registration<T> = Result<Registered<T>, RegistrationFailure>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resolved<T> {
    pub object: T,
    pub id: String,
    pub resolution_metadata: Map<String, Value>,
    pub object_metadata: Map<String, Value>,
}

impl<T> Resolved<T> {
    pub fn new(id: String, object: T) -> Self {
        Self {
            object,
            id,
            resolution_metadata: Map::new(),
            object_metadata: Map::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionErrorKind {
    /// Malformed id, unparsable content, or failed cross-reference.
    Invalid,
    /// Well-formed id, but the store could not produce the bytes.
    NotFound,
    NotImplemented,
}

impl Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Invalid => "invalid",
            Self::NotFound => "notFound",
            Self::NotImplemented => "notImplemented",
        })
    }
}

#[derive(Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[error("{error}: {message}")]
pub struct ResolutionFailure {
    pub error: ResolutionErrorKind,
    pub message: String,
}

impl ResolutionFailure {
    pub fn new(error: ResolutionErrorKind, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Registered<T> {
    pub object: T,
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationErrorKind {
    /// A pre-condition failed before anything was uploaded.
    Invalid,
    /// Writing to the store failed.
    UnknownError,
}

impl Display for RegistrationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Invalid => "invalid",
            Self::UnknownError => "unknownError",
        })
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failed registration.
///
/// The underlying error is kept in `cause` and never formatted into
/// `message`, so callers decide how much detail to expose.
#[derive(Error, Serialize, Debug)]
#[error("{reason}: {message}")]
pub struct RegistrationFailure {
    pub reason: RegistrationErrorKind,
    pub message: String,
    #[source]
    #[serde(skip)]
    pub cause: Option<BoxError>,
}

impl RegistrationFailure {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            reason: RegistrationErrorKind::Invalid,
            message: message.into(),
            cause: None,
        }
    }

    pub fn unknown(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            reason: RegistrationErrorKind::UnknownError,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// Wire shape of a registration result, tagged by `state`.
#[derive(Serialize, Debug)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RegistrationOutcome<T> {
    Finished(Registered<T>),
    Failed(RegistrationFailure),
}

impl<T> From<Registration<T>> for RegistrationOutcome<T> {
    fn from(value: Registration<T>) -> Self {
        match value {
            Ok(registered) => Self::Finished(registered),
            Err(failure) => Self::Failed(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_resolution_failure_shape() {
        let failure = ResolutionFailure::new(ResolutionErrorKind::NotFound, "ipfs fetch error");
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({ "error": "notFound", "message": "ipfs fetch error" })
        );
        assert_eq!(failure.to_string(), "notFound: ipfs fetch error");
    }

    #[test]
    fn test_resolved_shape() {
        let resolved = Resolved::new("ipfs://bafk".to_string(), json!({ "name": "a" }));
        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            json!({
                "object": { "name": "a" },
                "id": "ipfs://bafk",
                "resolutionMetadata": {},
                "objectMetadata": {},
            })
        );
    }

    #[test]
    fn test_registration_outcome_shape() {
        let ok = RegistrationOutcome::from(Registration::Ok(Registered {
            object: json!({ "name": "a" }),
            id: "ipfs://bafk".to_string(),
        }));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "state": "finished", "object": { "name": "a" }, "id": "ipfs://bafk" })
        );

        let failed = RegistrationOutcome::from(Registration::<Value>::Err(
            RegistrationFailure::unknown("upload failed", "connection reset"),
        ));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "state": "failed", "reason": "unknownError", "message": "upload failed" })
        );
    }

    #[test]
    fn test_cause_not_interpolated() {
        let failure = RegistrationFailure::unknown("upload failed", "connection reset");
        assert_eq!(failure.to_string(), "unknownError: upload failed");
        assert_eq!(failure.source().unwrap().to_string(), "connection reset");
    }
}
