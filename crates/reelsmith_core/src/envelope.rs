//! Outward response envelope.

use crate::{Operation, SanitizedResult};
use derive_getters::Getters;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Response body returned for every operation request.
///
/// Serializes as
/// `{success, <payload_key>?, metadata?, warning?, error?, message?}`,
/// omitting absent fields.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ResponseEnvelope {
    /// Whether the operation produced a payload
    success: bool,
    /// Operation-specific key and sanitized model output
    payload: Option<(&'static str, Value)>,
    /// Echoed request inputs
    metadata: Option<Map<String, Value>>,
    /// Set when the output could not be parsed as JSON
    warning: Option<String>,
    /// Failure detail
    error: Option<String>,
    /// Generic failure description
    message: Option<String>,
}

impl ResponseEnvelope {
    /// Successful envelope carrying sanitized output.
    ///
    /// A parse diagnostic on `result` becomes the envelope's warning.
    pub fn completed(
        operation: Operation,
        result: SanitizedResult,
        metadata: Map<String, Value>,
    ) -> Self {
        let warning = result.diagnostic().map(|diagnostic| {
            format!(
                "Could not parse model output as JSON, returning raw text: {}",
                diagnostic
            )
        });
        Self {
            success: true,
            payload: Some((operation.payload_key(), result.into_value())),
            metadata: Some(metadata),
            warning,
            error: None,
            message: None,
        }
    }

    /// Client-error envelope for a request rejected before dispatch.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            metadata: None,
            warning: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Server-error envelope with detail and a generic message.
    pub fn failed(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            metadata: None,
            warning: None,
            error: Some(error.into()),
            message: Some(message.into()),
        }
    }

    /// Payload value, if this envelope carries one.
    pub fn payload_value(&self) -> Option<&Value> {
        self.payload.as_ref().map(|(_, value)| value)
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("success", &self.success)?;
        if let Some((key, value)) = &self.payload {
            map.serialize_entry(key, value)?;
        }
        if let Some(metadata) = &self.metadata {
            map.serialize_entry("metadata", metadata)?;
        }
        if let Some(warning) = &self.warning {
            map.serialize_entry("warning", warning)?;
        }
        if let Some(error) = &self.error {
            map.serialize_entry("error", error)?;
        }
        if let Some(message) = &self.message {
            map.serialize_entry("message", message)?;
        }
        map.end()
    }
}
