//! # Bridge Envelopes
//!
//! The structured messages exchanged with the host.
//!
//! ```text
//! Request  := { channel: string, data: object, callbackId: string }
//! Reply    := { status: "success", data: any }
//!          |  { status: "error",   error: string }
//! Event    := ( eventName: string, data: any )
//! ```
//!
//! Requests are produced by us and therefore strongly typed. Replies come
//! from the host and are interpreted leniently from raw JSON so that a
//! malformed reply can still settle the call it targets.

use crate::correlation::CorrelationId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire value of `status` for a successful reply.
pub const STATUS_SUCCESS: &str = "success";

/// Wire value of `status` for a failed reply.
pub const STATUS_ERROR: &str = "error";

/// Outbound message handed to the host's one-way send primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Name of the remote operation.
    pub channel: String,
    /// Argument bag, always a JSON object.
    pub data: Value,
    /// Token the host must echo back with its reply.
    pub callback_id: CorrelationId,
}

impl RequestEnvelope {
    /// Build a request, normalising a `null` argument bag to `{}`.
    pub fn new(channel: impl Into<String>, data: Value, callback_id: CorrelationId) -> Self {
        let data = match data {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Self {
            channel: channel.into(),
            data,
            callback_id,
        }
    }
}

/// Interpretation of a reply envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// `status: "success"` with a `data` key (which may hold `null`).
    Success(Value),
    /// `status: "error"`, with the host's message when one was supplied.
    Error(Option<String>),
    /// Anything else: not an object, unknown status, success without data.
    Malformed,
}

impl Reply {
    /// Interpret a raw reply value.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Reply::Malformed;
        };

        match fields.get("status").and_then(Value::as_str) {
            Some(STATUS_SUCCESS) => match fields.remove("data") {
                Some(data) => Reply::Success(data),
                None => Reply::Malformed,
            },
            Some(STATUS_ERROR) => {
                let message = match fields.remove("error") {
                    Some(Value::String(s)) => Some(s),
                    Some(Value::Null) | None => None,
                    Some(other) => Some(other.to_string()),
                };
                Reply::Error(message)
            }
            _ => Reply::Malformed,
        }
    }

    /// Wire form of a successful reply.
    pub fn success(data: Value) -> Value {
        serde_json::json!({ "status": STATUS_SUCCESS, "data": data })
    }

    /// Wire form of a failed reply.
    pub fn error(message: impl Into<String>) -> Value {
        serde_json::json!({ "status": STATUS_ERROR, "error": message.into() })
    }
}

/// A message arriving from the host on a single inbound stream.
///
/// Hosts that deliver replies and event pushes through separate callbacks
/// call the transport and the event registry directly instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HostMessage {
    /// Reply to an earlier request.
    Reply {
        #[serde(rename = "callbackId")]
        callback_id: String,
        reply: Value,
    },
    /// Host-initiated push, not tied to any request.
    Event {
        #[serde(rename = "eventName")]
        name: String,
        #[serde(default)]
        data: Value,
    },
}
