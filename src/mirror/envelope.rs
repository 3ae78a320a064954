// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Envelope shapes flowing through an intercepted channel.
//!
//! Protocol libraries represent the same logical message in several nested
//! wrapper shapes across versions. The known shapes are modeled as an
//! explicit tagged union so the encoder matches on them in a fixed priority
//! order instead of probing for fields at runtime.

use bytes::Bytes;
use serde_json::Value;

use crate::constants;

/// Direction of a mirrored message relative to the host endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Direction::Input => constants::direction::INPUT,
            Direction::Output => constants::direction::OUTPUT,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The payload of one protocol message.
///
/// `raw` is the exact canonical serialization kept by the codec when the
/// message was framed off the wire; it is absent for values constructed in
/// memory, in which case only the generic structure dump is available.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcPayload {
    raw: Option<String>,
    value: Value,
}

impl RpcPayload {
    pub fn new(value: Value) -> Self {
        Self { raw: None, value }
    }

    pub fn with_raw(raw: impl Into<String>, value: Value) -> Self {
        Self {
            raw: Some(raw.into()),
            value,
        }
    }

    /// Canonical serialization, if the wire form was preserved.
    pub fn canonical_json(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Generic structure dump.
    pub fn dump(&self) -> &Value {
        &self.value
    }
}

/// Bare message wrapper exposing the payload at `.root`.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcMessage {
    pub root: RpcPayload,
}

/// Session wrapper nesting the payload at `.message.root`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionMessage {
    pub message: RpcMessage,
}

/// One value flowing through a duplex channel.
///
/// Variants are ordered most-specific to least-specific, matching the
/// encoder's extraction priority.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// A raw protocol line.
    Text(String),
    /// Raw bytes straight off the wire.
    Binary(Bytes),
    /// Session wrapper around a message (`.message.root`).
    Session(SessionMessage),
    /// Bare message wrapper (`.root`).
    Message(RpcMessage),
    /// A payload carrying its own canonical serialization.
    Payload(RpcPayload),
    /// A generic structure dump.
    Value(Value),
    /// Anything else, carried in its display form.
    Opaque(String),
}

impl Envelope {
    /// Empty frames (blank lines, empty byte strings, JSON null) are
    /// heartbeat noise and are never mirrored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Envelope::Text(s) | Envelope::Opaque(s) => s.is_empty(),
            Envelope::Binary(b) => b.is_empty(),
            Envelope::Value(Value::Null) => true,
            _ => false,
        }
    }
}

impl From<String> for Envelope {
    fn from(s: String) -> Self {
        Envelope::Text(s)
    }
}

impl From<&str> for Envelope {
    fn from(s: &str) -> Self {
        Envelope::Text(s.to_string())
    }
}

impl From<Bytes> for Envelope {
    fn from(b: Bytes) -> Self {
        Envelope::Binary(b)
    }
}

impl From<Value> for Envelope {
    fn from(v: Value) -> Self {
        Envelope::Value(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_frames_detected() {
        assert!(Envelope::Text(String::new()).is_empty());
        assert!(Envelope::Binary(Bytes::new()).is_empty());
        assert!(Envelope::Value(Value::Null).is_empty());
        assert!(Envelope::Opaque(String::new()).is_empty());
    }

    #[test]
    fn test_structured_frames_never_empty() {
        let payload = RpcPayload::new(json!({}));
        assert!(!Envelope::Payload(payload.clone()).is_empty());
        assert!(!Envelope::Message(RpcMessage { root: payload.clone() }).is_empty());
        assert!(!Envelope::Session(SessionMessage {
            message: RpcMessage { root: payload },
        })
        .is_empty());
        // Whitespace-only lines still count as content.
        assert!(!Envelope::Text("\n".to_string()).is_empty());
    }

    #[test]
    fn test_payload_prefers_preserved_wire_form() {
        let payload = RpcPayload::with_raw(r#"{"id":1}"#, json!({"id": 1}));
        assert_eq!(payload.canonical_json(), Some(r#"{"id":1}"#));

        let in_memory = RpcPayload::new(json!({"id": 1}));
        assert_eq!(in_memory.canonical_json(), None);
        assert_eq!(in_memory.dump(), &json!({"id": 1}));
    }
}
