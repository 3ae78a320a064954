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

//! Canonical message encoder.
//!
//! Converts any envelope shape into a single mirrored line of UTF-8 text.
//! The encoder is total: every shape has a terminal fallback, so encoding
//! never fails regardless of which wrapper arrives.
//!
//! Extraction priority, first match wins: raw text, raw bytes,
//! `.message.root`, `.root`, direct canonical serialization, generic
//! structure dump, display coercion. Nested paths come first so the
//! mirrored content is the actual RPC payload, not the wrapper. The order
//! must not be changed.

use serde_json::Value;

use crate::mirror::envelope::{Direction, Envelope, RpcPayload};

/// Encode `envelope` as one mirrored line, prefixed with the direction tag.
#[must_use]
pub fn encode(direction: Direction, envelope: &Envelope) -> String {
    format!("{}: {}", direction.tag(), payload_text(direction, envelope))
}

fn payload_text(direction: Direction, envelope: &Envelope) -> String {
    match envelope {
        // Inbound lines still carry their trailing newline from the wire;
        // outbound text is forwarded exactly as written.
        Envelope::Text(text) => match direction {
            Direction::Input => text.trim_end().to_string(),
            Direction::Output => text.clone(),
        },
        Envelope::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Envelope::Session(session) => serialize_payload(&session.message.root),
        Envelope::Message(message) => serialize_payload(&message.root),
        Envelope::Payload(payload) => serialize_payload(payload),
        Envelope::Value(value) => dump_value(value),
        Envelope::Opaque(text) => text.clone(),
    }
}

/// Canonical serialization with generic-dump fallback.
fn serialize_payload(payload: &RpcPayload) -> String {
    match payload.canonical_json() {
        Some(raw) => raw.to_string(),
        None => dump_value(payload.dump()),
    }
}

fn dump_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::envelope::{RpcMessage, SessionMessage};
    use bytes::Bytes;
    use serde_json::json;

    #[test]
    fn test_plain_text_input() {
        let line = encode(Direction::Input, &Envelope::Text("ping".to_string()));
        assert_eq!(line, "INPUT: ping");
    }

    #[test]
    fn test_trailing_whitespace_trimmed_on_input_only() {
        let line = encode(Direction::Input, &Envelope::Text("ping\r\n".to_string()));
        assert_eq!(line, "INPUT: ping");

        let line = encode(Direction::Output, &Envelope::Text("pong\n".to_string()));
        assert_eq!(line, "OUTPUT: pong\n");
    }

    #[test]
    fn test_binary_decodes_lossy() {
        let line = encode(
            Direction::Output,
            &Envelope::Binary(Bytes::from_static(b"\xff\xfehello")),
        );
        assert_eq!(line, "OUTPUT: \u{FFFD}\u{FFFD}hello");
    }

    #[test]
    fn test_session_wrapper_yields_nested_payload() {
        let envelope = Envelope::Session(SessionMessage {
            message: RpcMessage {
                root: RpcPayload::with_raw(
                    r#"{"id":1,"method":"x"}"#,
                    json!({"id": 1, "method": "x"}),
                ),
            },
        });
        let line = encode(Direction::Input, &envelope);
        assert_eq!(line, r#"INPUT: {"id":1,"method":"x"}"#);
    }

    #[test]
    fn test_message_wrapper_yields_root_payload() {
        let envelope = Envelope::Message(RpcMessage {
            root: RpcPayload::with_raw(r#"{"id":2}"#, json!({"id": 2})),
        });
        assert_eq!(encode(Direction::Output, &envelope), r#"OUTPUT: {"id":2}"#);
    }

    #[test]
    fn test_missing_canonical_form_falls_back_to_dump() {
        let envelope = Envelope::Message(RpcMessage {
            root: RpcPayload::new(json!({"id": 3, "method": "y"})),
        });
        let line = encode(Direction::Input, &envelope);
        assert_eq!(line, r#"INPUT: {"id":3,"method":"y"}"#);
    }

    #[test]
    fn test_direct_payload_uses_canonical_form() {
        let envelope = Envelope::Payload(RpcPayload::with_raw(
            r#"{"jsonrpc":"2.0"}"#,
            json!({"jsonrpc": "2.0"}),
        ));
        assert_eq!(
            encode(Direction::Output, &envelope),
            r#"OUTPUT: {"jsonrpc":"2.0"}"#
        );
    }

    #[test]
    fn test_generic_dump_serialized_as_text() {
        let envelope = Envelope::Value(json!(["a", 1, null]));
        assert_eq!(encode(Direction::Input, &envelope), r#"INPUT: ["a",1,null]"#);
    }

    #[test]
    fn test_opaque_coerced_to_display_form() {
        let envelope = Envelope::Opaque("<unrecognized frame>".to_string());
        assert_eq!(
            encode(Direction::Input, &envelope),
            "INPUT: <unrecognized frame>"
        );
    }
}
