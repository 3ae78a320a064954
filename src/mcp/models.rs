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

//! JSON-RPC 2.0 message models.
//!
//! Pure data structures, no I/O. The interceptor never inspects protocol
//! semantics; these types exist so in-memory messages can be carried
//! through a channel as structured envelopes.

use serde::{Deserialize, Serialize};

use crate::mirror::envelope::{Envelope, RpcMessage, RpcPayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<serde_json::Value>,
    pub id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<JsonRpcError>,
    pub id: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl From<JsonRpcRequest> for Envelope {
    fn from(request: JsonRpcRequest) -> Self {
        match serde_json::to_value(&request) {
            Ok(value) => Envelope::Message(RpcMessage {
                root: RpcPayload::new(value),
            }),
            Err(_) => Envelope::Opaque(format!("{request:?}")),
        }
    }
}

impl From<JsonRpcResponse> for Envelope {
    fn from(response: JsonRpcResponse) -> Self {
        match serde_json::to_value(&response) {
            Ok(value) => Envelope::Message(RpcMessage {
                root: RpcPayload::new(value),
            }),
            Err(_) => Envelope::Opaque(format!("{response:?}")),
        }
    }
}
