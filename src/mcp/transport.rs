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

//! Stdio transport for MCP sessions.
//!
//! Newline-delimited JSON-RPC over stdin/stdout. This is the first-party
//! `MessageChannel` implementation the interceptor wraps; lines are handed
//! up raw (text, or bytes when not valid UTF-8) so the mirror sees the
//! exact wire content before any parsing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::debug;

use crate::constants::limits;
use crate::mirror::envelope::{Envelope, RpcPayload};
use crate::mirror::interceptor::MessageChannel;

pub struct StdioChannel {
    reader: BufReader<Stdin>,
    writer: Stdout,
}

impl Default for StdioChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl StdioChannel {
    pub fn new() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
            writer: tokio::io::stdout(),
        }
    }
}

#[async_trait]
impl MessageChannel for StdioChannel {
    /// Read the next line from stdin. Uses a bounded read to prevent DoS
    /// via huge lines.
    async fn receive(&mut self) -> Result<Option<Envelope>> {
        let mut buf = Vec::new();
        let bytes_read = self.reader.read_until(b'\n', &mut buf).await?;

        if bytes_read == 0 {
            return Ok(None); // EOF
        }

        if bytes_read as u64 > limits::MAX_MESSAGE_SIZE_BYTES {
            return Err(anyhow::anyhow!(
                "Message exceeded size limit of {} bytes",
                limits::MAX_MESSAGE_SIZE_BYTES
            ));
        }

        match String::from_utf8(buf) {
            Ok(line) => {
                debug!("Received: {}", line.trim_end());
                Ok(Some(Envelope::Text(line)))
            }
            Err(e) => Ok(Some(Envelope::Binary(Bytes::from(e.into_bytes())))),
        }
    }

    /// Write one message to stdout, newline terminated, and flush.
    async fn send(&mut self, envelope: Envelope) -> Result<()> {
        let frame = wire_frame(&envelope)?;
        self.writer.write_all(&frame).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Serialize an envelope to its wire form, without the trailing newline.
fn wire_frame(envelope: &Envelope) -> Result<Vec<u8>> {
    let bytes = match envelope {
        Envelope::Text(text) => text.trim_end().as_bytes().to_vec(),
        Envelope::Binary(bytes) => bytes.to_vec(),
        Envelope::Session(session) => payload_bytes(&session.message.root)?,
        Envelope::Message(message) => payload_bytes(&message.root)?,
        Envelope::Payload(payload) => payload_bytes(payload)?,
        Envelope::Value(value) => {
            serde_json::to_vec(value).context("Failed to serialize message")?
        }
        Envelope::Opaque(text) => text.as_bytes().to_vec(),
    };
    Ok(bytes)
}

fn payload_bytes(payload: &RpcPayload) -> Result<Vec<u8>> {
    match payload.canonical_json() {
        Some(raw) => Ok(raw.as_bytes().to_vec()),
        None => serde_json::to_vec(payload.dump()).context("Failed to serialize message"),
    }
}
