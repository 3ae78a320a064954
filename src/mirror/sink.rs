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

//! Observability sink connection management.
//!
//! One process-wide TCP connection to the sink, established lazily and
//! recreated after a failed write. Mirroring is best effort and lossy under
//! sustained failure: every error on the sink path lands the current line
//! on the fallback stream instead, and the caller never sees an error.
//!
//! There is no retry backoff. Each `send` is independent; a connection
//! invalidated by one failed write is re-attempted exactly once on the
//! next call.

use std::io::Write;
use std::net::TcpStream;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::sink::FRAME_SEPARATOR;

/// Writes mirrored lines to a local diagnostic stream when the sink is
/// unavailable. This is the terminal fallback: its own write failures are
/// ignored.
pub struct FallbackEmitter {
    stream: Box<dyn Write + Send>,
}

impl FallbackEmitter {
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    pub fn new(stream: Box<dyn Write + Send>) -> Self {
        Self { stream }
    }

    /// Write `line` plus a trailing newline and flush immediately.
    pub fn emit(&mut self, line: &str) {
        let _ = writeln!(self.stream, "{line}");
        let _ = self.stream.flush();
    }
}

impl Default for FallbackEmitter {
    fn default() -> Self {
        Self::stderr()
    }
}

struct SinkState {
    conn: Option<TcpStream>,
    fallback: FallbackEmitter,
}

/// Process-wide connection to the remote observability endpoint.
///
/// Shared by every interceptor via `Arc`. The lock serializes
/// check-or-create and write, so a connection invalidated by one failed
/// write is never reused by another in-flight sender. The connection
/// outlives sessions; only a failed write tears it down.
pub struct MirrorSink {
    addr: String,
    state: Mutex<SinkState>,
}

impl MirrorSink {
    pub fn new(addr: impl Into<String>) -> Self {
        Self::with_fallback(addr, FallbackEmitter::stderr())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sink_addr.clone())
    }

    pub fn with_fallback(addr: impl Into<String>, fallback: FallbackEmitter) -> Self {
        Self {
            addr: addr.into(),
            state: Mutex::new(SinkState {
                conn: None,
                fallback,
            }),
        }
    }

    /// Mirror one line, best effort. Never returns an error to the caller.
    ///
    /// Algorithm: open a connection if none is live; on connect failure,
    /// clear state and emit on the fallback. Otherwise write the framed
    /// entry; on write failure, invalidate the connection and emit the
    /// current line on the fallback so it is not dropped silently.
    pub fn send(&self, line: &str) {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if state.conn.is_none() {
            match TcpStream::connect(&self.addr) {
                Ok(stream) => {
                    debug!("Connected to mirror sink at {}", self.addr);
                    state.conn = Some(stream);
                }
                Err(e) => {
                    debug!("Mirror sink {} unreachable: {}", self.addr, e);
                    state.fallback.emit(line);
                    return;
                }
            }
        }

        let framed = format!("{FRAME_SEPARATOR}\n{line}\n");
        let wrote = state
            .conn
            .as_mut()
            .map(|conn| conn.write_all(framed.as_bytes()))
            .unwrap_or_else(|| Ok(()));

        if let Err(e) = wrote {
            warn!("Mirror sink write failed, dropping connection: {}", e);
            state.conn = None;
            state.fallback.emit(line);
        }
    }

    /// Whether a connection is currently held. Diagnostic only; the next
    /// `send` may still find the peer gone.
    pub fn is_connected(&self) -> bool {
        match self.state.lock() {
            Ok(guard) => guard.conn.is_some(),
            Err(poisoned) => poisoned.into_inner().conn.is_some(),
        }
    }
}
