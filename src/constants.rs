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

//! lilith-mirror constants - single source of truth for all configuration values.

/// Sink wire protocol
pub mod sink {
    /// Frame separator written before every mirrored line. The sink is a
    /// pure append stream: each entry is `----\n<line>\n`, no handshake.
    pub const FRAME_SEPARATOR: &str = "----";
}

/// Direction tags prefixed to every mirrored line
pub mod direction {
    /// Inbound messages (transport endpoint -> host)
    pub const INPUT: &str = "INPUT";
    /// Outbound messages (host -> transport endpoint)
    pub const OUTPUT: &str = "OUTPUT";
}

/// Transport limits
pub mod limits {
    /// Maximum accepted size of a single inbound message in bytes.
    /// Bounds the stdio read so a malformed peer cannot exhaust memory.
    pub const MAX_MESSAGE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
}

/// Configuration Environment Variables
pub mod config {
    /// `host:port` of the remote observability sink (required)
    pub const ENV_SINK_ADDR: &str = "LILITH_MIRROR_SINK_ADDR";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
}
