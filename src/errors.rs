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

//! Error types for lilith-mirror.
//!
//! Only configuration can fail loudly. The mirroring path itself is
//! fault-isolated: the encoder is total and the sink degrades to the
//! stderr fallback, so neither surfaces an error to the host.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    /// Configuration error (missing or malformed environment)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Sink address did not parse as `host:port`
    #[error("Invalid sink address '{0}': expected host:port")]
    InvalidSinkAddress(String),
}
