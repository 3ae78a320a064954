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

use crate::constants;
use crate::errors::MirrorError;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// `host:port` of the remote observability sink
    pub sink_addr: String,
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    pub fn from_env() -> Result<Self, MirrorError> {
        let sink_addr = env::var(constants::config::ENV_SINK_ADDR).map_err(|_| {
            MirrorError::ConfigurationError(format!(
                "{} must be set to the observability sink address",
                constants::config::ENV_SINK_ADDR
            ))
        })?;
        Self::with_sink_addr(sink_addr)
    }

    /// Build a config around an externally supplied sink address, taking
    /// logging settings from the environment.
    pub fn with_sink_addr(sink_addr: impl Into<String>) -> Result<Self, MirrorError> {
        let sink_addr = sink_addr.into();
        if !sink_addr.contains(':') || sink_addr.ends_with(':') || sink_addr.starts_with(':') {
            return Err(MirrorError::InvalidSinkAddress(sink_addr));
        }
        Ok(Self {
            sink_addr,
            log_level: env::var(constants::config::ENV_LOG_LEVEL)
                .unwrap_or_else(|_| "info".to_string()),
            log_format: env::var(constants::config::ENV_LOG_FORMAT)
                .unwrap_or_else(|_| "text".to_string()),
        })
    }
}

/// Initialize tracing output. Logs go to stderr so stdout stays clean for
/// the protocol stream.
pub fn init_logging(config: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("lilith_mirror=debug,info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
