//! Web server configuration module
//!
//! Network settings for the REST sketch (spec.md §6). The surface is
//! unauthenticated and has no database of its own — scheduling/analytics
//! state lives in the `PlanRepository` the server holds in memory for its
//! lifetime.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl WebConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }
}
