use serde::{Deserialize, Serialize};

/// RosCom configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosComConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Router configurations
    #[serde(default)]
    pub routers: Vec<RouterConfig>,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Maximum number of sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Connect timeout in milliseconds, enforced by dialer implementations
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
}

/// One managed router endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Router name
    pub name: String,
    /// Router description
    #[serde(default)]
    pub description: String,
    /// Router address (hostname or IP)
    pub address: String,
    /// API port; 0 means the transport's default port
    #[serde(default)]
    pub port: u16,
    /// API username
    pub username: String,
    /// API password
    #[serde(default)]
    pub password: String,
    /// Caller-side correlation tag, passed through unchanged
    #[serde(default)]
    pub local_id: i64,
    /// Owner correlation tag, passed through unchanged
    #[serde(default)]
    pub owner_id: i64,
    /// Dump command replies at debug level
    #[serde(default)]
    pub verbose: bool,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_sessions() -> usize {
    10
}

fn default_connect_timeout() -> u64 {
    5000
}

impl Default for RosComConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            routers: Vec::new(),
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            max_sessions: default_max_sessions(),
            connect_timeout_ms: default_connect_timeout(),
        }
    }
}
