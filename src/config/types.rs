// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    /// Route registrations, applied in order (later entries override earlier ones)
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub default_content_type: String,
    pub server_name: String,
}

/// A single route registration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Registered path; a trailing `/` registers the whole subtree
    pub path: String,
    #[serde(flatten)]
    pub handler: RouteHandler,
}

impl RouteConfig {
    pub fn new(path: &str, handler: RouteHandler) -> Self {
        Self {
            path: path.to_string(),
            handler,
        }
    }
}

/// Route handler types
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteHandler {
    /// Fixed "Hello World"
    Greeting,
    /// "Hello " followed by the `name` query parameter
    NameGreeting,
    /// One `key:value` line per query parameter
    Params,
    /// Sum of the query parameter values
    Sum,
    /// Fixed body for this path
    Literal { body: String },
}

/// Route table used when the configuration names none
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("/", RouteHandler::Greeting),
        RouteConfig::new("/hello", RouteHandler::NameGreeting),
        RouteConfig::new("/params", RouteHandler::Params),
        RouteConfig::new("/sum", RouteHandler::Sum),
        RouteConfig::new(
            "/sum/",
            RouteHandler::Literal {
                body: "sum".to_string(),
            },
        ),
        RouteConfig::new(
            "/sum/hello",
            RouteHandler::Literal {
                body: "Hello".to_string(),
            },
        ),
    ]
}
