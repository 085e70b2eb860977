use serde::{Deserialize, Serialize};

/// Fallback when no base URL is baked in at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:3333";

/// Client configuration. The only knob is the backend base URL, fixed at
/// build time via the `CHAT_API_BASE` environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: option_env!("CHAT_API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .to_string(),
        }
    }
}
