// Application state module
// Immutable runtime state shared across connection tasks

use super::types::Config;

/// Application state
///
/// Configuration is fixed for the process lifetime; there is no runtime
/// reconfiguration, so connection tasks read it directly.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}
