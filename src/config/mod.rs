// Configuration module entry point
// Loads the optional config.toml and exposes runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, FilesConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from `config.toml` next to the binary.
    ///
    /// Every key has a default, so a missing file yields a fully working
    /// server on `0.0.0.0:8080` serving the install directory. No CLI flags
    /// and no environment variables are consumed.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("files.root", ".")?
            .set_default("files.index", vec!["index.html", "index.htm"])?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::load_from("does-not-exist").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.files.root, ".");
        assert_eq!(cfg.files.index, vec!["index.html", "index.htm"]);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert_eq!(cfg.logging.access_log_file, None);
    }

    #[test]
    fn test_default_socket_addr() {
        let cfg = Config::load_from("does-not-exist").unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let mut cfg = Config::load_from("does-not-exist").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
