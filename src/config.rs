//! Server configuration.
//!
//! Values come from environment variables with compiled-in defaults. The
//! configuration is built once in `main` and handed to the server by
//! ownership; there is no global instance.

use std::env;
use std::path::PathBuf;

/// Default listening port.
const DEFAULT_PORT: u16 = 8080;

/// Directory holding the built artifact set.
const DEFAULT_DIST_DIR: &str = "dist";

/// Shell document served for paths matching no static asset.
const SHELL_FILE: &str = "app.html";

/// Server configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port.
    pub port: u16,
    /// Directory holding the built artifact set.
    pub dist_dir: PathBuf,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `PORT` overrides the default listening port (8080); a missing or
    /// unparseable value falls back to the default.
    pub fn from_env() -> Self {
        Self {
            port: port_from(env::var("PORT").ok()),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        }
    }

    /// Configuration with an explicit port and artifact directory.
    pub fn new(port: u16, dist_dir: impl Into<PathBuf>) -> Self {
        Self {
            port,
            dist_dir: dist_dir.into(),
        }
    }

    /// Path of the shell document inside the artifact directory.
    pub fn shell_path(&self) -> PathBuf {
        self.dist_dir.join(SHELL_FILE)
    }
}

fn port_from(raw: Option<String>) -> u16 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_port_parsing() {
        assert_eq!(port_from(None), 8080);
        assert_eq!(port_from(Some("3000".into())), 3000);
        assert_eq!(port_from(Some("not-a-port".into())), 8080);
        assert_eq!(port_from(Some("".into())), 8080);
    }

    #[test]
    #[serial]
    fn test_from_env_with_port_set() {
        unsafe { env::set_var("PORT", "3000") };
        let config = Config::from_env();
        unsafe { env::remove_var("PORT") };

        assert_eq!(config.port, 3000);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        unsafe { env::remove_var("PORT") };
        let config = Config::from_env();

        assert_eq!(config.port, 8080);
        assert_eq!(config.shell_path(), PathBuf::from("dist/app.html"));
    }
}
