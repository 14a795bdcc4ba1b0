//! Configuration management

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Base URL of the EquipDesk backend API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Attach technical detail (request target, status, raw response) to
    /// error notices
    #[serde(default)]
    pub dev_mode: bool,

    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

/// Console login credentials, usually supplied via
/// `EQUIPDESK_AUTH__EMAIL` / `EQUIPDESK_AUTH__PASSWORD`.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub fn get_config_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "equipdesk", "equipdesk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_config() -> Result<Config> {
    let config = ::config::Config::builder()
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&get_config_dir().join("config").to_string_lossy())
                .required(false),
        )
        // Override with environment variables (EQUIPDESK_API_BASE_URL,
        // EQUIPDESK_AUTH__EMAIL, etc.)
        .add_source(
            ::config::Environment::with_prefix("EQUIPDESK")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        std::env::remove_var("EQUIPDESK_API_BASE_URL");
        let config = load_config().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert!(!config.dev_mode);
    }

    #[test]
    #[serial]
    fn test_env_override() {
        std::env::set_var("EQUIPDESK_API_BASE_URL", "https://equip.example.com/api");
        std::env::set_var("EQUIPDESK_AUTH__EMAIL", "admin@example.com");
        std::env::set_var("EQUIPDESK_AUTH__PASSWORD", "secret");

        let config = load_config().unwrap();
        assert_eq!(config.api_base_url, "https://equip.example.com/api");
        let auth = config.auth.unwrap();
        assert_eq!(auth.email, "admin@example.com");
        // The Debug impl must not leak the password
        assert!(!format!("{auth:?}").contains("secret"));

        std::env::remove_var("EQUIPDESK_API_BASE_URL");
        std::env::remove_var("EQUIPDESK_AUTH__EMAIL");
        std::env::remove_var("EQUIPDESK_AUTH__PASSWORD");
    }
}
