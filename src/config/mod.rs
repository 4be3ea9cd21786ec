use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Admin API root; absent means demo collaborators
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    pub chart_settle_ms: Option<u64>,
    pub status_ttl_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    pub fn base_url(&self) -> Option<&str> {
        self.api
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms.unwrap_or(8_000))
    }

    pub fn chart_settle(&self) -> Duration {
        Duration::from_millis(self.ui.chart_settle_ms.unwrap_or(100))
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.ui.status_ttl_ms.unwrap_or(3_000))
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content)
}

pub fn parse(content: &str) -> Config {
    toml::from_str::<Config>(content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("TOURDESK_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("tourdesk").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("tourdesk").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "tourdesk", "tourdesk")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("tourdesk"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("tourdesk"));
    }
    directories::ProjectDirs::from("io", "tourdesk", "tourdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn session_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("session.sqlite3"))
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("tourdesk.log"))
}

pub fn export_dir() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("exports"))
        .unwrap_or_else(|| PathBuf::from(".tourdesk").join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_sections_are_missing() {
        let config = parse("");
        assert!(config.base_url().is_none());
        assert_eq!(config.load_timeout(), Duration::from_secs(8));
        assert_eq!(config.chart_settle(), Duration::from_millis(100));
        assert_eq!(config.status_ttl(), Duration::from_secs(3));
    }

    #[test]
    fn reads_api_and_ui_tables() {
        let config = parse(
            r#"
            [api]
            base_url = "https://api.example.com/admin"
            timeout_ms = 2500

            [ui]
            chart_settle_ms = 40
            "#,
        );
        assert_eq!(config.base_url(), Some("https://api.example.com/admin"));
        assert_eq!(config.load_timeout(), Duration::from_millis(2500));
        assert_eq!(config.chart_settle(), Duration::from_millis(40));
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let config = parse("[api\nbase_url = ");
        assert!(config.base_url().is_none());
    }

    #[test]
    fn blank_base_url_means_demo() {
        let config = parse("[api]\nbase_url = \"  \"\n");
        assert!(config.base_url().is_none());
    }
}
