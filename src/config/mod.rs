use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::client::DEFAULT_ENDPOINT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "textlift";
const APP_CONFIG_FILE: &str = "config.json";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AppConfig {
    /// Base URL of the extraction backend.
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    /// Copy the refined text to the clipboard after a successful
    /// extraction.
    #[serde(default)]
    pub(crate) copy_refined: Option<bool>,
}

/// Effective backend base URL: explicit override first, then the config
/// file, then the default local backend.
pub(crate) fn resolve_endpoint(config: &AppConfig, override_endpoint: Option<&str>) -> String {
    override_endpoint
        .map(str::to_string)
        .or_else(|| config.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

pub(crate) fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "textlift",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/textlift/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path("textlift", "config.json", None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/textlift/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("textlift", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn load_app_config_with_missing_file_uses_defaults() {
        let config = load_app_config_with(
            Some(Path::new("/tmp/textlift-test-nonexistent-config-root")),
            None,
        );
        assert!(config.endpoint.is_none());
        assert!(config.copy_refined.is_none());
    }

    #[test]
    fn load_app_config_with_reads_known_fields() {
        let root = std::env::temp_dir().join("textlift-test-config-root");
        let dir = root.join("textlift");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.json"),
            r#"{"endpoint": "http://ocr.local:8080", "copy_refined": true}"#,
        )
        .unwrap();

        let config = load_app_config_with(Some(&root), None);
        assert_eq!(config.endpoint.as_deref(), Some("http://ocr.local:8080"));
        assert_eq!(config.copy_refined, Some(true));

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn load_app_config_with_malformed_file_uses_defaults() {
        let root = std::env::temp_dir().join("textlift-test-broken-config-root");
        let dir = root.join("textlift");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.json"), "{not json").unwrap();

        let config = load_app_config_with(Some(&root), None);
        assert!(config.endpoint.is_none());

        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn resolve_endpoint_prefers_the_explicit_override() {
        let config = AppConfig {
            endpoint: Some("http://from-config:5000".to_string()),
            copy_refined: None,
        };
        assert_eq!(
            resolve_endpoint(&config, Some("http://from-flag:5000")),
            "http://from-flag:5000"
        );
        assert_eq!(resolve_endpoint(&config, None), "http://from-config:5000");
        assert_eq!(resolve_endpoint(&AppConfig::default(), None), DEFAULT_ENDPOINT);
    }
}
