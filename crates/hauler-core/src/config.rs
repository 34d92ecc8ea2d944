use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Global defaults applied when assembling new tasks, loaded from
/// `~/.config/hauler/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HaulerConfig {
    /// Directory where tasks are saved when no explicit file path is set.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Prefer the server-supplied file name (Content-Disposition) unless a
    /// task says otherwise.
    #[serde(default)]
    pub use_server_file_name: bool,
    /// Default User-Agent header for plain-HTTP tasks.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Headers applied to every plain-HTTP task before per-task headers.
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hauler")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HaulerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HaulerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<HaulerConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: HaulerConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = HaulerConfig::default();
        assert!(cfg.download_dir.is_none());
        assert!(!cfg.use_server_file_name);
        assert!(cfg.user_agent.is_none());
        assert!(cfg.default_headers.is_empty());
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = HaulerConfig::default();
        cfg.download_dir = Some(PathBuf::from("/data/downloads"));
        cfg.user_agent = Some("hauler/0.1".to_string());
        cfg.default_headers
            .insert("Accept-Language".to_string(), "en".to_string());

        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: HaulerConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.download_dir, cfg.download_dir);
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.default_headers, cfg.default_headers);
    }

    #[test]
    fn config_toml_absent_fields_default() {
        let cfg: HaulerConfig = toml::from_str("use_server_file_name = true").unwrap();
        assert!(cfg.use_server_file_name);
        assert!(cfg.download_dir.is_none());
        assert!(cfg.default_headers.is_empty());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "use_server_file_name = true\nuser_agent = \"hauler/0.1\"\n\n[default_headers]\nAccept = \"*/*\"\n",
        )
        .unwrap();

        let cfg = load_from(&path).unwrap();
        assert!(cfg.use_server_file_name);
        assert_eq!(cfg.user_agent.as_deref(), Some("hauler/0.1"));
        assert_eq!(cfg.default_headers.get("Accept").map(String::as_str), Some("*/*"));
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join("nope.toml")).is_err());
    }
}
