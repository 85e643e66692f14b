use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeSettings {
    /// Path to the adb binary; empty means "resolve from PATH".
    pub command_path: String,
    /// Timeout applied to every bridge invocation. Pulls and backups can be
    /// slow, so the default is deliberately generous.
    pub command_timeout_secs: u64,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            command_path: String::new(),
            command_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcquisitionSettings {
    pub photos_dir: String,
    pub videos_dir: String,
    /// Where the raw backup container is written.
    pub backup_file: String,
    /// Where the backup container is unpacked.
    pub backup_dir: String,
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            photos_dir: "./photos".to_string(),
            videos_dir: "./videos".to_string(),
            backup_file: "whatsapp.ab".to_string(),
            backup_dir: "./whatsapp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TriageConfig {
    #[serde(default)]
    pub bridge: BridgeSettings,
    #[serde(default)]
    pub acquisition: AcquisitionSettings,
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("EVIDENCE_TRIAGE_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("evidence-triage").join("config.json")
}

pub fn load_config() -> Result<TriageConfig, AppError> {
    load_config_from_path(&config_path())
}

pub fn save_config(config: &TriageConfig) -> Result<(), AppError> {
    save_config_to_path(config, &config_path())
}

pub fn load_config_from_path(path: &Path) -> Result<TriageConfig, AppError> {
    if !path.exists() {
        return Ok(TriageConfig::default());
    }
    let raw = fs::read_to_string(path)
        .map_err(|err| AppError::system(format!("Failed to read config: {err}"), ""))?;
    let config: TriageConfig = serde_json::from_str(&raw)
        .map_err(|err| AppError::system(format!("Failed to parse config: {err}"), ""))?;
    Ok(validate_config(config))
}

pub fn save_config_to_path(config: &TriageConfig, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let payload = serde_json::to_string_pretty(config)
        .map_err(|err| AppError::system(format!("Failed to serialize config: {err}"), ""))?;
    fs::write(path, payload)
        .map_err(|err| AppError::system(format!("Failed to write config: {err}"), ""))?;
    Ok(())
}

fn validate_config(mut config: TriageConfig) -> TriageConfig {
    if config.bridge.command_timeout_secs == 0 {
        config.bridge.command_timeout_secs = BridgeSettings::default().command_timeout_secs;
    }
    if config.acquisition.photos_dir.trim().is_empty() {
        config.acquisition.photos_dir = AcquisitionSettings::default().photos_dir;
    }
    if config.acquisition.videos_dir.trim().is_empty() {
        config.acquisition.videos_dir = AcquisitionSettings::default().videos_dir;
    }
    if config.acquisition.backup_file.trim().is_empty() {
        config.acquisition.backup_file = AcquisitionSettings::default().backup_file;
    }
    if config.acquisition.backup_dir.trim().is_empty() {
        config.acquisition.backup_dir = AcquisitionSettings::default().backup_dir;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config_from_path(Path::new("/nonexistent/evidence-triage.json"))
            .expect("defaults expected");
        assert_eq!(config, TriageConfig::default());
    }

    #[test]
    fn clamps_invalid_values() {
        let mut config = TriageConfig::default();
        config.bridge.command_timeout_secs = 0;
        config.acquisition.photos_dir = "  ".to_string();
        let validated = validate_config(config);
        assert_eq!(validated.bridge.command_timeout_secs, 120);
        assert_eq!(validated.acquisition.photos_dir, "./photos");
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        let mut config = TriageConfig::default();
        config.bridge.command_path = "/opt/platform-tools/adb".to_string();
        save_config_to_path(&config, &path).expect("save");
        let loaded = load_config_from_path(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn tolerates_missing_sections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"bridge": {"command_path": "adb", "command_timeout_secs": 30}}"#)
            .expect("write");
        let loaded = load_config_from_path(&path).expect("load");
        assert_eq!(loaded.bridge.command_timeout_secs, 30);
        assert_eq!(loaded.acquisition, AcquisitionSettings::default());
    }
}
