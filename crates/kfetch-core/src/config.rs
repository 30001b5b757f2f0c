use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::downloader::DownloadOptions;

/// What the pipeline does when a single URL fails to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DownloadFailurePolicy {
    /// Stop the whole run on the first failed download (nothing is extracted).
    #[default]
    Halt,
    /// Report the failure, keep downloading, then extract whatever arrived.
    KeepGoing,
}

/// Global configuration loaded from `~/.config/kfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Root of the data tree. Relative paths are resolved against the working directory.
    pub data_root: PathBuf,
    /// Subdirectory of `data_root` holding the manifest and the downloaded archives.
    pub dataset_dir: String,
    /// File name of the URL manifest.
    pub manifest_name: String,
    /// Subdirectory of `data_root` that receives extracted contents.
    pub output_dir: String,
    /// Receive buffer size handed to curl, in bytes.
    pub buffer_bytes: usize,
    /// Optional connect timeout in seconds (None = transport default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// "halt" (default) or "keep-going".
    #[serde(default)]
    pub on_download_error: DownloadFailurePolicy,
    /// Remove the output directory before extracting.
    #[serde(default)]
    pub clean_output: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            dataset_dir: "kinetics-dataset".to_string(),
            manifest_name: "k400_subset.txt".to_string(),
            output_dir: "dataset".to_string(),
            buffer_bytes: 256 * 1024,
            connect_timeout_secs: None,
            on_download_error: DownloadFailurePolicy::Halt,
            clean_output: false,
        }
    }
}

impl FetchConfig {
    /// Transfer options derived from this config.
    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            buffer_size: self.buffer_bytes,
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("kfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
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

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<FetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: FetchConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.data_root, PathBuf::from("data"));
        assert_eq!(cfg.dataset_dir, "kinetics-dataset");
        assert_eq!(cfg.manifest_name, "k400_subset.txt");
        assert_eq!(cfg.output_dir, "dataset");
        assert_eq!(cfg.on_download_error, DownloadFailurePolicy::Halt);
        assert!(!cfg.clean_output);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.data_root, cfg.data_root);
        assert_eq!(parsed.manifest_name, cfg.manifest_name);
        assert_eq!(parsed.buffer_bytes, cfg.buffer_bytes);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            data_root = "/srv/data"
            dataset_dir = "k700"
            manifest_name = "urls.txt"
            output_dir = "extracted"
            buffer_bytes = 65536
            connect_timeout_secs = 20
            on_download_error = "keep-going"
            clean_output = true
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.data_root, PathBuf::from("/srv/data"));
        assert_eq!(cfg.dataset_dir, "k700");
        assert_eq!(cfg.manifest_name, "urls.txt");
        assert_eq!(cfg.output_dir, "extracted");
        assert_eq!(cfg.on_download_error, DownloadFailurePolicy::KeepGoing);
        assert!(cfg.clean_output);
        let opts = cfg.download_options();
        assert_eq!(opts.buffer_size, 65536);
        assert_eq!(opts.connect_timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn config_toml_optional_fields_default() {
        let toml = r#"
            data_root = "data"
            dataset_dir = "kinetics-dataset"
            manifest_name = "k400_subset.txt"
            output_dir = "dataset"
            buffer_bytes = 262144
        "#;
        let cfg: FetchConfig = toml::from_str(toml).unwrap();
        assert!(cfg.connect_timeout_secs.is_none());
        assert_eq!(cfg.on_download_error, DownloadFailurePolicy::Halt);
        assert!(!cfg.clean_output);
    }

    #[test]
    fn load_from_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "buffer_bytes = \"lots\"").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }
}
