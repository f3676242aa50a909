//! Console configuration: download target, file locations, inflate settings.
//!
//! The defaults reproduce the fixed installer archive the console was built
//! around; a JSON file and CLI flags can override any of them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pipeline::InflateOptions;
use crate::pipeline::inflate::DEFAULT_CHUNK_SIZE;
use crate::types::StreamFormat;

/// Upper bound for the inflate chunk size (64 MiB)
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

pub const DEFAULT_DOWNLOAD_URL: &str =
    "http://aa-download.avg.com/filedir/inst/avg85flx-r855-a3656.i386.tar.gz";
pub const DEFAULT_DOWNLOAD_PATH: &str = "/tmp/avg.tar.gz";
pub const DEFAULT_EXTRACT_PATH: &str = "/tmp/avg.tar";

/// Effective settings for one console session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Archive fetched by Utility → Download
    pub download_url: String,
    /// Where the download lands (and where Install reads from)
    pub download_path: PathBuf,
    /// Where Install writes the decompressed archive
    pub extract_path: PathBuf,
    /// Inflate chunk size in bytes, per direction
    pub chunk_size: usize,
    /// Compressed container of the download
    pub format: StreamFormat,
    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY
    pub use_system_proxy: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            download_path: PathBuf::from(DEFAULT_DOWNLOAD_PATH),
            extract_path: PathBuf::from(DEFAULT_EXTRACT_PATH),
            chunk_size: DEFAULT_CHUNK_SIZE,
            format: StreamFormat::Auto,
            use_system_proxy: true,
        }
    }
}

impl ShellConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;
        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;
        Ok(config)
    }

    /// Pretty JSON form
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize configuration to JSON")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.download_url.trim();
        if url.is_empty() {
            anyhow::bail!("Download URL must be specified");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("Download URL must start with http:// or https://");
        }
        if url.contains(char::is_whitespace) {
            anyhow::bail!("Download URL must not contain whitespace");
        }

        if self.download_path.as_os_str().is_empty() {
            anyhow::bail!("Download path must be specified");
        }
        if self.extract_path.as_os_str().is_empty() {
            anyhow::bail!("Extract path must be specified");
        }
        if self.download_path == self.extract_path {
            anyhow::bail!("Download and extract paths must differ");
        }

        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            anyhow::bail!(
                "Chunk size must be between 1 and {} bytes",
                MAX_CHUNK_SIZE
            );
        }

        Ok(())
    }

    /// Inflate settings derived from this configuration
    pub fn inflate_options(&self) -> InflateOptions {
        InflateOptions {
            chunk_size: self.chunk_size,
            format: self.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_matches_fixed_paths() {
        let config = ShellConfig::default();
        assert_eq!(config.download_path, PathBuf::from("/tmp/avg.tar.gz"));
        assert_eq!(config.extract_path, PathBuf::from("/tmp/avg.tar"));
        assert_eq!(config.chunk_size, 524_288);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("silverline.json");
        let config = ShellConfig {
            download_url: "https://example.com/pkg.tar.gz".to_string(),
            format: StreamFormat::Gzip,
            ..ShellConfig::default()
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(ShellConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "download_path": "/var/tmp/a.gz" }"#).unwrap();
        let config = ShellConfig::load_from_file(&path).unwrap();
        assert_eq!(config.download_path, PathBuf::from("/var/tmp/a.gz"));
        assert_eq!(config.download_url, DEFAULT_DOWNLOAD_URL);
    }

    #[test]
    fn test_load_nonexistent_file() {
        assert!(ShellConfig::load_from_file("/nonexistent/silverline.json").is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(ShellConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let mut config = ShellConfig::default();
        config.download_url = "aa-download.avg.com/file.tar.gz".to_string();
        assert!(config.validate().is_err());
        config.download_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_same_paths() {
        let mut config = ShellConfig::default();
        config.extract_path = config.download_path.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_chunk_size_bounds() {
        let mut config = ShellConfig::default();
        config.chunk_size = 0;
        assert!(config.validate().is_err());
        config.chunk_size = MAX_CHUNK_SIZE + 1;
        assert!(config.validate().is_err());
        config.chunk_size = MAX_CHUNK_SIZE;
        assert!(config.validate().is_ok());
    }
}
