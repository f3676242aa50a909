use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ShellConfig;
use crate::types::StreamFormat;

pub const DEFAULT_LOG_FILE: &str = "/tmp/silverline.log";

/// Silverline - a menu console that fetches and unpacks an installer archive
#[derive(Parser, Debug)]
#[command(name = "silverline")]
#[command(about = "Full-screen menu console for downloading and unpacking an archive")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Archive URL to download
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Where the downloaded archive is stored
    #[arg(long, global = true)]
    pub download_path: Option<PathBuf>,

    /// Where the decompressed output is written
    #[arg(long, global = true)]
    pub extract_path: Option<PathBuf>,

    /// Compressed container of the archive (auto, gzip, zlib, raw)
    #[arg(long, global = true)]
    pub format: Option<StreamFormat>,

    /// Ignore HTTP_PROXY / HTTPS_PROXY from the environment
    #[arg(long, global = true)]
    pub no_proxy: bool,

    /// Log file; the terminal is owned by the menus while they are shown
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive menu console (default)
    Menu,
    /// Download the archive without the menus
    Fetch,
    /// Decompress the downloaded archive without the menus
    Extract,
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Print the effective configuration as JSON
    DumpConfig,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Subcommand to run; no subcommand means the menus
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Menu)
    }

    /// Effective configuration: defaults, then the config file, then flags
    pub fn resolve_config(&self) -> Result<ShellConfig> {
        let mut config = match &self.config {
            Some(path) => ShellConfig::load_from_file(path)?,
            None => ShellConfig::default(),
        };

        if let Some(url) = &self.url {
            config.download_url = url.clone();
        }
        if let Some(path) = &self.download_path {
            config.download_path = path.clone();
        }
        if let Some(path) = &self.extract_path {
            config.extract_path = path.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.no_proxy {
            config.use_system_proxy = false;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}
