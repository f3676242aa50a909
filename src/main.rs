//! Silverline - Main entry point
//!
//! Full-screen menu console that downloads an installer archive and inflates it.

use std::fs::OpenOptions;
use std::io::{Write, stdout};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use silverline::cli::{Cli, Commands};
use silverline::ui::terminal::init_signal_handlers;
use silverline::{
    App, Downloader, Keymap, ProgressMeter, ProgressSink, ShellConfig, ShellError, TerminalGuard,
    TerminalSurface, TransferProgress, inflate_file,
};

/// Send logs to a file; stdout belongs to the menus
fn init_logger(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(())
}

/// Main application entry point
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(e) = init_logger(&cli.log_file) {
        eprintln!("warning: {:#}", e);
    }
    info!("Silverline starting up");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let command = cli.command();
    debug!("Command: {:?}", command);

    match command {
        Commands::Validate { config } => validate_config(&config),
        Commands::DumpConfig => {
            let config = cli.resolve_config()?;
            println!("{}", config.to_json()?);
            Ok(())
        }
        Commands::Fetch => run_fetch(&cli.resolve_config()?),
        Commands::Extract => run_extract(&cli.resolve_config()?),
        Commands::Menu => run_menu_console(cli.resolve_config()?),
    }
}

fn validate_config(path: &Path) -> Result<()> {
    info!("Validating configuration file: {:?}", path);
    let config = ShellConfig::load_from_file(path)?;
    config.validate()?;
    println!("✓ Configuration file is valid: {:?}", path);
    Ok(())
}

/// Run the menus until Exit; the guard restores the terminal on every path
fn run_menu_console(config: ShellConfig) -> Result<()> {
    debug!("Initializing terminal for menu mode");
    if let Err(e) = init_signal_handlers() {
        warn!("Failed to initialize signal handlers: {}", e);
    }
    let _guard = TerminalGuard::enter()?;
    let surface = TerminalSurface::new(Keymap::new())?;
    let mut app = App::new(surface, config);

    match app.run() {
        Ok(()) => Ok(()),
        Err(ShellError::Fatal(msg)) => Err(anyhow::anyhow!("{}", msg)),
        Err(e) => Err(e.into()),
    }
}

/// Prints the text bar on one line, rewriting it in place
struct ConsoleProgress {
    meter: ProgressMeter,
}

impl ProgressSink for ConsoleProgress {
    fn on_progress(&mut self, progress: TransferProgress) {
        let frame = self.meter.frame(progress);
        let mut out = stdout().lock();
        let _ = write!(out, "\r{} {}", frame.text_bar(), frame.summary());
        if frame.done {
            let _ = writeln!(out, "\nDone!");
        }
        let _ = out.flush();
    }
}

fn run_fetch(config: &ShellConfig) -> Result<()> {
    info!("Fetching {} to {:?}", config.download_url, config.download_path);
    let downloader = Downloader::with_proxy(config.use_system_proxy)
        .map_err(|e| anyhow::anyhow!(e.status_message()))?;
    let mut sink = ConsoleProgress {
        meter: ProgressMeter::new(),
    };
    let bytes = downloader
        .fetch(&config.download_url, &config.download_path, &mut sink)
        .map_err(|e| anyhow::anyhow!(e.status_message()))?;
    println!("✓ Saved {} bytes to {}", bytes, config.download_path.display());
    Ok(())
}

fn run_extract(config: &ShellConfig) -> Result<()> {
    info!("Inflating {:?} to {:?}", config.download_path, config.extract_path);
    println!("Decompressing...");
    let summary = inflate_file(
        &config.download_path,
        &config.extract_path,
        &config.inflate_options(),
    )
    .map_err(|e| anyhow::anyhow!(e.status_message()))?;
    println!(
        "✓ {} bytes in, {} bytes written to {}",
        summary.bytes_in,
        summary.bytes_out,
        config.extract_path.display()
    );
    Ok(())
}
