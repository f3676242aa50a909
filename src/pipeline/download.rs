//! Blocking HTTP download with progress ticks
//!
//! The transfer runs on the caller's thread; every buffer written to disk is
//! followed by a synchronous call into the [`ProgressSink`], so the UI redraws
//! from inside the transfer loop.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::progress::{ProgressSink, TransferProgress};
use super::{IoErrorKind, PipelineError, PipelineResult};

/// Bytes read from the response per tick
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// HTTP client used for archive downloads
pub struct Downloader {
    client: reqwest::blocking::Client,
}

impl Downloader {
    /// Build a client, optionally ignoring `HTTP_PROXY` and friends
    pub fn with_proxy(use_system_proxy: bool) -> PipelineResult<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("silverline/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            // Installer archives can take minutes; never cut a transfer short
            .timeout(None::<Duration>);
        if !use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| PipelineError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Download `url` into `dest`, returning the number of bytes written.
    ///
    /// The destination is created (or truncated) before the request is sent.
    /// On any failure the partial file is removed.
    pub fn fetch(
        &self,
        url: &str,
        dest: &Path,
        sink: &mut dyn ProgressSink,
    ) -> PipelineResult<u64> {
        let file = File::create(dest).map_err(|e| PipelineError::io(IoErrorKind::Open, e))?;
        let result = self.transfer(url, file, sink);
        if let Err(ref e) = result {
            warn!("Download of {} failed: {}", url, e);
            if let Err(rm) = fs::remove_file(dest) {
                debug!("Could not remove partial download {:?}: {}", dest, rm);
            }
        }
        result
    }

    fn transfer(&self, url: &str, file: File, sink: &mut dyn ProgressSink) -> PipelineResult<u64> {
        info!("Fetching {}", url);
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| PipelineError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(PipelineError::Network(status.as_u16()));
        }

        let total = response.content_length();
        let mut writer = BufWriter::new(file);
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        let mut downloaded: u64 = 0;
        sink.on_progress(TransferProgress::new(0, total));

        loop {
            let n = match response.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PipelineError::Transport(e.to_string())),
            };
            writer
                .write_all(&buffer[..n])
                .map_err(|e| PipelineError::io(IoErrorKind::Write, e))?;
            downloaded += n as u64;
            sink.on_progress(TransferProgress::new(downloaded, total));
        }

        writer
            .flush()
            .map_err(|e| PipelineError::io(IoErrorKind::Write, e))?;

        if let Some(expected) = total {
            if downloaded != expected {
                return Err(PipelineError::Transport(format!(
                    "body ended after {} of {} bytes",
                    downloaded, expected
                )));
            }
        } else {
            // Unknown length: announce completion with what we actually got
            sink.on_progress(TransferProgress::new(downloaded, Some(downloaded)));
        }

        info!("Downloaded {} bytes from {}", downloaded, url);
        Ok(downloaded)
    }
}
