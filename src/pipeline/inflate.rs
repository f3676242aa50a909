//! Chunked inflate of gzip / zlib / raw deflate streams
//!
//! Input is read in fixed-size chunks; each chunk is fed to the decoder
//! repeatedly until the decoder hands back an output buffer that is not full,
//! and every output buffer is written out before the next step. At most one
//! chunk is held in each direction.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use flate2::{Decompress, DecompressError, FlushDecompress, Status};
use tracing::{debug, info, warn};

use super::{FormatErrorKind, IoErrorKind, PipelineError, PipelineResult};
use crate::types::StreamFormat;

/// Default chunk size in each direction (512 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 512 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const MAX_WINDOW_BITS: u8 = 15;

/// Knobs for a decompression run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflateOptions {
    pub chunk_size: usize,
    pub format: StreamFormat,
}

impl Default for InflateOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            format: StreamFormat::Auto,
        }
    }
}

/// Byte counts of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflateSummary {
    /// Compressed bytes consumed up to the end of the stream
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// Decompress `source` into `dest` until the compressed stream ends.
///
/// Bytes after the end of the stream are ignored. Running out of input
/// before the end (including empty input) is a [`FormatErrorKind::CorruptData`].
///
/// # Panics
///
/// If the decoder returns with spare output space, unread input and no
/// stream end. That would mean its state was clobbered; it is not a
/// recoverable condition.
pub fn inflate_stream<R: Read, W: Write>(
    mut source: R,
    mut dest: W,
    options: &InflateOptions,
) -> PipelineResult<InflateSummary> {
    let chunk_size = options.chunk_size.max(1);
    let mut input = alloc_buffer(chunk_size)?;
    let mut output = alloc_buffer(chunk_size)?;
    let mut decoder: Option<Decompress> = None;
    let mut finished = false;

    'chunks: loop {
        let available = read_chunk(&mut source, &mut input)
            .map_err(|e| PipelineError::io(IoErrorKind::Read, e))?;
        if available == 0 {
            break;
        }
        let inflater =
            decoder.get_or_insert_with(|| new_decoder(options.format, &input[..available]));

        let mut consumed = 0;
        loop {
            let (in_before, out_before) = (inflater.total_in(), inflater.total_out());
            let status = inflater
                .decompress(&input[consumed..available], &mut output, FlushDecompress::None)
                .map_err(format_error)?;
            consumed += (inflater.total_in() - in_before) as usize;
            let produced = (inflater.total_out() - out_before) as usize;

            dest.write_all(&output[..produced])
                .map_err(|e| PipelineError::io(IoErrorKind::Write, e))?;

            if status == Status::StreamEnd {
                finished = true;
                break 'chunks;
            }
            if produced < output.len() {
                assert_eq!(
                    consumed, available,
                    "inflate stopped with free output space and unread input"
                );
                break;
            }
        }
    }

    dest.flush()
        .map_err(|e| PipelineError::io(IoErrorKind::Write, e))?;

    match decoder {
        Some(d) if finished => Ok(InflateSummary {
            bytes_in: d.total_in(),
            bytes_out: d.total_out(),
        }),
        _ => Err(PipelineError::Format(FormatErrorKind::CorruptData)),
    }
}

/// Decompress the file at `src` into a new file at `dst`.
///
/// `src` is opened read-only; `dst` is created or truncated and removed again
/// if decompression fails.
pub fn inflate_file(
    src: &Path,
    dst: &Path,
    options: &InflateOptions,
) -> PipelineResult<InflateSummary> {
    info!("Decompressing {:?} into {:?}", src, dst);
    let source = File::open(src).map_err(|e| PipelineError::io(IoErrorKind::Open, e))?;
    let dest = File::create(dst).map_err(|e| PipelineError::io(IoErrorKind::Open, e))?;

    match inflate_stream(source, dest, options) {
        Ok(summary) => {
            info!(
                "Decompressed {} bytes into {} bytes",
                summary.bytes_in, summary.bytes_out
            );
            Ok(summary)
        }
        Err(e) => {
            warn!("Decompression of {:?} failed: {}", src, e);
            if let Err(rm) = fs::remove_file(dst) {
                debug!("Could not remove partial output {:?}: {}", dst, rm);
            }
            Err(e)
        }
    }
}

fn new_decoder(format: StreamFormat, head: &[u8]) -> Decompress {
    let format = match format {
        // a one-byte first chunk can only show the first magic byte; 0x1f is
        // never a valid zlib CMF byte
        StreamFormat::Auto if head.starts_with(&GZIP_MAGIC[..head.len().min(2)]) => {
            StreamFormat::Gzip
        }
        StreamFormat::Auto => StreamFormat::Zlib,
        other => other,
    };
    debug!("Inflating as {}", format);
    match format {
        StreamFormat::Gzip => Decompress::new_gzip(MAX_WINDOW_BITS),
        StreamFormat::Raw => Decompress::new(false),
        _ => Decompress::new(true),
    }
}

fn format_error(err: DecompressError) -> PipelineError {
    if err.needs_dictionary().is_some() {
        PipelineError::Format(FormatErrorKind::NeedDictionary)
    } else {
        debug!("Decoder rejected input: {}", err);
        PipelineError::Format(FormatErrorKind::CorruptData)
    }
}

fn alloc_buffer(size: usize) -> PipelineResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_| PipelineError::OutOfMemory)?;
    buffer.resize(size, 0);
    Ok(buffer)
}

/// Fill `buf` as far as the source allows; returns 0 only at end of input
fn read_chunk<R: Read>(source: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
