//! Transfer progress snapshots and the fixed-width meter

/// Number of cells in the progress bar
pub const BAR_WIDTH: usize = 40;

const MIB: f64 = 1024.0 * 1024.0;

/// Bytes received so far versus bytes expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    pub downloaded: u64,
    /// `None` when the server sent no usable Content-Length
    pub total: Option<u64>,
}

impl TransferProgress {
    pub fn new(downloaded: u64, total: Option<u64>) -> Self {
        Self { downloaded, total }
    }

    /// Completed fraction in `[0, 1]`, `None` while the total is unknown or zero
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => {
                Some((self.downloaded as f64 / total as f64).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }

    /// Filled cells of a [`BAR_WIDTH`]-cell bar
    pub fn filled_cells(&self) -> usize {
        self.fraction()
            .map(|f| ((f * BAR_WIDTH as f64).floor() as usize).min(BAR_WIDTH))
            .unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.total.is_some_and(|total| self.downloaded == total)
    }
}

/// Receiver of transfer ticks
pub trait ProgressSink {
    fn on_progress(&mut self, progress: TransferProgress);
}

/// Everything the progress panel needs to draw one tick
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressFrame {
    pub filled: usize,
    /// Whole percent, `None` while the total is unknown
    pub percent: Option<u8>,
    pub downloaded_mib: f64,
    pub total_mib: Option<f64>,
    /// Set on the first complete tick only
    pub done: bool,
}

impl ProgressFrame {
    /// Header line: `" 42% Complete: 1.23MiB  Total: 2.94MiB"`
    pub fn summary(&self) -> String {
        let percent = match self.percent {
            Some(p) => format!("{:>3}%", p),
            None => "  -%".to_string(),
        };
        let total = match self.total_mib {
            Some(t) => format!("{:4.2}MiB", t),
            None => "?".to_string(),
        };
        format!("{} Complete: {:4.2}MiB  Total: {}", percent, self.downloaded_mib, total)
    }

    /// Plain-text bar for non-TUI output: `[####----]`
    pub fn text_bar(&self) -> String {
        format!(
            "[{}{}]",
            "#".repeat(self.filled),
            "-".repeat(BAR_WIDTH - self.filled)
        )
    }
}

/// Turns ticks into frames and remembers whether completion was announced
#[derive(Debug, Default)]
pub struct ProgressMeter {
    announced: bool,
}

impl ProgressMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&mut self, progress: TransferProgress) -> ProgressFrame {
        let done = progress.is_complete() && !self.announced;
        if done {
            self.announced = true;
        }
        ProgressFrame {
            filled: progress.filled_cells(),
            percent: progress.fraction().map(|f| (f * 100.0).floor() as u8),
            downloaded_mib: progress.downloaded as f64 / MIB,
            total_mib: progress.total.map(|t| t as f64 / MIB),
            done,
        }
    }

    /// Whether a complete tick has been seen
    pub fn is_done(&self) -> bool {
        self.announced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_total_has_no_fraction() {
        let p = TransferProgress::new(0, Some(0));
        assert_eq!(p.fraction(), None);
        assert_eq!(p.filled_cells(), 0);
    }

    #[test]
    fn test_unknown_total() {
        let p = TransferProgress::new(4096, None);
        assert_eq!(p.fraction(), None);
        assert!(!p.is_complete());
    }

    #[test]
    fn test_half_way() {
        let p = TransferProgress::new(50, Some(100));
        assert_eq!(p.filled_cells(), 20);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let p = TransferProgress::new(150, Some(100));
        assert_eq!(p.filled_cells(), BAR_WIDTH);
    }

    #[test]
    fn test_done_reported_once() {
        let mut meter = ProgressMeter::new();
        assert!(!meter.frame(TransferProgress::new(10, Some(20))).done);
        assert!(meter.frame(TransferProgress::new(20, Some(20))).done);
        assert!(!meter.frame(TransferProgress::new(20, Some(20))).done);
        assert!(meter.is_done());
    }

    #[test]
    fn test_summary_format() {
        let mut meter = ProgressMeter::new();
        let frame = meter.frame(TransferProgress::new(1024 * 1024, Some(2 * 1024 * 1024)));
        assert_eq!(frame.summary(), " 50% Complete: 1.00MiB  Total: 2.00MiB");
        assert_eq!(frame.text_bar().len(), BAR_WIDTH + 2);
    }
}
