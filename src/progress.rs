//! Progress bar display for mirror syncs

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress over a sequential batch of repositories
pub struct SyncProgress {
    pb: ProgressBar,
}

impl SyncProgress {
    /// Create a progress bar over `total` repositories; `hidden` suppresses drawing
    pub fn new(total: u64, hidden: bool) -> Self {
        let pb = ProgressBar::new(total);
        if hidden {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            pb.set_style(style.progress_chars("#>-"));
        }
        Self { pb }
    }

    /// Show the repository being synced, advancing past the previous one
    pub fn start(&self, namespace: &str) {
        if self.pb.message().is_empty() {
            self.pb.set_message(namespace.to_string());
        } else {
            self.pb.inc(1);
            self.pb.set_message(namespace.to_string());
        }
    }

    pub fn finish(&self) {
        self.pb.set_position(self.pb.length().unwrap_or(0));
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_advances() {
        let progress = SyncProgress::new(3, true);
        progress.start("one");
        assert_eq!(progress.pb.position(), 0);
        progress.start("two");
        progress.start("three");
        assert_eq!(progress.pb.position(), 2);
        progress.finish();
        assert!(progress.pb.is_finished());
    }
}
