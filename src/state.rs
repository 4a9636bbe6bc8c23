use std::path::Path;

use anyhow::Result;

use crate::data::export::{self, LabelStats};
use crate::data::loader::{self, LoadError};
use crate::labeling::selector::{ClickOutcome, PointerClick};
use crate::labeling::session::Session;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Series, labels and the selection in progress.
    pub session: Session,

    /// Text typed into the label prompt.
    pub label_input: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Statistics from the most recent export.
    pub last_stats: Option<LabelStats>,
}

impl AppState {
    /// Load a CSV and start a new session. On error nothing changes.
    pub fn open(&mut self, path: &Path) -> Result<(), LoadError> {
        let series = loader::load_csv(path)?;
        log::info!("Loaded {} rows from {}", series.len(), path.display());
        self.session.replace_series(series);
        self.label_input.clear();
        self.last_stats = None;
        self.status_message = None;
        Ok(())
    }

    /// Forward a plot click; opens the label prompt when a range completes.
    pub fn click(&mut self, click: PointerClick) {
        if let ClickOutcome::RangeReady { .. } = self.session.click(click) {
            self.label_input.clear();
        }
    }

    /// Confirm the label prompt with whatever was typed.
    pub fn confirm_label(&mut self) {
        let text = std::mem::take(&mut self.label_input);
        if self.session.submit_label(&text).is_none() {
            log::debug!("empty label, range discarded");
        }
    }

    pub fn cancel_label(&mut self) {
        self.label_input.clear();
        self.session.cancel_label();
    }

    /// Write the labeled table to `path`. Returns `None` when nothing is loaded.
    pub fn export(&mut self, path: &Path) -> Result<Option<LabelStats>> {
        let Some(series) = self.session.series() else {
            return Ok(None);
        };
        let stats = export::export_to_path(path, series, self.session.labels())?;
        log::info!(
            "Exported {} rows to {} (labeled mean {:.3}, unlabeled mean {:.3})",
            series.len(),
            path.display(),
            stats.labeled_mean,
            stats.unlabeled_mean
        );
        self.last_stats = Some(stats);
        Ok(Some(stats))
    }
}
