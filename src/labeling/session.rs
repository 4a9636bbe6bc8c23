use crate::data::model::Series;

use super::labels::{LabelInterval, LabelSet};
use super::selector::{ClickOutcome, PointerClick, RangeSelector};

// ---------------------------------------------------------------------------
// Session – everything one labeling pass owns
// ---------------------------------------------------------------------------

/// A finished range that is waiting for its label text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingLabel {
    pub start: f64,
    pub end: f64,
}

/// Loaded series, drawn labels and the selection in progress.
///
/// Independent of any UI toolkit: the window forwards clicks and prompt
/// answers here and redraws from the result.
#[derive(Debug, Default)]
pub struct Session {
    series: Option<Series>,
    labels: LabelSet,
    selector: RangeSelector,
    prompt: Option<PendingLabel>,
}

impl Session {
    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn selector(&self) -> &RangeSelector {
        &self.selector
    }

    /// Range currently waiting for label text, if any.
    pub fn prompt(&self) -> Option<PendingLabel> {
        self.prompt
    }

    /// Start over with a freshly loaded series.
    pub fn replace_series(&mut self, series: Series) {
        self.series = Some(series);
        self.labels.clear();
        self.selector.reset();
        self.prompt = None;
    }

    /// Route a plot click through the selector.
    ///
    /// Ignored while no series is loaded or a label prompt is open.
    pub fn click(&mut self, click: PointerClick) -> ClickOutcome {
        if self.series.is_none() || self.prompt.is_some() {
            return ClickOutcome::Ignored;
        }
        let outcome = self.selector.click(click);
        if let ClickOutcome::RangeReady { start, end } = outcome {
            self.prompt = Some(PendingLabel { start, end });
        }
        outcome
    }

    /// Answer the open prompt. Empty text discards the range.
    ///
    /// Returns the interval that was added, if any.
    pub fn submit_label(&mut self, text: &str) -> Option<&LabelInterval> {
        let pending = self.prompt.take()?;
        let interval = LabelInterval::new(pending.start, pending.end, text)?;
        log::info!(
            "labeled [{}, {}] as '{}'",
            interval.start(),
            interval.end(),
            interval.text()
        );
        self.labels.push(interval);
        self.labels.iter().last()
    }

    /// Dismiss the open prompt without adding anything.
    pub fn cancel_label(&mut self) {
        self.prompt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_from_reader;

    fn three_rows() -> Series {
        load_csv_from_reader("time,value\n0,10\n1,20\n2,30\n".as_bytes()).unwrap()
    }

    fn loaded() -> Session {
        let mut s = Session::default();
        s.replace_series(three_rows());
        s
    }

    fn draw(session: &mut Session, t1: f64, t2: f64, text: &str) {
        session.click(PointerClick::inside(t1));
        session.click(PointerClick::inside(t2));
        session.submit_label(text);
    }

    #[test]
    fn increasing_clicks_with_text_append_one_interval() {
        let mut s = loaded();
        draw(&mut s, 0.0, 1.0, "A");
        draw(&mut s, 0.5, 2.0, "B");

        let got: Vec<_> = s
            .labels()
            .iter()
            .map(|iv| (iv.start(), iv.end(), iv.text().to_string()))
            .collect();
        assert_eq!(
            got,
            vec![(0.0, 1.0, "A".to_string()), (0.5, 2.0, "B".to_string())]
        );
        assert!(s.prompt().is_none());
        assert_eq!(s.selector().pending_start(), None);
    }

    #[test]
    fn non_increasing_clicks_create_nothing() {
        let mut s = loaded();
        s.click(PointerClick::inside(1.0));
        assert_eq!(s.click(PointerClick::inside(1.0)), ClickOutcome::Cancelled);
        assert!(s.prompt().is_none());
        assert!(s.submit_label("ignored").is_none());
        assert!(s.labels().is_empty());
    }

    #[test]
    fn empty_text_discards_the_range() {
        let mut s = loaded();
        s.click(PointerClick::inside(0.0));
        s.click(PointerClick::inside(1.0));
        assert_eq!(s.prompt(), Some(PendingLabel { start: 0.0, end: 1.0 }));
        assert!(s.submit_label("").is_none());
        assert!(s.prompt().is_none());
        assert!(s.labels().is_empty());
    }

    #[test]
    fn cancelled_prompt_discards_the_range() {
        let mut s = loaded();
        s.click(PointerClick::inside(0.0));
        s.click(PointerClick::inside(1.0));
        s.cancel_label();
        assert!(s.labels().is_empty());
        assert_eq!(
            s.click(PointerClick::inside(1.5)),
            ClickOutcome::Started { start: 1.5 }
        );
    }

    #[test]
    fn clicks_are_ignored_while_prompt_is_open() {
        let mut s = loaded();
        s.click(PointerClick::inside(0.0));
        s.click(PointerClick::inside(1.0));
        assert_eq!(s.click(PointerClick::inside(1.5)), ClickOutcome::Ignored);
        assert_eq!(s.selector().pending_start(), None);
    }

    #[test]
    fn clicks_without_series_are_ignored() {
        let mut s = Session::default();
        assert_eq!(s.click(PointerClick::inside(0.0)), ClickOutcome::Ignored);
    }

    #[test]
    fn loading_resets_labels_selection_and_prompt() {
        let mut s = loaded();
        draw(&mut s, 0.0, 1.0, "A");
        s.click(PointerClick::inside(1.5));

        s.replace_series(three_rows());
        assert!(s.labels().is_empty());
        assert_eq!(s.selector().pending_start(), None);

        s.click(PointerClick::inside(0.0));
        s.click(PointerClick::inside(2.0));
        s.replace_series(three_rows());
        assert!(s.prompt().is_none());
    }
}
