// ---------------------------------------------------------------------------
// LabelInterval – one user-drawn range
// ---------------------------------------------------------------------------

/// A closed time range `[start, end]` tagged with a text label.
///
/// Only constructed through [`LabelInterval::new`], which enforces
/// `start < end` and a non-empty label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelInterval {
    start: f64,
    end: f64,
    text: String,
}

impl LabelInterval {
    /// Returns `None` when the range is empty or reversed, or the text is empty.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if start.is_nan() || end.is_nan() || start >= end || text.is_empty() {
            return None;
        }
        Some(Self { start, end, text })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}

// ---------------------------------------------------------------------------
// LabelSet – insertion-ordered collection
// ---------------------------------------------------------------------------

/// Labels in the order they were drawn. Overlaps are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    intervals: Vec<LabelInterval>,
}

impl LabelSet {
    pub fn push(&mut self, interval: LabelInterval) {
        self.intervals.push(interval);
    }

    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelInterval> {
        self.intervals.iter()
    }

    /// Label of the most recently added interval containing `time`.
    pub fn label_at(&self, time: f64) -> Option<&str> {
        self.intervals
            .iter()
            .rev()
            .find(|iv| iv.contains(time))
            .map(LabelInterval::text)
    }
}
