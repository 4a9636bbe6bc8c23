// ---------------------------------------------------------------------------
// Two-click range selector
// ---------------------------------------------------------------------------

/// A pointer click translated into plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    /// Time coordinate under the pointer.
    pub time: f64,
    /// Whether the click landed inside the plotting area.
    pub inside_plot: bool,
}

impl PointerClick {
    pub fn inside(time: f64) -> Self {
        Self {
            time,
            inside_plot: true,
        }
    }

    pub fn outside() -> Self {
        Self {
            time: f64::NAN,
            inside_plot: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectorState {
    #[default]
    Idle,
    Pending { start: f64 },
}

/// What a click did to the selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Outside the plot; nothing changed.
    Ignored,
    /// First endpoint recorded.
    Started { start: f64 },
    /// Second click at or before the first; selection dropped.
    Cancelled,
    /// Both endpoints known, `start < end`; a label is needed next.
    RangeReady { start: f64, end: f64 },
}

#[derive(Debug, Clone, Default)]
pub struct RangeSelector {
    state: SelectorState,
}

impl RangeSelector {
    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// First endpoint of the selection in progress, if any.
    pub fn pending_start(&self) -> Option<f64> {
        match self.state {
            SelectorState::Idle => None,
            SelectorState::Pending { start } => Some(start),
        }
    }

    pub fn reset(&mut self) {
        self.state = SelectorState::Idle;
    }

    /// Feed one click into the state machine.
    pub fn click(&mut self, click: PointerClick) -> ClickOutcome {
        if !click.inside_plot || !click.time.is_finite() {
            return ClickOutcome::Ignored;
        }

        match self.state {
            SelectorState::Idle => {
                self.state = SelectorState::Pending { start: click.time };
                log::debug!("selection started at t={}", click.time);
                ClickOutcome::Started { start: click.time }
            }
            SelectorState::Pending { start } => {
                self.state = SelectorState::Idle;
                let end = click.time;
                if end <= start {
                    log::debug!("selection cancelled: end {end} <= start {start}");
                    ClickOutcome::Cancelled
                } else {
                    ClickOutcome::RangeReady { start, end }
                }
            }
        }
    }
}
