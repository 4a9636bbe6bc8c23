/// Labeling layer: intervals, the two-click selector and the session that ties them together.
///
/// ```text
///  pointer click ──► RangeSelector ──► RangeReady ──► label prompt
///                                                          │
///                                          non-empty text  ▼
///                                                      LabelSet
/// ```

pub mod labels;
pub mod selector;
pub mod session;
