/// Rendering model: turns a series and its labels into plain drawable data.
/// The egui side lives in `ui::plot`.
pub mod scene;
