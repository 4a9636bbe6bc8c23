use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Opacity of label shading, roughly 30 %.
const REGION_ALPHA: u8 = 77;

/// Hue step between consecutive labels (golden angle), so colours stay
/// distinct and don't shift when more labels are added.
const HUE_STEP: f32 = 137.507_77;

// ---------------------------------------------------------------------------
// Per-label colours
// ---------------------------------------------------------------------------

/// Opaque colour for the label at `index` in the label set.
pub fn label_color(index: usize) -> Color32 {
    let hue = (index as f32 * HUE_STEP) % 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Translucent fill for a label region.
pub fn region_fill(index: usize) -> Color32 {
    let c = label_color(index);
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), REGION_ALPHA)
}
