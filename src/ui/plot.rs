use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Polygon, Text, VLine};

use crate::color::{label_color, region_fill};
use crate::labeling::selector::PointerClick;
use crate::render::scene::build_scene;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Series plot (central panel)
// ---------------------------------------------------------------------------

/// Render the series with its label regions.
///
/// Returns the click made on the plot this frame, if any.
pub fn series_plot(ui: &mut Ui, state: &AppState) -> Option<PointerClick> {
    let Some(series) = state.session.series() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV with 'time' and 'value' columns  (Open CSV…)");
        });
        return None;
    };

    let scene = build_scene(series, state.session.labels());
    let pending = state.session.selector().pending_start();

    let response = Plot::new("series_plot")
        .legend(Legend::default())
        .x_axis_label("time")
        .y_axis_label("value")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(scene.line.clone()))
                    .name("value")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );

            for region in &scene.regions {
                let color = label_color(region.index);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(region.corners().to_vec()))
                        .name(&region.text)
                        .fill_color(region_fill(region.index))
                        .stroke(Stroke::new(1.0, color)),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(region.start, region.top),
                        RichText::new(&region.text).color(color).strong(),
                    )
                    .anchor(Align2::LEFT_TOP),
                );
            }

            if let Some(start) = pending {
                plot_ui.vline(
                    VLine::new(start)
                        .name("selection start")
                        .color(Color32::YELLOW),
                );
            }
        });

    if !response.response.clicked() {
        return None;
    }
    let pos = response.response.interact_pointer_pos()?;
    if !response.transform.frame().contains(pos) {
        return Some(PointerClick::outside());
    }
    let value = response.transform.value_from_position(pos);
    Some(PointerClick::inside(value.x))
}
