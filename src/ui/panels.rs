use eframe::egui::{self, Align2, Color32, Context, Key, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the toolbar: open, save, and a short session summary.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui.button("Open CSV…").clicked() {
            open_file_dialog(state);
        }

        let loaded = state.session.series().is_some();
        if ui
            .add_enabled(loaded, egui::Button::new("Save & Compute"))
            .clicked()
        {
            save_file_dialog(state);
        }

        ui.separator();

        if let Some(series) = state.session.series() {
            let (t0, t1) = series.time_range().unwrap_or((0.0, 0.0));
            ui.label(format!(
                "{} rows over t ∈ [{t0}, {t1}], {} labels",
                series.len(),
                state.session.labels().len()
            ));
            if let Some(start) = state.session.selector().pending_start() {
                ui.separator();
                ui.label(format!("range from t={start:.3}, click the end…"));
            }
        }

        if let Some(stats) = &state.last_stats {
            ui.separator();
            ui.label(format!(
                "labeled mean {:.3} · unlabeled mean {:.3}",
                stats.labeled_mean, stats.unlabeled_mean
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Label prompt
// ---------------------------------------------------------------------------

/// Modal-style window asking for the text of a just-selected range.
pub fn label_prompt(ctx: &Context, state: &mut AppState) {
    let Some(pending) = state.session.prompt() else {
        return;
    };

    let mut confirm = false;
    let mut cancel = false;

    egui::Window::new("Label")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(format!(
                "Label for range [{:.3}, {:.3}]:",
                pending.start, pending.end
            ));
            let edit = ui.text_edit_singleline(&mut state.label_input);
            edit.request_focus();
            if edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                confirm = true;
            }
            if ui.input(|i| i.key_pressed(Key::Escape)) {
                cancel = true;
            }
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("OK").clicked() {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if cancel {
        state.cancel_label();
    } else if confirm {
        state.confirm_label();
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open time series")
        .add_filter("CSV Files", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    if let Err(e) = state.open(&path) {
        log::error!("Failed to load {}: {e}", path.display());
        state.status_message = Some(format!("Error: {e}"));
        show_error(&format!("Could not load file: {e}"));
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save labeled series")
        .add_filter("CSV Files", &["csv"])
        .set_file_name("labeled.csv")
        .save_file();

    // Cancelled: nothing is written.
    let Some(mut path) = file else {
        return;
    };
    if path.extension().is_none() {
        path.set_extension("csv");
    }

    match state.export(&path) {
        Ok(Some(stats)) => {
            state.status_message = None;
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Info)
                .set_title("Stats")
                .set_description(format!(
                    "Labeled mean: {:.3}\nUnlabeled mean: {:.3}",
                    stats.labeled_mean, stats.unlabeled_mean
                ))
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            show_error(&format!("Could not save file: {e:#}"));
        }
    }
}

fn show_error(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
