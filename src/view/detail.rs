//! Detail overlay for the selected transfer.

use crate::state::AppState;

/// Render the overlay if a transfer is selected.
pub fn show(ctx: &egui::Context, state: &mut AppState) {
    let Some(record) = state.selected.clone() else {
        return;
    };

    let mut close = false;
    egui::Window::new("Transfer details")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("transfer_detail")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("From");
                    ui.monospace(record.from.as_str());
                    ui.end_row();

                    ui.label("To");
                    ui.monospace(record.to.as_str());
                    ui.end_row();

                    ui.label("Value");
                    ui.label(record.value.as_str());
                    ui.end_row();

                    ui.label("Date");
                    ui.label(record.formatted_time());
                    ui.end_row();
                });

            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                close = true;
            }
        });

    if close {
        state.select_transfer(None);
    }
}
