//! Transfers panel — filter, fetch button, table and pagination.

use egui::Ui;
use egui_extras::{Column, TableBuilder};
use tokio::sync::mpsc;

use crate::events::UiEvent;
use crate::models::{short_address, Direction, TransferRecord};
use crate::state::AppState;

/// Render the transfers panel.
pub fn show(ui: &mut Ui, state: &mut AppState, ui_tx: &mpsc::UnboundedSender<UiEvent>) {
    ui.horizontal(|ui| {
        ui.heading("Transfers");
        ui.add_space(10.0);

        for direction in Direction::ALL {
            if ui
                .selectable_label(state.filter == direction, direction.label())
                .clicked()
            {
                state.set_filter(direction);
            }
        }

        ui.add_space(10.0);

        if ui
            .add_enabled(state.is_connected(), egui::Button::new("Fetch transfers"))
            .clicked()
        {
            if let Some(event) = state.begin_fetch() {
                let _ = ui_tx.send(event);
            }
        }

        if state.loading {
            ui.spinner();
            ui.label(egui::RichText::new("Loading...").color(egui::Color32::GRAY));
        }
    });

    if let Some(ref err) = state.error {
        ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
    }

    ui.separator();
    ui.add_space(5.0);

    if state.transfers.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(
                egui::RichText::new("No transfers to show")
                    .size(16.0)
                    .color(egui::Color32::GRAY)
                    .italics(),
            );
        });
    } else if let Some(record) = show_table(ui, &state.transfers) {
        state.select_transfer(Some(record));
    }

    ui.add_space(8.0);
    show_pagination(ui, state);
}

/// Returns the record whose date was clicked, if any.
fn show_table(ui: &mut Ui, transfers: &[TransferRecord]) -> Option<TransferRecord> {
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(420.0)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(150.0))
        .column(Column::initial(160.0))
        .column(Column::initial(160.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Date");
            });
            header.col(|ui| {
                ui.strong("From");
            });
            header.col(|ui| {
                ui.strong("To");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for tx in transfers {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        if ui
                            .link(tx.formatted_time())
                            .on_hover_text("Show details")
                            .clicked()
                        {
                            clicked = Some(tx.clone());
                        }
                    });
                    row.col(|ui| {
                        ui.monospace(short_address(&tx.from))
                            .on_hover_text(tx.from.as_str());
                    });
                    row.col(|ui| {
                        ui.monospace(short_address(&tx.to))
                            .on_hover_text(tx.to.as_str());
                    });
                    row.col(|ui| {
                        ui.label(tx.value.as_str());
                    });
                });
            }
        });

    clicked
}

fn show_pagination(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(state.can_go_previous(), egui::Button::new("Previous"))
            .clicked()
        {
            state.set_page(-1);
        }

        let p = state.pagination;
        ui.label(format!(
            "Page {} of {} ({} transfers)",
            p.page,
            p.pages.max(1),
            p.total
        ));

        if ui
            .add_enabled(state.can_go_next(), egui::Button::new("Next"))
            .clicked()
        {
            state.set_page(1);
        }
    });
}
