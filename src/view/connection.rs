//! Connection bar — connector buttons, account info and token balance.

use egui::Ui;
use tokio::sync::mpsc;

use crate::events::UiEvent;
use crate::state::AppState;
use crate::wallet::ConnectorKind;

/// Render the connection bar.
pub fn show(ui: &mut Ui, state: &mut AppState, ui_tx: &mpsc::UnboundedSender<UiEvent>) {
    match state.account.clone() {
        Some(account) => {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Connected").color(egui::Color32::GREEN));
                ui.add_space(6.0);
                ui.monospace(account.address.as_str());
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(format!(
                        "chain {} · {}",
                        account.chain_id,
                        account.connector.name()
                    ))
                    .color(egui::Color32::GRAY)
                    .small(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Disconnect").clicked() {
                        let _ = ui_tx.send(state.disconnect());
                    }
                });
            });

            ui.add_space(6.0);
            show_balance(ui, state, ui_tx);
        }
        None => {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Not connected").color(egui::Color32::RED));
                ui.add_space(10.0);
                ui.add(
                    egui::TextEdit::singleline(&mut state.watch_address_input)
                        .hint_text("0x… address to watch")
                        .desired_width(360.0),
                );

                let busy = state.connecting.is_some();
                for connector in ConnectorKind::ALL {
                    let label = if state.connecting == Some(connector) {
                        format!("Connecting to {}...", connector.name())
                    } else {
                        connector.name().to_string()
                    };
                    if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                        let event = state.connect(connector);
                        let _ = ui_tx.send(event);
                    }
                }
            });
        }
    }

    if let Some(ref err) = state.connect_error {
        ui.colored_label(egui::Color32::RED, err.as_str());
    }
}

fn show_balance(ui: &mut Ui, state: &AppState, ui_tx: &mpsc::UnboundedSender<UiEvent>) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("Balance")
                .size(14.0)
                .color(egui::Color32::GRAY),
        );
        ui.add_space(8.0);

        match state.balance {
            Some(ref balance) => {
                ui.label(egui::RichText::new(balance.formatted()).size(24.0).strong());
            }
            None if state.balance_error.is_some() => {
                ui.label(egui::RichText::new("—").size(24.0));
            }
            None => {
                ui.spinner();
            }
        }

        if ui.small_button("🔄").on_hover_text("Refresh balance").clicked() {
            let _ = ui_tx.send(UiEvent::RefreshBalance);
        }

        if let Some(ref err) = state.balance_error {
            ui.label(
                egui::RichText::new(format!("Balance unavailable: {}", err))
                    .color(egui::Color32::YELLOW)
                    .small(),
            );
        }
    });
}
