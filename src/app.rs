//! Application struct — the eframe::App implementation.
//!
//! Thin wrapper: drains service events, dispatches to view modules.
//! No async, no network.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::events::{ServiceEvent, UiEvent};
use crate::state::AppState;
use crate::view;

/// The transfer viewer application.
pub struct App {
    pub state: AppState,
    pub ui_tx: mpsc::UnboundedSender<UiEvent>,
    svc_rx: mpsc::UnboundedReceiver<ServiceEvent>,
    shutdown_token: CancellationToken,
}

impl App {
    /// Create a new App, spawning the background service task.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (svc_tx, svc_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let state = AppState::new(config.page_limit);
        tokio::spawn(crate::service::run(token.clone(), ui_rx, svc_tx, config));

        Self {
            state,
            ui_tx,
            svc_rx,
            shutdown_token: token,
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.ui_tx.send(UiEvent::Shutdown);
        self.shutdown_token.cancel();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint regularly to pick up balance polls
        ctx.request_repaint_after(std::time::Duration::from_secs(1));

        // 1. Drain all pending service events (non-blocking)
        while let Ok(event) = self.svc_rx.try_recv() {
            self.state.apply(event);
            ctx.request_repaint();
        }

        // 2. Connection bar and balance
        egui::TopBottomPanel::top("connection").show(ctx, |ui| {
            ui.add_space(6.0);
            view::connection::show(ui, &mut self.state, &self.ui_tx);
            ui.add_space(6.0);
        });

        // 3. Transfer list
        egui::CentralPanel::default().show(ctx, |ui| {
            view::transfers::show(ui, &mut self.state, &self.ui_tx);
        });

        // 4. Detail overlay on top of everything
        view::detail::show(ctx, &mut self.state);

        if self.state.loading || self.state.connecting.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
