//! HUD overlay: connection status, account, supply, minted count, FPS.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::data::{ChainChannel, ChainError, ConnectionResult};
use crate::scene::CityState;

/// Connection lifecycle as displayed in the HUD.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected {
        account: String,
        supply: u64,
    },
    Failed(String),
}

/// Live HUD state, updated by city ingestion and the channel collectors.
#[derive(Resource, Default)]
pub struct HudState {
    pub status: ConnectionStatus,
    pub minted: Option<Result<usize, String>>,
}

impl HudState {
    /// Records the one-time connection result.
    pub fn connected(&mut self, result: &ConnectionResult) {
        self.status = ConnectionStatus::Connected {
            account: result.account.clone(),
            supply: result.supply,
        };
    }

    pub fn connection_failed(&mut self, err: &ChainError) {
        self.status = ConnectionStatus::Failed(err.to_string());
    }

    pub fn connection_lost(&mut self) {
        self.status = ConnectionStatus::Failed("chain worker exited before connecting".to_string());
    }
}

pub fn hud_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .init_resource::<HudState>()
        .add_systems(Update, (poll_collection, hud_overlay_system));
}

/// Drains minted-count reports from the worker into HUD state.
fn poll_collection(channel: Res<ChainChannel>, mut hud: ResMut<HudState>) {
    while let Ok(count) = channel.0.collection.try_recv() {
        hud.minted = Some(count.map_err(|err| err.to_string()));
    }
}

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 110, 100);

fn hud_overlay_system(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    city: Res<CityState>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("Metropolis")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.label(
                egui::RichText::new("Metropolis")
                    .size(16.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.add_space(4.0);

            match &hud.status {
                ConnectionStatus::Connecting => {
                    ui.label("Connecting to wallet...");
                }
                ConnectionStatus::Connected { account, supply } => {
                    ui.label(format!("Account {}", short_account(account)));
                    ui.label(format!("Supply {supply}"));
                    ui.label(format!("Buildings {}", city.building_count));
                }
                ConnectionStatus::Failed(message) => {
                    ui.colored_label(ERROR_COLOR, message);
                }
            }

            match &hud.minted {
                Some(Ok(count)) => {
                    ui.label(format!("Minted {count}"));
                }
                Some(Err(message)) => {
                    ui.colored_label(ERROR_COLOR, format!("Minted count unavailable: {message}"));
                }
                None => {}
            }

            ui.add_space(4.0);
            ui.separator();
            ui.label(format!("FPS  {fps:.0}"));
        });
}

/// Shortens a wallet address for display.
fn short_account(account: &str) -> String {
    if account.len() <= 12 {
        return account.to_string();
    }
    format!("{}..{}", &account[..6], &account[account.len() - 4..])
}
