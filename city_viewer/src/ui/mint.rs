//! Mint panel: trigger button and the appended transaction results.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::config;
use crate::data::{ChainChannel, MintRequest};

/// One finished mint attempt, newest last.
#[derive(Clone, Debug, PartialEq)]
pub enum MintResult {
    Confirmed { url: String },
    Failed(String),
}

/// Result container for the mint panel. Entries are only ever appended.
#[derive(Resource, Default)]
pub struct MintPanel {
    pub results: Vec<MintResult>,
}

pub fn mint_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.init_resource::<MintPanel>()
        .add_systems(Update, (collect_mint_outcomes, mint_panel_system));
}

/// Moves finished mint outcomes from the worker channel into the panel.
fn collect_mint_outcomes(channel: Res<ChainChannel>, mut panel: ResMut<MintPanel>) {
    while let Ok(outcome) = channel.0.mint_outcomes.try_recv() {
        let entry = match outcome {
            Ok(receipt) => MintResult::Confirmed {
                url: config::tx_url(&receipt.tx_hash),
            },
            Err(err) => MintResult::Failed(err.to_string()),
        };
        panel.results.push(entry);
    }
}

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 110, 100);

/// The trigger stays enabled while a mint is in flight; repeated clicks
/// queue transactions in arrival order.
fn mint_panel_system(
    mut contexts: EguiContexts,
    channel: Res<ChainChannel>,
    mut panel: ResMut<MintPanel>,
) {
    egui::Window::new("Mint")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .show(contexts.ctx_mut(), |ui| {
            if ui.button("Mint").clicked()
                && channel
                    .0
                    .mint_requests
                    .send(MintRequest { quantity: 1 })
                    .is_err()
            {
                panel
                    .results
                    .push(MintResult::Failed("chain worker is not running".to_string()));
            }

            if panel.results.is_empty() {
                return;
            }
            ui.separator();
            for result in &panel.results {
                match result {
                    MintResult::Confirmed { url } => {
                        ui.hyperlink_to("Success", url);
                    }
                    MintResult::Failed(message) => {
                        ui.colored_label(ERROR_COLOR, message);
                    }
                }
            }
        });
}
