mod hud;
mod mint;

pub use hud::{hud_plugin, ConnectionStatus, HudState};
pub use mint::{mint_plugin, MintPanel, MintResult};
