//! City viewer: 3D visualization of on-chain building placements.
//!
//! Library root: camera, data, scene, UI, SDK builder, and config modules.

mod camera;
pub mod config;
pub mod data;
mod scene;
mod ui;

pub mod prelude;
pub mod sdk;

pub use camera::{rise_camera_plugin, CameraSettings};
pub use data::evm::EvmClient;
pub use data::{
    init_chain_channel, init_fixture_channel, BuildingRecord, ChainChannel, ChainClient,
    ChainConfig, ChainError, ChainHandle, ConnectionResult, MintReceipt, MintRequest,
};
pub use scene::{ingest_city, setup_scene, Building, CityState, Ground, GroundAnchor};
pub use ui::{hud_plugin, mint_plugin, ConnectionStatus, HudState, MintPanel, MintResult};
