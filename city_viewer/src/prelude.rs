//! Minimal prelude for SDK consumers.

pub use crate::config::{camera_settings, chain_config, tx_url};
pub use crate::data::{
    BuildingRecord, ChainClient, ChainConfig, ChainError, ConnectionResult, MintReceipt,
    MintRequest,
};
pub use crate::sdk::CityViewerBuilder;
