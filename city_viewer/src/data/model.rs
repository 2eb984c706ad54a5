// Chain-agnostic connection and mint payloads.
// Alloy-specific types stay in evm.rs; conversion happens there.

use serde::{Deserialize, Serialize};

/// One on-chain building placement: world position and box dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
    pub h: f32,
    pub d: f32,
}

/// The connection handshake's single result: the wallet account, the
/// reported supply, and the ordered building records. Immutable once built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionResult {
    pub account: String,
    pub supply: u64,
    pub buildings: Vec<BuildingRecord>,
}

/// A queued request to mint tokens from the connected account.
#[derive(Clone, Copy, Debug)]
pub struct MintRequest {
    pub quantity: u64,
}

/// Receipt for a confirmed mint transaction.
#[derive(Clone, Debug)]
pub struct MintReceipt {
    pub tx_hash: String,
}
