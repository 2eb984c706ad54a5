mod channel;
mod collection;
pub mod evm;
mod model;

use alloy_chains::Chain;
use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;
use url::Url;

pub use channel::{init_chain_channel, init_fixture_channel, ChainChannel};
pub use collection::fetch_minted_count;
pub use model::{BuildingRecord, ConnectionResult, MintReceipt, MintRequest};

/// Configuration for spawning the chain worker.
pub struct ChainConfig {
    pub chain: Chain,
    pub rpc_url: Url,
    pub wallet_key: Option<String>,
    pub collection_api: Option<Url>,
}

/// Channel endpoints the chain worker exposes to the app.
pub struct ChainHandle {
    /// One-shot: the connection handshake resolves exactly once.
    pub connection: Receiver<Result<ConnectionResult, ChainError>>,
    pub mint_requests: Sender<MintRequest>,
    pub mint_outcomes: Receiver<Result<MintReceipt, ChainError>>,
    pub collection: Receiver<Result<usize, ChainError>>,
}

/// Interface for chain-specific workers.
pub trait ChainClient: Send + 'static {
    fn spawn(config: ChainConfig) -> ChainHandle;
}

/// Failures surfaced by the chain worker. Nothing here is retried.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("no wallet in environment: set WALLET_KEY to a hex private key")]
    WalletUnavailable,
    #[error("invalid wallet key: {0}")]
    BadWalletKey(String),
    #[error("contract call failed: {0}")]
    Rpc(String),
    #[error("mint transaction failed: {0}")]
    Transaction(String),
    #[error("collection api request failed: {0}")]
    Api(String),
}
