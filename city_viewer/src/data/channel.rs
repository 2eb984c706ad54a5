use std::path::Path;

use crossbeam_channel::{bounded, unbounded};

use crate::data::evm::EvmClient;
use crate::data::{ChainClient, ChainConfig, ChainError, ChainHandle, ConnectionResult};

/// Bevy resource holding the channel endpoints from the chain worker thread.
/// Systems drain these in ingest_city and the UI collectors.
#[derive(bevy::prelude::Resource)]
pub struct ChainChannel(pub ChainHandle);

/// Create the chain channel and spawn the EVM worker on a dedicated thread.
pub fn init_chain_channel(config: ChainConfig) -> ChainChannel {
    ChainChannel(EvmClient::spawn(config))
}

/// Create a chain channel that replays a pre-recorded connection result from
/// a JSON fixture file. No chain is attached, so mint requests are answered
/// with an error outcome.
pub fn init_fixture_channel(path: &Path) -> ChainChannel {
    let json = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    let result: ConnectionResult = serde_json::from_str(&json)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()));

    let (conn_tx, conn_rx) = bounded(1);
    let (mint_tx, mint_rx) = unbounded();
    let (outcome_tx, outcome_rx) = bounded(16);
    let (_count_tx, count_rx) = bounded(1);

    conn_tx
        .send(Ok(result))
        .unwrap_or_else(|e| panic!("failed to stage fixture result: {e}"));

    std::thread::spawn(move || {
        while mint_rx.recv().is_ok() {
            let outcome = Err(ChainError::Transaction(
                "fixture channel has no chain attached".to_string(),
            ));
            if outcome_tx.send(outcome).is_err() {
                return;
            }
        }
    });

    ChainChannel(ChainHandle {
        connection: conn_rx,
        mint_requests: mint_tx,
        mint_outcomes: outcome_rx,
        collection: count_rx,
    })
}
