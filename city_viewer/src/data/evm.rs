//! EVM chain worker: dedicated thread, alloy provider, and the city contract.

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, I256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use crossbeam_channel::{bounded, unbounded};
use std::thread;

use crate::config;
use crate::data::{
    fetch_minted_count, BuildingRecord, ChainClient, ChainConfig, ChainError, ChainHandle,
    ConnectionResult, MintReceipt, MintRequest,
};

sol! {
    #[sol(rpc)]
    contract CityToken {
        struct Building {
            int256 x;
            int256 y;
            int256 z;
            int256 w;
            int256 h;
            int256 d;
        }

        function totalSupply() external view returns (uint256);
        function getBuilding() external view returns (Building[] memory);
        function mint(uint256 quantity) external;
    }
}

const OUTCOME_BUFFER: usize = 16;

/// EVM chain worker using alloy. Owns the provider and contract handle for
/// the process lifetime; the app only ever talks to it through channels.
pub struct EvmClient;

impl ChainClient for EvmClient {
    fn spawn(config: ChainConfig) -> ChainHandle {
        let (conn_tx, conn_rx) = bounded(1);
        let (mint_tx, mint_rx) = unbounded::<MintRequest>();
        let (outcome_tx, outcome_rx) = bounded(OUTCOME_BUFFER);
        let (count_tx, count_rx) = bounded(1);

        thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    eprintln!("metropolis: failed to build tokio runtime: {err}");
                    return;
                }
            };

            let session = match rt.block_on(connect(&config)) {
                Ok((session, result)) => {
                    if conn_tx.send(Ok(result)).is_err() {
                        return;
                    }
                    session
                }
                Err(err) => {
                    eprintln!("metropolis: connection failed: {err}");
                    let _ = conn_tx.send(Err(err));
                    return;
                }
            };
            drop(conn_tx);

            if let Some(api) = config.collection_api.clone() {
                let count = rt.block_on(fetch_minted_count(api));
                if let Err(err) = &count {
                    eprintln!("metropolis: {err}");
                }
                let _ = count_tx.send(count);
            }
            drop(count_tx);

            // Mint requests are served in arrival order until the app side
            // hangs up. Nothing is retried.
            while let Ok(request) = mint_rx.recv() {
                let outcome = rt.block_on(session.mint(request));
                match &outcome {
                    Ok(receipt) => eprintln!("metropolis: mint confirmed: {}", receipt.tx_hash),
                    Err(err) => eprintln!("metropolis: {err}"),
                }
                if outcome_tx.send(outcome).is_err() {
                    return;
                }
            }
        });

        ChainHandle {
            connection: conn_rx,
            mint_requests: mint_tx,
            mint_outcomes: outcome_rx,
            collection: count_rx,
        }
    }
}

/// Live contract handle, held by the worker after a successful handshake.
struct ChainSession<P: Provider> {
    contract: CityToken::CityTokenInstance<P>,
    account: Address,
}

impl<P: Provider> ChainSession<P> {
    /// Submits one mint transaction and waits until it is included.
    async fn mint(&self, request: MintRequest) -> Result<MintReceipt, ChainError> {
        let receipt = self
            .contract
            .mint(U256::from(request.quantity))
            .from(self.account)
            .send()
            .await
            .map_err(|err| ChainError::Transaction(err.to_string()))?
            .get_receipt()
            .await
            .map_err(|err| ChainError::Transaction(err.to_string()))?;

        Ok(MintReceipt {
            tx_hash: receipt.transaction_hash.to_string(),
        })
    }
}

/// One-shot handshake: wallet check, then `totalSupply` and `getBuilding`
/// sequentially, both scoped to the wallet account. The wallet check happens
/// before any network call so an unsupported environment fails immediately.
async fn connect(
    config: &ChainConfig,
) -> Result<(ChainSession<impl Provider>, ConnectionResult), ChainError> {
    let key = config
        .wallet_key
        .as_deref()
        .ok_or(ChainError::WalletUnavailable)?;
    let signer = key
        .parse::<PrivateKeySigner>()
        .map_err(|err| ChainError::BadWalletKey(err.to_string()))?;
    let account = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(config.rpc_url.clone());
    let contract = CityToken::new(config::CONTRACT_ADDRESS, provider);

    let supply = contract
        .totalSupply()
        .from(account)
        .call()
        .await
        .map_err(|err| ChainError::Rpc(err.to_string()))?;
    let raw = contract
        .getBuilding()
        .from(account)
        .call()
        .await
        .map_err(|err| ChainError::Rpc(err.to_string()))?;

    let result = ConnectionResult {
        account: account.to_string(),
        supply: to_supply(supply),
        buildings: raw.iter().map(to_record).collect(),
    };
    eprintln!(
        "metropolis: connected as {} (supply {}, {} records)",
        result.account,
        result.supply,
        result.buildings.len()
    );

    Ok((ChainSession { contract, account }, result))
}

fn to_record(building: &CityToken::Building) -> BuildingRecord {
    BuildingRecord {
        x: to_world_unit(building.x),
        y: to_world_unit(building.y),
        z: to_world_unit(building.z),
        w: to_world_unit(building.w),
        h: to_world_unit(building.h),
        d: to_world_unit(building.d),
    }
}

/// Narrows an on-chain 256-bit value to a world unit, saturating when the
/// contract stores something outside the renderable range.
fn to_world_unit(value: I256) -> f32 {
    match i128::try_from(value) {
        Ok(n) => n as f32,
        Err(_) if value.is_negative() => f32::MIN,
        Err(_) => f32::MAX,
    }
}

fn to_supply(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_world_unit_is_exact_in_range() {
        assert_eq!(to_world_unit(I256::try_from(42i64).unwrap()), 42.0);
        assert_eq!(to_world_unit(I256::try_from(-7i64).unwrap()), -7.0);
        assert_eq!(to_world_unit(I256::ZERO), 0.0);
    }

    #[test]
    fn to_world_unit_saturates_out_of_range() {
        assert_eq!(to_world_unit(I256::MAX), f32::MAX);
        assert_eq!(to_world_unit(I256::MIN), f32::MIN);
    }

    #[test]
    fn to_supply_narrows_and_saturates() {
        assert_eq!(to_supply(U256::from(7u64)), 7);
        assert_eq!(to_supply(U256::MAX), u64::MAX);
    }

    #[test]
    fn to_record_maps_every_field() {
        let building = CityToken::Building {
            x: I256::try_from(1i64).unwrap(),
            y: I256::try_from(2i64).unwrap(),
            z: I256::try_from(-3i64).unwrap(),
            w: I256::try_from(4i64).unwrap(),
            h: I256::try_from(5i64).unwrap(),
            d: I256::try_from(6i64).unwrap(),
        };

        let record = to_record(&building);

        assert_eq!(
            record,
            BuildingRecord {
                x: 1.0,
                y: 2.0,
                z: -3.0,
                w: 4.0,
                h: 5.0,
                d: 6.0
            }
        );
    }
}
