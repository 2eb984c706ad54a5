//! Env parsing and fixed chain constants.

use alloy::primitives::{address, Address};
use alloy_chains::{Chain, NamedChain};
use url::Url;

use crate::camera::CameraSettings;
use crate::data::ChainConfig;

/// RPC env vars in priority order; the first one holding a valid URL wins.
const RPC_ENV_VARS: &[&str] = &["MUMBAI_RPC_URL", "RPC_URL"];
const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

const WALLET_KEY_ENV: &str = "WALLET_KEY";
const COLLECTION_API_ENV: &str = "COLLECTION_API_URL";
const CAMERA_STEP_ENV: &str = "CAMERA_STEP";

/// The deployed city contract on Polygon Mumbai.
pub const CONTRACT_ADDRESS: Address = address!("7c53ef98d49eef0dd8f10dbfef21f97ae0434a26");

const TX_EXPLORER_BASE: &str = "https://mumbai.polygonscan.com/tx/";

/// Block-explorer page for a transaction hash. The template must match the
/// target test network's explorer exactly.
pub fn tx_url(hash: &str) -> String {
    format!("{TX_EXPLORER_BASE}{hash}")
}

/// Builds the chain worker config from the environment. The wallet key stays
/// optional here so the handshake itself reports an unsupported environment.
pub fn chain_config() -> ChainConfig {
    let collection_api = match std::env::var(COLLECTION_API_ENV) {
        Ok(raw) => match raw.parse::<Url>() {
            Ok(url) => Some(url),
            Err(err) => {
                eprintln!("metropolis: invalid URL in {COLLECTION_API_ENV}: {raw:?} ({err})");
                None
            }
        },
        Err(_) => None,
    };

    ChainConfig {
        chain: Chain::from_named(NamedChain::PolygonMumbai),
        rpc_url: rpc_url(),
        wallet_key: std::env::var(WALLET_KEY_ENV).ok(),
        collection_api,
    }
}

fn rpc_url() -> Url {
    for env_var in RPC_ENV_VARS {
        if let Ok(raw) = std::env::var(env_var) {
            match raw.parse::<Url>() {
                Ok(url) => return url,
                Err(_) => eprintln!("metropolis: invalid URL in {env_var}: {raw:?}"),
            }
        }
    }
    DEFAULT_RPC
        .parse()
        .unwrap_or_else(|err| panic!("metropolis: invalid default RPC {DEFAULT_RPC:?}: {err}"))
}

/// Camera step from the environment. Deployments have shipped with 0.05 and
/// 0.5, so the step is configuration, not a constant.
pub fn camera_settings() -> CameraSettings {
    match std::env::var(CAMERA_STEP_ENV) {
        Ok(raw) => match raw.parse::<f32>() {
            Ok(step) if step.is_finite() => CameraSettings { step },
            _ => {
                eprintln!("metropolis: invalid {CAMERA_STEP_ENV}: {raw:?}, using default");
                CameraSettings::default()
            }
        },
        Err(_) => CameraSettings::default(),
    }
}
