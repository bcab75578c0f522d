//! Fetches mined transactions so they can be inspected by hash
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Transaction, H256};
use eyre::{eyre, WrapErr};
use serde_json::{json, Value};
use std::env;
use tracing::debug;

/// Looks up a transaction by hash and returns it in the shape the insight pipeline expects
pub async fn get_transaction_request(tx_hash: &str, rpc_url: Option<&str>) -> eyre::Result<Value> {
    let tx_hash = parse_tx_hash(tx_hash)?;
    debug!(?tx_hash, "fetching transaction");
    let provider = get_provider(rpc_url)?;
    let tx = provider
        .get_transaction(tx_hash)
        .await
        .wrap_err("could not fetch transaction")?
        .ok_or_else(|| eyre!("transaction {:?} not found", tx_hash))?;
    Ok(transaction_to_request(&tx))
}

/// Converts an RPC transaction into a `{ from, to, value, data }` request object
pub fn transaction_to_request(tx: &Transaction) -> Value {
    json!({
        "from": format!("{:?}", tx.from),
        "to": tx.to.map(|to| format!("{:?}", to)),
        "value": tx.value.to_string(),
        "data": format!("0x{}", hex::encode(&tx.input)),
    })
}

pub fn parse_tx_hash(tx_hash: &str) -> eyre::Result<H256> {
    let tx_hash = tx_hash.trim_start_matches("0x");
    let mut tx_hash_bytes: [u8; 32] = [0; 32];
    hex::decode_to_slice(tx_hash, &mut tx_hash_bytes)
        .wrap_err_with(|| format!("invalid transaction hash: {}", tx_hash))?;
    Ok(H256::from(tx_hash_bytes))
}

/// Provider for the given url, falling back to the `RPC_URL` environment variable
pub fn get_provider(rpc_url: Option<&str>) -> eyre::Result<Provider<Http>> {
    let rpc_url = match rpc_url {
        Some(url) => url.to_string(),
        None => env::var("RPC_URL").wrap_err("RPC_URL must be set when no rpc url is given")?,
    };
    Provider::<Http>::try_from(rpc_url.as_str()).wrap_err("could not instantiate HTTP provider")
}
