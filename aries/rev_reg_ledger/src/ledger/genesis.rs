use log::{debug, info};

use crate::errors::error::{RevRegLedgerError, RevRegLedgerResult};

pub const IDUNION_TESTNET_GENESIS_URL: &str =
    "https://raw.githubusercontent.com/IDunion/IDunion_TestNet_Genesis/master/pool_transactions_genesis";

/// Downloads the genesis transaction list. The body is returned untouched, its format is
/// only understood by the pool.
pub async fn fetch_genesis_transactions(genesis_url: &str) -> RevRegLedgerResult<String> {
    info!("Downloading genesis transactions from {genesis_url}");
    let fetch_failed = |err: reqwest::Error| RevRegLedgerError::GenesisFetchFailed {
        url: genesis_url.to_string(),
        reason: err.to_string(),
    };

    let body = reqwest::get(genesis_url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(fetch_failed)?
        .text()
        .await
        .map_err(fetch_failed)?;
    debug!(
        "fetch_genesis_transactions << received {} genesis lines",
        body.lines().filter(|line| !line.trim().is_empty()).count()
    );
    Ok(body)
}
