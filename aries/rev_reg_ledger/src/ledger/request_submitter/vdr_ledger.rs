use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
    sync::Arc,
};

use async_trait::async_trait;
use indy_vdr::{
    common::error::VdrError,
    config::PoolConfig,
    pool::{
        PoolBuilder, PoolRunner, PoolTransactions, PreparedRequest, RequestResult,
        RequestResultMeta,
    },
};
use log::{debug, info};
use tokio::sync::oneshot;

use super::RequestSubmitter;
use crate::{
    errors::error::{RevRegLedgerError, RevRegLedgerResult},
    ledger::genesis::{fetch_genesis_transactions, IDUNION_TESTNET_GENESIS_URL},
};

#[derive(Clone, Debug)]
pub struct LedgerPoolConfig {
    pub genesis_url: String,
    pub indy_vdr_config: Option<PoolConfig>,
    pub exclude_nodes: Vec<String>,
}

impl Default for LedgerPoolConfig {
    fn default() -> Self {
        Self {
            genesis_url: IDUNION_TESTNET_GENESIS_URL.to_string(),
            indy_vdr_config: None,
            exclude_nodes: vec![],
        }
    }
}

/// Handle to an open pool. Only obtainable from a successful open, so holders never see a
/// half-initialised pool.
#[derive(Clone)]
pub struct IndyVdrLedgerPool {
    runner: Arc<PoolRunner>,
}

impl IndyVdrLedgerPool {
    pub fn new_from_runner(runner: PoolRunner) -> Self {
        IndyVdrLedgerPool {
            runner: Arc::new(runner),
        }
    }

    fn generate_exclusion_weights(exclude_nodes: Vec<String>) -> HashMap<String, f32> {
        exclude_nodes
            .into_iter()
            .map(|node| (node, 0.0f32))
            .collect()
    }

    /// Opens a pool from genesis transactions given as JSON lines.
    pub fn open(
        genesis_transactions: &str,
        indy_vdr_config: PoolConfig,
        exclude_nodes: Vec<String>,
    ) -> RevRegLedgerResult<Self> {
        info!(
            "IndyVdrLedgerPool::open >> indy_vdr_config: {indy_vdr_config:?}, exclude_nodes: \
             {exclude_nodes:?}"
        );
        let txns = PoolTransactions::from_json(genesis_transactions)
            .map_err(|err| RevRegLedgerError::PoolOpenFailed(err.to_string()))?;
        let runner = PoolBuilder::new(indy_vdr_config, txns)
            .node_weights(Some(Self::generate_exclusion_weights(exclude_nodes)))
            .into_runner(None)
            .map_err(|err| RevRegLedgerError::PoolOpenFailed(err.to_string()))?;

        Ok(Self::new_from_runner(runner))
    }

    /// Downloads the genesis file named by the config and opens a pool from it.
    pub async fn bootstrap(config: LedgerPoolConfig) -> RevRegLedgerResult<Self> {
        let genesis = fetch_genesis_transactions(&config.genesis_url).await?;
        let pool = Self::open(
            &genesis,
            config.indy_vdr_config.unwrap_or_default(),
            config.exclude_nodes,
        )?;
        info!("IndyVdrLedgerPool::bootstrap << pool opened from {}", config.genesis_url);
        Ok(pool)
    }
}

impl Debug for IndyVdrLedgerPool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndyVdrLedgerPool")
            .field("runner", &"PoolRunner")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct IndyVdrSubmitter {
    pool: IndyVdrLedgerPool,
}

impl IndyVdrSubmitter {
    pub fn new(pool: IndyVdrLedgerPool) -> Self {
        Self { pool }
    }
}

fn submission_failed(request_label: &str, err: &VdrError) -> RevRegLedgerError {
    RevRegLedgerError::LedgerSubmissionFailed(format!("{request_label}: {err}"))
}

#[async_trait]
impl RequestSubmitter for IndyVdrSubmitter {
    async fn submit(&self, request: PreparedRequest) -> RevRegLedgerResult<String> {
        let request_label = format!("request type {} (reqId {})", request.txn_type, request.req_id);
        debug!("submit >> {request_label}");

        // indyvdr send_request is Async via a callback.
        // Use oneshot channel to send result from callback, converting the fn to future.
        type VdrSendRequestResult = Result<(RequestResult<String>, RequestResultMeta), VdrError>;
        let (sender, recv) = oneshot::channel::<VdrSendRequestResult>();
        self.pool
            .runner
            .send_request(
                request,
                Box::new(move |result| {
                    // unable to handle a failure from `send` here
                    sender.send(result).ok();
                }),
            )
            .map_err(|err| submission_failed(&request_label, &err))?;

        let (result, _) = recv
            .await?
            .map_err(|err| submission_failed(&request_label, &err))?;

        match result {
            RequestResult::Reply(reply) => Ok(reply),
            RequestResult::Failed(failed) => Err(submission_failed(&request_label, &failed)),
        }
    }
}
