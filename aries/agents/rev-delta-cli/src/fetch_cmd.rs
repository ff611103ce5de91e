use std::time::Duration;

use clap::{Parser, Subcommand};
use log::info;
use rev_reg_ledger::{
    errors::error::{RevRegLedgerError, RevRegLedgerResult},
    ledger::{
        delta_fetcher::RevRegDeltaFetcher,
        genesis::IDUNION_TESTNET_GENESIS_URL,
        registry_scanner::RevRegScanner,
        request_submitter::vdr_ledger::{IndyVdrLedgerPool, IndyVdrSubmitter, LedgerPoolConfig},
    },
};
use serde_json::{json, Value};

use crate::{deadline::DeadlineSubmitter, strategy_from_flag};

/// Reads revocation registry deltas from an Indy ledger.
#[derive(Parser, Debug)]
#[command(name = "rev-reg-delta")]
pub struct FetchOpts {
    /// Where to download the pool's genesis transactions from.
    #[arg(long, env = "GENESIS_URL", default_value = IDUNION_TESTNET_GENESIS_URL)]
    pub genesis_url: String,
    /// Deadline for the pool bootstrap and for each ledger read.
    #[arg(long, env = "LEDGER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
    /// Node alias to leave out of request routing. Repeatable.
    #[arg(long = "exclude-node")]
    pub exclude_nodes: Vec<String>,
    #[command(subcommand)]
    pub command: FetchCommand,
}

#[derive(Subcommand, Debug)]
pub enum FetchCommand {
    /// Fetch the registry delta as of a registry entry transaction.
    Tx {
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        seq_no: i32,
    },
    /// Fetch the deltas just before and at a registry entry transaction and reconcile them.
    Window {
        #[arg(value_parser = clap::value_parser!(i32).range(1..))]
        seq_no: i32,
        /// `True` reconciles revoked indices, `False` issued indices. Defaults to `False`.
        #[arg(long = "strat_default", value_parser = ["True", "False"])]
        strat_default: Option<String>,
    },
    /// Replay registry definitions and entries from the domain ledger.
    Scan {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i32).range(1..))]
        from: i32,
        #[arg(long)]
        limit: Option<u32>,
    },
}

impl FetchOpts {
    pub fn pool_config(&self) -> LedgerPoolConfig {
        LedgerPoolConfig {
            genesis_url: self.genesis_url.clone(),
            indy_vdr_config: None,
            exclude_nodes: self.exclude_nodes.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub async fn run(opts: FetchOpts) -> RevRegLedgerResult<Value> {
    let deadline = opts.timeout();
    let pool_config = opts.pool_config();
    let genesis_url = pool_config.genesis_url.clone();

    let pool = tokio::time::timeout(deadline, IndyVdrLedgerPool::bootstrap(pool_config))
        .await
        .map_err(|_| RevRegLedgerError::GenesisFetchFailed {
            url: genesis_url,
            reason: format!("bootstrap timed out after {deadline:?}"),
        })??;
    let fetcher =
        RevRegDeltaFetcher::new(DeadlineSubmitter::new(IndyVdrSubmitter::new(pool), deadline));
    info!("Pool ready, running {:?}", opts.command);

    match opts.command {
        FetchCommand::Tx { seq_no } => {
            let delta = fetcher.fetch_delta_for_transaction(seq_no).await?;
            Ok(serde_json::to_value(delta)?)
        }
        FetchCommand::Window {
            seq_no,
            strat_default,
        } => {
            let window = fetcher.fetch_delta_window(seq_no).await?;
            let strategy = strategy_from_flag(strat_default.as_deref());
            let reconciled = window.snapshot_pair()?.reconcile(strategy);
            Ok(json!({
                "window": serde_json::to_value(&window)?,
                "strategy": serde_json::to_value(strategy)?,
                "reconciled": serde_json::to_value(&reconciled)?,
            }))
        }
        FetchCommand::Scan { from, limit } => {
            let report = RevRegScanner::new(&fetcher).scan(from, limit).await?;
            Ok(serde_json::to_value(report)?)
        }
    }
}
