use clap::Parser;
use log::debug;
use revocation_delta::{error::RevocationDeltaResult, IndexSet, SnapshotPair};

use crate::strategy_from_flag;

/// Computes the net set of revocation registry indices between two snapshots.
#[derive(Parser, Debug)]
#[command(name = "revoked")]
pub struct ReconcileOpts {
    /// `True` reports revoked indices, `False` reports issued indices. Defaults to `False`.
    #[arg(long = "strat_default", value_parser = ["True", "False"])]
    pub strat_default: Option<String>,
    #[arg(long = "revoked_old", num_args = 0.., allow_negative_numbers = true)]
    pub revoked_old: Vec<String>,
    #[arg(long = "revoked_new", num_args = 0.., allow_negative_numbers = true)]
    pub revoked_new: Vec<String>,
    #[arg(long = "issued_old", num_args = 0.., allow_negative_numbers = true)]
    pub issued_old: Vec<String>,
    #[arg(long = "issued_new", num_args = 0.., allow_negative_numbers = true)]
    pub issued_new: Vec<String>,
}

impl ReconcileOpts {
    pub fn use_revoked_as_primary(&self) -> bool {
        strategy_from_flag(self.strat_default.as_deref()).uses_revoked_as_primary()
    }

    pub fn snapshot_pair(&self) -> RevocationDeltaResult<SnapshotPair> {
        Ok(SnapshotPair {
            revoked_old: IndexSet::parse_tokens(&self.revoked_old)?,
            revoked_new: IndexSet::parse_tokens(&self.revoked_new)?,
            issued_old: IndexSet::parse_tokens(&self.issued_old)?,
            issued_new: IndexSet::parse_tokens(&self.issued_new)?,
        })
    }
}

/// Validates every input before reconciling, so nothing is computed from partial input.
pub fn run(opts: &ReconcileOpts) -> RevocationDeltaResult<IndexSet> {
    let snapshot = opts.snapshot_pair()?;
    let strategy = strategy_from_flag(opts.strat_default.as_deref());
    debug!("run >> strategy: {strategy:?}, snapshot: {snapshot:?}");
    Ok(snapshot.reconcile(strategy))
}
