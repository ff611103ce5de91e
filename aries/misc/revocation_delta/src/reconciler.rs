use log::trace;
use serde::{Deserialize, Serialize};

use crate::index_set::IndexSet;

/// Selects which kind of index set drives the reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReconciliationStrategy {
    /// Answers "which indices are revoked now".
    RevokedAsPrimary,
    /// Answers "which indices are issued now".
    IssuedAsPrimary,
}

impl ReconciliationStrategy {
    pub fn uses_revoked_as_primary(self) -> bool {
        matches!(self, Self::RevokedAsPrimary)
    }
}

impl From<bool> for ReconciliationStrategy {
    fn from(use_revoked_as_primary: bool) -> Self {
        if use_revoked_as_primary {
            Self::RevokedAsPrimary
        } else {
            Self::IssuedAsPrimary
        }
    }
}

/// Registry state observed at two timestamps, old before new.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPair {
    pub revoked_old: IndexSet,
    pub revoked_new: IndexSet,
    pub issued_old: IndexSet,
    pub issued_new: IndexSet,
}

impl SnapshotPair {
    pub fn reconcile(&self, strategy: ReconciliationStrategy) -> IndexSet {
        reconcile(
            &self.revoked_old,
            &self.revoked_new,
            &self.issued_old,
            &self.issued_new,
            strategy.uses_revoked_as_primary(),
        )
    }
}

/// Computes the net index set between two registry snapshots.
///
/// With `use_revoked_as_primary` the result is `(revoked_old - issued_new) | revoked_new`,
/// otherwise `(issued_old - revoked_new) | issued_new`.
///
/// The difference is always taken before the union, so an index that was re-issued and
/// then revoked again within the same window stays in the result.
pub fn reconcile(
    revoked_old: &IndexSet,
    revoked_new: &IndexSet,
    issued_old: &IndexSet,
    issued_new: &IndexSet,
    use_revoked_as_primary: bool,
) -> IndexSet {
    let (baseline, opposing_new, same_kind_new) = if use_revoked_as_primary {
        (revoked_old, issued_new, revoked_new)
    } else {
        (issued_old, revoked_new, issued_new)
    };

    let mut result = baseline.difference(opposing_new);
    result.union_with(same_kind_new);
    trace!(
        "reconcile << use_revoked_as_primary: {use_revoked_as_primary}, baseline: {baseline}, \
         result: {result}"
    );
    result
}
