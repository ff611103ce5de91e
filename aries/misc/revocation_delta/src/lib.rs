//! Reconciliation of revocation registry index sets between two ledger snapshots.

pub mod error;
mod index_set;
mod reconciler;
mod registry_state;

pub use index_set::{IndexSet, RegistryIndex};
pub use reconciler::{reconcile, ReconciliationStrategy, SnapshotPair};
pub use registry_state::{
    IssuanceType, RevocationRegistryState, ISSUANCE_BY_DEFAULT, ISSUANCE_ON_DEMAND,
};
