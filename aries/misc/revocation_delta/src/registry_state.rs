use std::{fmt::Display, str::FromStr};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    error::RevocationDeltaError,
    index_set::IndexSet,
    reconciler::{reconcile, ReconciliationStrategy},
};

pub const ISSUANCE_BY_DEFAULT: &str = "ISSUANCE_BY_DEFAULT";
pub const ISSUANCE_ON_DEMAND: &str = "ISSUANCE_ON_DEMAND";

/// How a revocation registry was defined on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssuanceType {
    /// Every index starts out issued; entries track revocations.
    #[serde(rename = "ISSUANCE_BY_DEFAULT")]
    IssuanceByDefault,
    /// No index starts out issued; entries track issuances.
    #[serde(rename = "ISSUANCE_ON_DEMAND")]
    IssuanceOnDemand,
}

impl IssuanceType {
    pub fn strategy(self) -> ReconciliationStrategy {
        match self {
            Self::IssuanceByDefault => ReconciliationStrategy::RevokedAsPrimary,
            Self::IssuanceOnDemand => ReconciliationStrategy::IssuedAsPrimary,
        }
    }
}

impl FromStr for IssuanceType {
    type Err = RevocationDeltaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ISSUANCE_BY_DEFAULT => Ok(Self::IssuanceByDefault),
            ISSUANCE_ON_DEMAND => Ok(Self::IssuanceOnDemand),
            other => Err(RevocationDeltaError::InvalidInput(format!(
                "unknown issuance type `{other}`"
            ))),
        }
    }
}

impl Display for IssuanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IssuanceByDefault => f.write_str(ISSUANCE_BY_DEFAULT),
            Self::IssuanceOnDemand => f.write_str(ISSUANCE_ON_DEMAND),
        }
    }
}

/// Tracked revocation state of one registry, advanced one ledger entry at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRegistryState {
    pub issuance_type: IssuanceType,
    pub revoked: IndexSet,
    pub issued: IndexSet,
}

impl RevocationRegistryState {
    pub fn new(issuance_type: IssuanceType) -> Self {
        Self {
            issuance_type,
            revoked: IndexSet::new(),
            issued: IndexSet::new(),
        }
    }

    /// The set this registry's issuance type keeps track of.
    pub fn tracked(&self) -> &IndexSet {
        match self.issuance_type {
            IssuanceType::IssuanceByDefault => &self.revoked,
            IssuanceType::IssuanceOnDemand => &self.issued,
        }
    }

    /// Folds one registry entry into the state and returns the new tracked set.
    ///
    /// `None` means the entry does not carry that list; an empty list is still applied.
    /// An entry carrying neither list leaves the state untouched and yields an empty set.
    pub fn apply_entry(
        &mut self,
        issued_new: Option<&IndexSet>,
        revoked_new: Option<&IndexSet>,
    ) -> IndexSet {
        if issued_new.is_none() && revoked_new.is_none() {
            return IndexSet::new();
        }
        let empty = IndexSet::new();
        let issued_new = issued_new.unwrap_or(&empty);
        let revoked_new = revoked_new.unwrap_or(&empty);

        let strategy = self.issuance_type.strategy();
        let result = reconcile(
            &self.revoked,
            revoked_new,
            &self.issued,
            issued_new,
            strategy.uses_revoked_as_primary(),
        );
        trace!(
            "apply_entry >> issuance_type: {}, issued_new: {issued_new}, revoked_new: \
             {revoked_new}, result: {result}",
            self.issuance_type
        );

        match strategy {
            ReconciliationStrategy::RevokedAsPrimary => self.revoked = result.clone(),
            ReconciliationStrategy::IssuedAsPrimary => self.issued = result.clone(),
        }
        result
    }
}
