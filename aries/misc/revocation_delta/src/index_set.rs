use std::{
    collections::{btree_set, BTreeSet},
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RevocationDeltaError, RevocationDeltaResult};

/// Position of a credential within a revocation registry.
pub type RegistryIndex = u64;

/// Set of registry indices. Enumeration is always in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexSet(BTreeSet<RegistryIndex>);

impl IndexSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses textual indices, as received on a command line. Each token may itself
    /// hold several whitespace separated numbers.
    pub fn parse_tokens<I, S>(tokens: I) -> RevocationDeltaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for token in tokens {
            for value in token.as_ref().split_whitespace() {
                set.insert(parse_index(value)?);
            }
        }
        Ok(set)
    }

    /// Builds a set from a JSON array of numbers, as found in ledger transactions.
    pub fn from_json_values(values: &[Value]) -> RevocationDeltaResult<Self> {
        values
            .iter()
            .map(|value| {
                value.as_u64().ok_or_else(|| {
                    RevocationDeltaError::InvalidInput(format!(
                        "`{value}` is not a non-negative integer index"
                    ))
                })
            })
            .collect()
    }

    /// Like [`IndexSet::from_json_values`], but for an optional field: an absent or null
    /// value is an empty set, anything other than an array is rejected.
    pub fn from_json_field(value: Option<&Value>) -> RevocationDeltaResult<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::new()),
            Some(Value::Array(values)) => Self::from_json_values(values),
            Some(other) => Err(RevocationDeltaError::InvalidInput(format!(
                "expected an array of indices, got `{other}`"
            ))),
        }
    }

    pub fn insert(&mut self, index: RegistryIndex) -> bool {
        self.0.insert(index)
    }

    pub fn contains(&self, index: RegistryIndex) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, RegistryIndex> {
        self.0.iter()
    }

    pub fn difference(&self, other: &IndexSet) -> IndexSet {
        self.0.difference(&other.0).copied().collect()
    }

    pub fn union_with(&mut self, other: &IndexSet) {
        self.0.extend(other.iter().copied());
    }

    pub fn to_vec(&self) -> Vec<RegistryIndex> {
        self.0.iter().copied().collect()
    }
}

fn parse_index(token: &str) -> RevocationDeltaResult<RegistryIndex> {
    token.parse::<RegistryIndex>().map_err(|err| {
        let reason = if token.starts_with('-') && token[1..].parse::<f64>().is_ok() {
            "negative values are not registry indices".to_string()
        } else {
            err.to_string()
        };
        RevocationDeltaError::InvalidInput(format!("invalid index `{token}`: {reason}"))
    })
}

impl FromIterator<RegistryIndex> for IndexSet {
    fn from_iter<T: IntoIterator<Item = RegistryIndex>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[RegistryIndex; N]> for IndexSet {
    fn from(indices: [RegistryIndex; N]) -> Self {
        indices.into_iter().collect()
    }
}

impl IntoIterator for IndexSet {
    type Item = RegistryIndex;
    type IntoIter = btree_set::IntoIter<RegistryIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = &'a RegistryIndex;
    type IntoIter = btree_set::Iter<'a, RegistryIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for IndexSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
