use indy_vdr::{
    common::error::{VdrError, VdrErrorKind},
    utils::ValidationError,
};

use crate::errors::error::RevRegLedgerError;

impl From<VdrError> for RevRegLedgerError {
    fn from(err: VdrError) -> Self {
        match err.kind() {
            VdrErrorKind::Config => Self::InvalidConfiguration(err.to_string()),
            VdrErrorKind::Input => Self::InvalidInput(err.to_string()),
            VdrErrorKind::Connection
            | VdrErrorKind::FileSystem
            | VdrErrorKind::Resource
            | VdrErrorKind::Unavailable
            | VdrErrorKind::Unexpected
            | VdrErrorKind::Incompatible
            | VdrErrorKind::PoolNoConsensus
            | VdrErrorKind::Resolver
            | VdrErrorKind::PoolTimeout
            | VdrErrorKind::PoolRequestFailed(_) => Self::LedgerSubmissionFailed(err.to_string()),
        }
    }
}

impl From<ValidationError> for RevRegLedgerError {
    fn from(err: ValidationError) -> Self {
        RevRegLedgerError::InvalidInput(err.to_string())
    }
}
