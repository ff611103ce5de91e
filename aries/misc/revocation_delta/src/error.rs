use thiserror::Error as ThisError;

pub type RevocationDeltaResult<T> = Result<T, RevocationDeltaError>;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum RevocationDeltaError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
