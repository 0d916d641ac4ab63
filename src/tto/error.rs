//! TTO error taxonomy (§7). The obfuscation pipeline itself never fails on
//! string input; only input-type validation can raise.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TtoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type TtoResult<T> = Result<T, TtoError>;
