//! Error type for transaction building.

use tanda_types::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("transaction has no operations")]
    Empty,

    #[error("transaction sender is not set")]
    MissingSender,

    #[error("split amounts must be non-empty and non-zero")]
    InvalidSplitAmounts,

    #[error("merge requires at least one source coin")]
    EmptyMergeSources,

    #[error("invalid call target: {0}")]
    InvalidCallTarget(String),

    #[error("argument references result {index} of operation {op}, which does not exist")]
    InvalidResultRef { op: u16, index: u16 },

    #[error("unknown object: {0}")]
    UnknownObject(ObjectId),

    #[error("object resolution failed: {0}")]
    Resolve(String),

    #[error("serialization failed: {0}")]
    Serialize(String),
}
