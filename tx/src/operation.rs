//! Ledger operations and contract call arguments.

use serde::{Deserialize, Serialize};
use tanda_types::{Address, ObjectId};

/// Handle to an output of an earlier operation in the same intent.
///
/// `op` is the index of the producing operation; `index` selects among its
/// outputs (a split with three amounts produces outputs 0..3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpResult {
    pub op: u16,
    pub index: u16,
}

/// An argument to a contract call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// An owned or shared ledger object, referenced by id and pinned to a
    /// concrete version at build time.
    Object(ObjectId),
    /// An output of an earlier operation (e.g. a freshly split coin).
    Result(OpResult),
    /// A plain value, encoded to bytes.
    Pure(Vec<u8>),
}

impl CallArg {
    /// A pure UTF-8 string argument (length-prefixed by serde).
    pub fn pure_string(s: &str) -> Self {
        Self::Pure(s.as_bytes().to_vec())
    }

    /// A pure u64 argument, little-endian.
    pub fn pure_u64(v: u64) -> Self {
        Self::Pure(v.to_le_bytes().to_vec())
    }
}

/// One ledger operation inside a transaction intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Merge `sources` into `target`, leaving a single coin object holding
    /// the combined balance.
    MergeCoins {
        target: ObjectId,
        sources: Vec<ObjectId>,
    },
    /// Split `amounts` off `coin`, producing one new coin output per amount.
    SplitCoin { coin: ObjectId, amounts: Vec<u64> },
    /// Call a contract entry point.
    MoveCall {
        package: Address,
        module: String,
        function: String,
        args: Vec<CallArg>,
    },
}

impl Operation {
    /// Number of outputs this operation produces.
    pub fn output_count(&self) -> u16 {
        match self {
            Self::SplitCoin { amounts, .. } => amounts.len() as u16,
            Self::MergeCoins { .. } | Self::MoveCall { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_output_count_tracks_amounts() {
        let op = Operation::SplitCoin {
            coin: ObjectId::new([1; 32]),
            amounts: vec![5, 10],
        };
        assert_eq!(op.output_count(), 2);
    }

    #[test]
    fn merge_produces_no_outputs() {
        let op = Operation::MergeCoins {
            target: ObjectId::new([1; 32]),
            sources: vec![ObjectId::new([2; 32])],
        };
        assert_eq!(op.output_count(), 0);
    }

    #[test]
    fn pure_u64_is_little_endian() {
        let CallArg::Pure(bytes) = CallArg::pure_u64(1) else {
            panic!("expected pure arg");
        };
        assert_eq!(bytes, vec![1, 0, 0, 0, 0, 0, 0, 0]);
    }
}
