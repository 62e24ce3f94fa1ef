//! The transaction intent: operations plus sender/gas metadata, serializable
//! to a signable byte payload.

use crate::error::TxError;
use crate::operation::{CallArg, OpResult, Operation};
use crate::resolver::ObjectResolver;
use crate::validation::validate_intent;
use serde::{Deserialize, Serialize};
use tanda_types::params::GAS_BUDGET;
use tanda_types::{Address, ObjectId, ObjectRef};

/// A draft transaction: an ordered operation list and its envelope metadata.
///
/// The gas owner is only set for sponsored transactions; when absent, the
/// sender pays its own fees (external-wallet mode).
#[derive(Clone, Debug, Default)]
pub struct TransactionIntent {
    operations: Vec<Operation>,
    sender: Option<Address>,
    gas_owner: Option<Address>,
    gas_budget: Option<u64>,
}

/// The fully-resolved form that is serialized and signed.
///
/// `object_refs` pins every object touched by the operations to the exact
/// `(id, version, digest)` observed at build time, so the signature commits
/// to the object state the user saw.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionData {
    pub sender: Address,
    pub gas_owner: Option<Address>,
    pub gas_budget: u64,
    pub object_refs: Vec<ObjectRef>,
    pub operations: Vec<Operation>,
}

impl TransactionIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a merge of `sources` into `target`.
    pub fn merge_coins(&mut self, target: ObjectId, sources: Vec<ObjectId>) {
        self.operations.push(Operation::MergeCoins { target, sources });
    }

    /// Append a split and return a handle to its first output coin.
    pub fn split_coin(&mut self, coin: ObjectId, amounts: Vec<u64>) -> OpResult {
        let op = self.operations.len() as u16;
        self.operations.push(Operation::SplitCoin { coin, amounts });
        OpResult { op, index: 0 }
    }

    /// Append a contract call.
    pub fn move_call(
        &mut self,
        package: Address,
        module: impl Into<String>,
        function: impl Into<String>,
        args: Vec<CallArg>,
    ) {
        self.operations.push(Operation::MoveCall {
            package,
            module: module.into(),
            function: function.into(),
            args,
        });
    }

    pub fn set_sender(&mut self, sender: Address) {
        self.sender = Some(sender);
    }

    pub fn set_gas_owner(&mut self, gas_owner: Address) {
        self.gas_owner = Some(gas_owner);
    }

    pub fn set_gas_budget(&mut self, budget: u64) {
        self.gas_budget = Some(budget);
    }

    pub fn sender(&self) -> Option<&Address> {
        self.sender.as_ref()
    }

    pub fn gas_owner(&self) -> Option<&Address> {
        self.gas_owner.as_ref()
    }

    pub fn gas_budget(&self) -> u64 {
        self.gas_budget.unwrap_or(GAS_BUDGET)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Every object id referenced by the operations, in first-use order,
    /// deduplicated.
    pub fn referenced_objects(&self) -> Vec<ObjectId> {
        let mut seen = Vec::new();
        let mut push = |id: &ObjectId, seen: &mut Vec<ObjectId>| {
            if !seen.contains(id) {
                seen.push(*id);
            }
        };
        for op in &self.operations {
            match op {
                Operation::MergeCoins { target, sources } => {
                    push(target, &mut seen);
                    for s in sources {
                        push(s, &mut seen);
                    }
                }
                Operation::SplitCoin { coin, .. } => push(coin, &mut seen),
                Operation::MoveCall { args, .. } => {
                    for arg in args {
                        if let CallArg::Object(id) = arg {
                            push(id, &mut seen);
                        }
                    }
                }
            }
        }
        seen
    }

    /// Validate the intent, resolve every referenced object against live
    /// ledger state, and serialize to the signable byte payload.
    ///
    /// The returned bytes are final: they must be signed and transmitted
    /// as-is, never mutated. Building twice against unchanged object state
    /// yields identical bytes.
    pub async fn build<R: ObjectResolver>(&self, resolver: &R) -> Result<Vec<u8>, TxError> {
        validate_intent(self)?;
        let sender = self.sender.ok_or(TxError::MissingSender)?;

        let mut object_refs = Vec::new();
        for id in self.referenced_objects() {
            object_refs.push(resolver.resolve(&id).await?);
        }

        let data = TransactionData {
            sender,
            gas_owner: self.gas_owner,
            gas_budget: self.gas_budget(),
            object_refs,
            operations: self.operations.clone(),
        };

        bincode::serialize(&data).map_err(|e| TxError::Serialize(e.to_string()))
    }
}
