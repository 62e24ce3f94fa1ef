//! Structural validation of transaction intents, run before resolution.

use crate::error::TxError;
use crate::intent::TransactionIntent;
use crate::operation::{CallArg, Operation};

/// Check an intent for structural problems that would produce an
/// unexecutable transaction.
pub fn validate_intent(intent: &TransactionIntent) -> Result<(), TxError> {
    let ops = intent.operations();
    if ops.is_empty() {
        return Err(TxError::Empty);
    }

    for (i, op) in ops.iter().enumerate() {
        match op {
            Operation::MergeCoins { sources, .. } => {
                if sources.is_empty() {
                    return Err(TxError::EmptyMergeSources);
                }
            }
            Operation::SplitCoin { amounts, .. } => {
                if amounts.is_empty() || amounts.contains(&0) {
                    return Err(TxError::InvalidSplitAmounts);
                }
            }
            Operation::MoveCall {
                module,
                function,
                args,
                ..
            } => {
                if module.is_empty() || function.is_empty() {
                    return Err(TxError::InvalidCallTarget(format!(
                        "module '{}', function '{}'",
                        module, function
                    )));
                }
                for arg in args {
                    if let CallArg::Result(r) = arg {
                        let valid = (r.op as usize) < i
                            && r.index < ops[r.op as usize].output_count();
                        if !valid {
                            return Err(TxError::InvalidResultRef {
                                op: r.op,
                                index: r.index,
                            });
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
