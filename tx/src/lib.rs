//! Transaction intent building and serialization.
//!
//! A [`TransactionIntent`] is an ordered list of ledger operations (merge
//! coins, split an exact amount, call a contract entry point) plus sender and
//! gas metadata. Intents are built fresh per user action, resolved against
//! live object state, serialized to bytes exactly once, and never mutated
//! after signing.

pub mod error;
pub mod intent;
pub mod operation;
pub mod resolver;
pub mod templates;
pub mod validation;

pub use error::TxError;
pub use intent::{TransactionData, TransactionIntent};
pub use operation::{CallArg, OpResult, Operation};
pub use resolver::{ObjectResolver, StaticResolver};
