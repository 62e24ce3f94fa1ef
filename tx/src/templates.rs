//! Intent templates for the savings-room contract entry points.
//!
//! Each template composes the same shape the room contract expects: optional
//! merges to gather enough balance into one coin, a split producing the exact
//! deposit amount, and the entry-point call with the shared clock object.
//! The user signs these intents, so the contract sees the user as sender.

use crate::intent::TransactionIntent;
use crate::operation::{CallArg, OpResult};
use tanda_types::params::ROOM_MODULE;
use tanda_types::{Address, ObjectId};

/// Inputs for joining a room.
#[derive(Clone, Debug)]
pub struct JoinRoomParams {
    pub room: ObjectId,
    pub vault: ObjectId,
    pub clock: ObjectId,
    /// The coin the deposit is split from.
    pub primary_coin: ObjectId,
    /// Additional coins merged into the primary first, when no single coin
    /// covers the deposit.
    pub coins_to_merge: Vec<ObjectId>,
    pub deposit_amount: u64,
    /// Room password, required for private rooms.
    pub password: Option<String>,
}

/// Inputs for a periodic deposit into an already-joined room.
#[derive(Clone, Debug)]
pub struct DepositParams {
    pub room: ObjectId,
    pub vault: ObjectId,
    /// The player's position record, created when they joined.
    pub position: ObjectId,
    pub clock: ObjectId,
    pub primary_coin: ObjectId,
    pub coins_to_merge: Vec<ObjectId>,
    pub deposit_amount: u64,
}

/// Inputs for claiming principal plus reward after a room ends.
#[derive(Clone, Debug)]
pub struct ClaimParams {
    pub room: ObjectId,
    pub vault: ObjectId,
    pub position: ObjectId,
    pub clock: ObjectId,
}

/// Inputs for topping up a room's reward pool (admin action).
#[derive(Clone, Debug)]
pub struct FundRewardParams {
    pub vault: ObjectId,
    pub coin: ObjectId,
}

/// Gather-and-split prologue shared by join and deposit.
fn split_exact(
    intent: &mut TransactionIntent,
    primary: ObjectId,
    merge: &[ObjectId],
    amount: u64,
) -> OpResult {
    if !merge.is_empty() {
        intent.merge_coins(primary, merge.to_vec());
    }
    intent.split_coin(primary, vec![amount])
}

/// Build a `join_room` intent.
///
/// Private rooms take the password as a trailing pure argument; the contract
/// verifies it against the stored hash.
pub fn join_room(package: Address, params: &JoinRoomParams) -> TransactionIntent {
    let mut intent = TransactionIntent::new();
    let deposit_coin = split_exact(
        &mut intent,
        params.primary_coin,
        &params.coins_to_merge,
        params.deposit_amount,
    );

    let mut args = vec![
        CallArg::Object(params.room),
        CallArg::Object(params.vault),
        CallArg::Object(params.clock),
        CallArg::Result(deposit_coin),
    ];
    if let Some(password) = &params.password {
        args.push(CallArg::pure_string(password));
    }

    intent.move_call(package, ROOM_MODULE, "join_room", args);
    intent
}

/// Build a `deposit` intent for the current period.
pub fn deposit(package: Address, params: &DepositParams) -> TransactionIntent {
    let mut intent = TransactionIntent::new();
    let deposit_coin = split_exact(
        &mut intent,
        params.primary_coin,
        &params.coins_to_merge,
        params.deposit_amount,
    );

    intent.move_call(
        package,
        ROOM_MODULE,
        "deposit",
        vec![
            CallArg::Object(params.room),
            CallArg::Object(params.vault),
            CallArg::Object(params.position),
            CallArg::Object(params.clock),
            CallArg::Result(deposit_coin),
        ],
    );
    intent
}

/// Build a `claim_all` intent (principal + reward share).
pub fn claim_all(package: Address, params: &ClaimParams) -> TransactionIntent {
    let mut intent = TransactionIntent::new();
    intent.move_call(
        package,
        ROOM_MODULE,
        "claim_all",
        vec![
            CallArg::Object(params.room),
            CallArg::Object(params.vault),
            CallArg::Object(params.position),
            CallArg::Object(params.clock),
        ],
    );
    intent
}

/// Build a `fund_reward` intent: move a whole coin into the vault's reward pool.
pub fn fund_reward(package: Address, params: &FundRewardParams) -> TransactionIntent {
    let mut intent = TransactionIntent::new();
    intent.move_call(
        package,
        ROOM_MODULE,
        "fund_reward",
        vec![
            CallArg::Object(params.vault),
            CallArg::Object(params.coin),
        ],
    );
    intent
}
