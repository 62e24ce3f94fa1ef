//! Application constants shared across the client.

/// Gas budget attached to every user transaction (0.1 native token).
pub const GAS_BUDGET: u64 = 100_000_000;

/// Smallest units per whole USDC (6 decimals).
pub const USDC_DECIMALS: u64 = 1_000_000;

/// Smallest units per whole native token (9 decimals).
pub const NATIVE_DECIMALS: u64 = 1_000_000_000;

/// Minimum deposit-coin balance required before attempting a transaction.
pub const MIN_BALANCE_USDC: u64 = 1_000_000;

/// Native gas coin type tag.
pub const NATIVE_COIN_TYPE: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000002::tanda::TANDA";

/// Deposit coin type tag (mock USDC on test networks).
pub const USDC_COIN_TYPE: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000002::usdc::USDC";

/// The shared clock object id (fixed across all networks).
pub const CLOCK_OBJECT_ID: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000006";

/// Contract module containing the room entry points.
pub const ROOM_MODULE: &str = "savings_room";

/// Period length in milliseconds (1 week).
pub const PERIOD_LENGTH_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Test-mode period length (1 minute).
pub const PERIOD_LENGTH_MS_TEST: u64 = 60 * 1000;

/// Buffer subtracted from a room's start time so it is immediately joinable
/// despite transaction processing latency.
pub const TX_BUFFER_MS: u64 = 5_000;

/// Characters shown at each end of a truncated address.
pub const ADDRESS_DISPLAY_CHARS: usize = 4;
