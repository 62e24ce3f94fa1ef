//! Coin amount type.
//!
//! Amounts are fixed-point integers in the coin's smallest unit (u64, matching
//! the ledger's per-object balance width) to avoid floating-point errors.
//! The deposit coin has 6 decimals: 1 USDC = 1_000_000 units.

use crate::params::USDC_DECIMALS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of a fungible coin, in smallest units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoinAmount(u64);

impl CoinAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(units: u64) -> Self {
        Self(units)
    }

    /// Whole USDC to smallest units.
    pub fn from_usdc(usdc: u64) -> Self {
        Self(usdc * USDC_DECIMALS)
    }

    pub fn units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Format as a decimal USDC string with two fractional digits,
    /// e.g. `100_500_000` units -> `"100.50"`.
    pub fn format_usdc(&self) -> String {
        let whole = self.0 / USDC_DECIMALS;
        let cents = (self.0 % USDC_DECIMALS) / (USDC_DECIMALS / 100);
        format!("{}.{:02}", whole, cents)
    }
}

impl fmt::Display for CoinAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_usdc_scales() {
        assert_eq!(CoinAmount::from_usdc(10).units(), 10_000_000);
    }

    #[test]
    fn format_whole() {
        assert_eq!(CoinAmount::from_usdc(100).format_usdc(), "100.00");
    }

    #[test]
    fn format_fractional() {
        assert_eq!(CoinAmount::new(100_500_000).format_usdc(), "100.50");
        assert_eq!(CoinAmount::new(1_059_999).format_usdc(), "1.05");
    }

    #[test]
    fn format_sub_cent_truncates() {
        assert_eq!(CoinAmount::new(9_999).format_usdc(), "0.00");
    }

    #[test]
    fn checked_sub_underflow() {
        assert!(CoinAmount::new(1).checked_sub(CoinAmount::new(2)).is_none());
    }

    #[test]
    fn checked_add_overflow() {
        let max = CoinAmount::new(u64::MAX);
        assert!(max.checked_add(CoinAmount::new(1)).is_none());
    }

    proptest! {
        #[test]
        fn checked_add_sub_roundtrip(a in any::<u64>(), b in any::<u64>()) {
            let x = CoinAmount::new(a);
            let y = CoinAmount::new(b);
            if let Some(sum) = x.checked_add(y) {
                prop_assert_eq!(sum.checked_sub(y), Some(x));
            } else {
                prop_assert!(a as u128 + b as u128 > u64::MAX as u128);
            }
        }
    }
}
