//! Coin selection for exact-amount deposits.
//!
//! Deposits must be split from a single coin object, so when no one coin
//! covers the amount the wallet merges others into the largest first.
//! Selection picks the largest coin as primary and adds further coins
//! largest-first until the target is covered, keeping the merge set small.
//! Results are computed fresh from a live balance query per user action and
//! never persisted.

use crate::error::WalletError;
use crate::ledger::LedgerClient;
use tanda_types::{Address, ObjectRef};
use tracing::debug;

/// One fungible coin object owned by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoinObject {
    pub object_ref: ObjectRef,
    pub balance: u64,
}

/// The outcome of a successful selection: a primary coin, the coins to merge
/// into it (possibly empty), and the total balance observed across all coins
/// of the queried type.
#[derive(Clone, Debug)]
pub struct CoinSelection {
    pub primary: CoinObject,
    pub merge: Vec<CoinObject>,
    pub total_balance: u128,
}

/// Select coins covering `target` from an enumerated list.
///
/// Returns [`WalletError::InsufficientBalance`] carrying the observed total
/// when no combination can meet the target, so the caller can render a
/// precise shortfall message.
pub fn pick_coins(coins: &[CoinObject], target: u64) -> Result<CoinSelection, WalletError> {
    let total_balance: u128 = coins.iter().map(|c| c.balance as u128).sum();
    if coins.is_empty() || total_balance < target as u128 {
        return Err(WalletError::InsufficientBalance {
            needed: target,
            available: total_balance,
        });
    }

    // Largest-first, with the object id as a deterministic tiebreak.
    let mut sorted: Vec<&CoinObject> = coins.iter().collect();
    sorted.sort_by(|a, b| {
        b.balance
            .cmp(&a.balance)
            .then_with(|| a.object_ref.id.cmp(&b.object_ref.id))
    });

    let mut picked: Vec<CoinObject> = Vec::new();
    let mut covered: u128 = 0;
    for coin in sorted {
        picked.push(coin.clone());
        covered += coin.balance as u128;
        if covered >= target as u128 {
            break;
        }
    }

    let primary = picked.remove(0);
    Ok(CoinSelection {
        primary,
        merge: picked,
        total_balance,
    })
}

/// Enumerate the user's coins of `coin_type` from the ledger and select a
/// covering set for `target`.
pub async fn select_coins(
    ledger: &LedgerClient,
    owner: &Address,
    target: u64,
    coin_type: &str,
) -> Result<CoinSelection, WalletError> {
    let coins = ledger.get_all_coins(owner, coin_type).await?;
    let selection = pick_coins(&coins, target)?;
    debug!(
        owner = %owner,
        target,
        total = selection.total_balance,
        merging = selection.merge.len(),
        "selected coins for deposit"
    );
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tanda_types::ObjectId;

    fn coin(n: u8, balance: u64) -> CoinObject {
        CoinObject {
            object_ref: ObjectRef::new(ObjectId::new([n; 32]), 1, format!("digest-{n}")),
            balance,
        }
    }

    #[test]
    fn single_coin_covers_target() {
        let selection = pick_coins(&[coin(1, 100)], 50).unwrap();
        assert_eq!(selection.primary.balance, 100);
        assert!(selection.merge.is_empty());
        assert_eq!(selection.total_balance, 100);
    }

    #[test]
    fn largest_coin_is_primary() {
        let selection = pick_coins(&[coin(1, 10), coin(2, 80), coin(3, 40)], 70).unwrap();
        assert_eq!(selection.primary.balance, 80);
        assert!(selection.merge.is_empty());
    }

    #[test]
    fn merges_when_no_single_coin_covers() {
        let selection = pick_coins(&[coin(1, 30), coin(2, 50), coin(3, 40)], 100).unwrap();
        assert_eq!(selection.primary.balance, 50);
        // 50 + 40 + 30 = 120 >= 100; all three needed
        assert_eq!(selection.merge.len(), 2);
        assert_eq!(selection.merge[0].balance, 40);
        assert_eq!(selection.merge[1].balance, 30);
    }

    #[test]
    fn stops_merging_once_covered() {
        let selection = pick_coins(&[coin(1, 60), coin(2, 50), coin(3, 5)], 100).unwrap();
        assert_eq!(selection.primary.balance, 60);
        assert_eq!(selection.merge.len(), 1);
        assert_eq!(selection.merge[0].balance, 50);
    }

    #[test]
    fn shortfall_reports_total() {
        let err = pick_coins(&[coin(1, 30), coin(2, 20)], 100).unwrap_err();
        match err {
            WalletError::InsufficientBalance { needed, available } => {
                assert_eq!(needed, 100);
                assert_eq!(available, 50);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_coins_is_a_shortfall_even_for_zero_target() {
        let err = pick_coins(&[], 0).unwrap_err();
        assert!(matches!(
            err,
            WalletError::InsufficientBalance { needed: 0, available: 0 }
        ));
    }

    #[test]
    fn zero_target_with_coins_picks_primary_only() {
        let selection = pick_coins(&[coin(1, 5), coin(2, 10)], 0).unwrap();
        assert_eq!(selection.primary.balance, 10);
        assert!(selection.merge.is_empty());
    }

    #[test]
    fn equal_balances_break_ties_by_id() {
        let s1 = pick_coins(&[coin(2, 10), coin(1, 10)], 5).unwrap();
        let s2 = pick_coins(&[coin(1, 10), coin(2, 10)], 5).unwrap();
        assert_eq!(s1.primary.object_ref.id, s2.primary.object_ref.id);
    }

    proptest! {
        #[test]
        fn selection_always_covers_target(
            balances in prop::collection::vec(1u64..1_000_000, 1..20),
            target in 0u64..500_000,
        ) {
            let coins: Vec<CoinObject> = balances
                .iter()
                .enumerate()
                .map(|(i, b)| coin(i as u8, *b))
                .collect();
            let total: u128 = balances.iter().map(|b| *b as u128).sum();

            match pick_coins(&coins, target) {
                Ok(selection) => {
                    let covered = selection.primary.balance as u128
                        + selection.merge.iter().map(|c| c.balance as u128).sum::<u128>();
                    prop_assert!(covered >= target as u128);
                    prop_assert_eq!(selection.total_balance, total);
                }
                Err(WalletError::InsufficientBalance { available, .. }) => {
                    prop_assert!(total < target as u128);
                    prop_assert_eq!(available, total);
                }
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
            }
        }

        #[test]
        fn every_merged_coin_is_necessary(
            balances in prop::collection::vec(1u64..1_000, 2..10),
            target in 1u64..5_000,
        ) {
            let coins: Vec<CoinObject> = balances
                .iter()
                .enumerate()
                .map(|(i, b)| coin(i as u8, *b))
                .collect();

            if let Ok(selection) = pick_coins(&coins, target) {
                if let Some(last) = selection.merge.last() {
                    let without_last = selection.primary.balance as u128
                        + selection.merge[..selection.merge.len() - 1]
                            .iter()
                            .map(|c| c.balance as u128)
                            .sum::<u128>();
                    prop_assert!(without_last < target as u128, "last merged coin {} was unnecessary", last.balance);
                }
            }
        }
    }
}
