//! Core-charge ledger records and balance derivation.
//!
//! Note: balances are never stored; they are derived by summing the
//! transaction log. A stored balance is a classic source of reconciliation
//! drift this design rules out by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockhand_core::{CoreId, CoreTransactionId, Entity, ItemId};

/// Direction of a core-charge ledger entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreTransactionKind {
    Charge,
    Return,
}

/// One append-only ledger entry for a returnable core part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreTransaction {
    pub id: CoreTransactionId,
    pub item_id: ItemId,
    pub core_id: CoreId,
    pub kind: CoreTransactionKind,
    /// Amount in the smallest currency unit, always > 0.
    pub amount: i64,
    pub recorded_at: DateTime<Utc>,
}

impl Entity for CoreTransaction {
    type Id = CoreTransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Running balances for one item, derived from its transaction log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreBalances {
    pub charged_amount: i64,
    pub returned_amount: i64,
}

impl CoreBalances {
    /// Sum a transaction log into per-kind balances.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a CoreTransaction>) -> Self {
        let mut balances = Self::default();
        for tx in transactions {
            match tx.kind {
                CoreTransactionKind::Charge => balances.charged_amount += tx.amount,
                CoreTransactionKind::Return => balances.returned_amount += tx.amount,
            }
        }
        balances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_tx(kind: CoreTransactionKind, amount: i64) -> CoreTransaction {
        CoreTransaction {
            id: CoreTransactionId::new(),
            item_id: ItemId::new(),
            core_id: CoreId::new(),
            kind,
            amount,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn balances_sum_per_kind() {
        let log = vec![
            test_tx(CoreTransactionKind::Charge, 2500),
            test_tx(CoreTransactionKind::Charge, 1500),
            test_tx(CoreTransactionKind::Return, 2500),
        ];
        let balances = CoreBalances::from_transactions(&log);
        assert_eq!(balances.charged_amount, 4000);
        assert_eq!(balances.returned_amount, 2500);
    }

    proptest! {
        /// Derived balances always equal an independent recomputation over the log.
        #[test]
        fn balances_never_drift_from_the_log(
            amounts in proptest::collection::vec((any::<bool>(), 1i64..100_000), 0..32)
        ) {
            let log: Vec<CoreTransaction> = amounts
                .iter()
                .map(|(charge, amount)| {
                    let kind = if *charge {
                        CoreTransactionKind::Charge
                    } else {
                        CoreTransactionKind::Return
                    };
                    test_tx(kind, *amount)
                })
                .collect();

            let balances = CoreBalances::from_transactions(&log);

            let charged: i64 = log
                .iter()
                .filter(|tx| tx.kind == CoreTransactionKind::Charge)
                .map(|tx| tx.amount)
                .sum();
            let returned: i64 = log
                .iter()
                .filter(|tx| tx.kind == CoreTransactionKind::Return)
                .map(|tx| tx.amount)
                .sum();

            prop_assert_eq!(balances.charged_amount, charged);
            prop_assert_eq!(balances.returned_amount, returned);
        }
    }
}
