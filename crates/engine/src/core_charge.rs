//! Core-charge ledger service.

use std::sync::Arc;

use chrono::Utc;

use stockhand_core::{CoreId, CoreTransactionId, EngineError, EngineResult, ItemId};
use stockhand_inventory::{CoreBalances, CoreTransaction, CoreTransactionKind};
use stockhand_store::RemoteStore;

/// Append-only ledger for returnable core parts.
///
/// Balances are always derived by summing the transaction log, never cached
/// as a mutable counter, so the ledger cannot drift from its own log.
#[derive(Clone)]
pub struct CoreChargeLedger {
    store: Arc<dyn RemoteStore>,
}

impl CoreChargeLedger {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Append one charge or return transaction.
    pub async fn record(
        &self,
        item_id: ItemId,
        core_id: CoreId,
        kind: CoreTransactionKind,
        amount: i64,
    ) -> EngineResult<CoreTransaction> {
        if amount <= 0 {
            return Err(EngineError::validation(format!(
                "core transaction amount must be positive, got {amount}"
            )));
        }

        let tx = CoreTransaction {
            id: CoreTransactionId::new(),
            item_id,
            core_id,
            kind,
            amount,
            recorded_at: Utc::now(),
        };
        self.store
            .insert_core_transaction(tx.clone())
            .await
            .map_err(|e| e.into_write_error())?;

        tracing::info!(item_id = %item_id, ?kind, amount, "core transaction recorded");
        Ok(tx)
    }

    /// Running balances for one item, derived from its transaction log.
    pub async fn balances(&self, item_id: ItemId) -> EngineResult<CoreBalances> {
        let log = self
            .store
            .list_core_transactions(item_id)
            .await
            .map_err(|e| e.into_read_error())?;
        Ok(CoreBalances::from_transactions(&log))
    }

    /// The item's transaction log, in insertion order.
    pub async fn transactions(&self, item_id: ItemId) -> EngineResult<Vec<CoreTransaction>> {
        self.store
            .list_core_transactions(item_id)
            .await
            .map_err(|e| e.into_read_error())
    }
}
