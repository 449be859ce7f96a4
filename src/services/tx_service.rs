//! Transaction assembly and submission.
//!
//! Every ledger-mutating operation flows through [`TxSubmitter::submit`],
//! which performs the full nonce→estimate→encode→price→sign→submit
//! sequence under a process-wide lock. The nonce is account-scoped, not
//! product-scoped, so two in-flight writes must not interleave their
//! assembly steps regardless of which product they target.
//!
//! Failure at any step aborts the whole operation with the underlying
//! error; nothing is retried on this path (a resubmitted signed
//! transaction risks double execution or a nonce conflict) and the cache
//! is only touched by callers after a receipt is in hand.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::ledger::{ContractCall, LedgerClient, LedgerResult, Receipt, TransactionRequest};

/// Hard ceiling on the gas limit, guarding against runaway estimates.
pub const GAS_CEILING: u64 = 500_000;

/// Headroom applied to the node's estimate: limit = estimate * 1.2.
fn gas_limit(estimate: u64) -> u64 {
    (estimate + estimate / 5).min(GAS_CEILING)
}

pub struct TxSubmitter {
    ledger: Arc<dyn LedgerClient>,
    submit_lock: Mutex<()>,
}

impl TxSubmitter {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            ledger,
            submit_lock: Mutex::new(()),
        }
    }

    pub async fn submit(&self, call: ContractCall) -> LedgerResult<Receipt> {
        let _guard = self.submit_lock.lock().await;

        let nonce = self.ledger.pending_nonce().await?;
        let estimate = self.ledger.estimate_gas(&call).await?;
        let data = self.ledger.encode_call(&call);
        let gas_price = self.ledger.gas_price().await?;

        let tx = TransactionRequest {
            nonce,
            gas: gas_limit(estimate),
            gas_price,
            data,
        };

        let signed = self.ledger.sign_transaction(&tx).await?;
        let receipt = self.ledger.submit(&signed).await?;

        tracing::info!(
            "Submitted {} for product {}: {}",
            call.method(),
            call.product_id(),
            receipt.transaction_hash
        );
        Ok(receipt)
    }
}
