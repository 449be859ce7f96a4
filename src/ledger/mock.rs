//! In-memory scripted ledger for tests.
//!
//! Mirrors the contract's observable behavior: products live in a map,
//! writes flow through the same encode→sign→submit pipeline the real
//! client uses (the "signed" payload is the encoded call, which `submit`
//! applies to the map), reads of unregistered ids revert. Call counters
//! let tests assert which reads hit the network.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use super::{
    ContractCall, LedgerClient, LedgerError, LedgerResult, Receipt, SignedTransaction,
    TransactionRequest,
};
use crate::models::RawProduct;

#[derive(Default)]
pub struct MockLedger {
    products: RwLock<HashMap<String, RawProduct>>,
    ids: RwLock<Vec<String>>,
    pub get_product_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
    pub submits: AtomicUsize,
    pub gas_estimate: AtomicU64,
    pub last_tx: RwLock<Option<TransactionRequest>>,
    fail_reads: AtomicUsize,
    nonce: AtomicU64,
}

impl MockLedger {
    pub fn new() -> Self {
        let mock = Self::default();
        mock.gas_estimate.store(100_000, Ordering::SeqCst);
        mock
    }

    pub fn seed(&self, raw: RawProduct) {
        let mut ids = self.ids.write().unwrap();
        if !ids.contains(&raw.id) {
            ids.push(raw.id.clone());
        }
        self.products.write().unwrap().insert(raw.id.clone(), raw);
    }

    /// Make the next `n` read calls fail with a transport error.
    pub fn fail_next_reads(&self, n: usize) {
        self.fail_reads.store(n, Ordering::SeqCst);
    }

    pub fn product(&self, id: &str) -> Option<RawProduct> {
        self.products.read().unwrap().get(id).cloned()
    }

    pub fn sample(id: &str) -> RawProduct {
        RawProduct {
            id: id.to_string(),
            name: "Box".to_string(),
            sku: format!("SKU-{}", id),
            batch_no: "B001".to_string(),
            expiry_date: "2025-12-01".to_string(),
            origin: "Nairobi".to_string(),
            location: "Nairobi".to_string(),
            sold: false,
            sale_date: String::new(),
            uid: format!("UID-{}", id),
            price: 0,
            category: "Electronics".to_string(),
            quantity_in_stock: 5,
            status: 0,
            icon: "BookReader".to_string(),
        }
    }

    fn take_read_failure(&self) -> Option<LedgerError> {
        let remaining = self.fail_reads.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_reads.store(remaining - 1, Ordering::SeqCst);
            Some(LedgerError::Rpc("simulated network failure".to_string()))
        } else {
            None
        }
    }

    fn apply(&self, method: &str, args: &[Value]) -> LedgerResult<()> {
        let str_arg = |i: usize| -> String {
            args.get(i).and_then(Value::as_str).unwrap_or_default().to_string()
        };
        let uint_arg = |i: usize| -> u64 { args.get(i).and_then(Value::as_u64).unwrap_or_default() };

        match method {
            "registerProduct" => {
                self.seed(RawProduct {
                    id: str_arg(0),
                    name: str_arg(1),
                    sku: str_arg(2),
                    batch_no: str_arg(3),
                    expiry_date: str_arg(4),
                    origin: str_arg(5),
                    location: str_arg(6),
                    sold: false,
                    sale_date: String::new(),
                    uid: str_arg(7),
                    price: 0,
                    category: str_arg(8),
                    quantity_in_stock: uint_arg(9) as u32,
                    status: uint_arg(10),
                    icon: str_arg(11),
                });
                Ok(())
            }
            "updateLocation" => {
                let id = str_arg(0);
                let mut products = self.products.write().unwrap();
                let product = products
                    .get_mut(&id)
                    .ok_or_else(|| LedgerError::Execution("Product does not exist".to_string()))?;
                product.location = str_arg(1);
                product.price = uint_arg(2);
                product.status = uint_arg(3);
                Ok(())
            }
            "logSale" => {
                let id = str_arg(0);
                let mut products = self.products.write().unwrap();
                let product = products
                    .get_mut(&id)
                    .ok_or_else(|| LedgerError::Execution("Product does not exist".to_string()))?;
                product.sold = true;
                product.sale_date = str_arg(1);
                product.price = uint_arg(2);
                product.status = 2;
                Ok(())
            }
            "deleteProduct" => {
                let id = str_arg(0);
                self.products.write().unwrap().remove(&id);
                self.ids.write().unwrap().retain(|existing| existing != &id);
                Ok(())
            }
            other => Err(LedgerError::Execution(format!("Unknown method: {}", other))),
        }
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    fn account(&self) -> &str {
        "0xmock-account"
    }

    async fn get_product(&self, id: &str) -> LedgerResult<RawProduct> {
        self.get_product_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_read_failure() {
            return Err(err);
        }
        self.products
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::Execution(format!("Product does not exist: {}", id)))
    }

    async fn get_product_count(&self) -> LedgerResult<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_read_failure() {
            return Err(err);
        }
        Ok(self.ids.read().unwrap().len() as u64)
    }

    async fn get_product_ids(&self, offset: u64, count: u64) -> LedgerResult<Vec<String>> {
        if let Some(err) = self.take_read_failure() {
            return Err(err);
        }
        let ids = self.ids.read().unwrap();
        Ok(ids
            .iter()
            .skip(offset as usize)
            .take(count as usize)
            .cloned()
            .collect())
    }

    async fn pending_nonce(&self) -> LedgerResult<u64> {
        Ok(self.nonce.fetch_add(1, Ordering::SeqCst))
    }

    async fn estimate_gas(&self, _call: &ContractCall) -> LedgerResult<u64> {
        Ok(self.gas_estimate.load(Ordering::SeqCst))
    }

    fn encode_call(&self, call: &ContractCall) -> String {
        json!({ "method": call.method(), "args": call.args() }).to_string()
    }

    async fn gas_price(&self) -> LedgerResult<u128> {
        Ok(1_000_000_000)
    }

    async fn sign_transaction(&self, tx: &TransactionRequest) -> LedgerResult<SignedTransaction> {
        *self.last_tx.write().unwrap() = Some(tx.clone());
        Ok(SignedTransaction {
            raw: tx.data.clone(),
        })
    }

    async fn submit(&self, tx: &SignedTransaction) -> LedgerResult<Receipt> {
        let call: Value = serde_json::from_str(&tx.raw)
            .map_err(|_| LedgerError::Execution("Malformed transaction payload".to_string()))?;
        let method = call.get("method").and_then(Value::as_str).unwrap_or_default();
        let args = call
            .get("args")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        self.apply(method, &args)?;
        let n = self.submits.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Receipt {
            transaction_hash: format!("0xmockhash{:04}", n),
        })
    }

    async fn contract_owner(&self) -> LedgerResult<String> {
        Ok("0xmock-account".to_string())
    }

    async fn account_balance(&self) -> LedgerResult<u128> {
        Ok(1_000_000_000_000_000_000)
    }
}
