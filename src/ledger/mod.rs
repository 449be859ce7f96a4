//! The ledger boundary.
//!
//! The contract state is reachable only through slow, metered RPC calls,
//! so everything behind [`LedgerClient`] is treated as a black box: read
//! calls plus the individual steps of assembling and submitting a signed
//! write transaction. Handlers never talk to this trait directly; reads
//! go through [`RetryPolicy`] and the cache, writes go through the
//! transaction submitter.

mod http;
mod retry;

#[cfg(test)]
pub mod mock;

pub use http::HttpLedgerClient;
pub use retry::RetryPolicy;

use async_trait::async_trait;
use serde_json::{Value, json};
use std::fmt;

use crate::models::RawProduct;

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors crossing the ledger boundary.
///
/// `Rpc` covers transport and node-level failures (timeouts, rate
/// limiting), which are transient and safe to retry on read paths.
/// `Execution` covers definitive outcomes reported by the ledger itself
/// (reverted calls, rejected transactions) and is never retried.
/// Messages are surfaced to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    Rpc(String),
    Execution(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::Rpc(msg) => write!(f, "{}", msg),
            LedgerError::Execution(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for LedgerError {}

impl LedgerError {
    /// The contract reverts reads of unregistered ids with this message.
    /// An absent product is a business outcome, not a fault.
    pub fn is_not_found(&self) -> bool {
        match self {
            LedgerError::Execution(msg) => msg.contains("Product does not exist"),
            LedgerError::Rpc(_) => false,
        }
    }
}

/// One state-mutating contract call, with typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    RegisterProduct {
        id: String,
        name: String,
        sku: String,
        batch_no: String,
        expiry_date: String,
        origin: String,
        location: String,
        uid: String,
        category: String,
        quantity_in_stock: u32,
        status: u64,
        icon: String,
    },
    UpdateLocation {
        id: String,
        location: String,
        price: u64,
        status: u64,
    },
    LogSale {
        id: String,
        sale_date: String,
        price: u64,
    },
    DeleteProduct {
        id: String,
    },
}

impl ContractCall {
    pub fn method(&self) -> &'static str {
        match self {
            ContractCall::RegisterProduct { .. } => "registerProduct",
            ContractCall::UpdateLocation { .. } => "updateLocation",
            ContractCall::LogSale { .. } => "logSale",
            ContractCall::DeleteProduct { .. } => "deleteProduct",
        }
    }

    /// Arguments in the contract's positional order.
    pub fn args(&self) -> Vec<Value> {
        match self {
            ContractCall::RegisterProduct {
                id,
                name,
                sku,
                batch_no,
                expiry_date,
                origin,
                location,
                uid,
                category,
                quantity_in_stock,
                status,
                icon,
            } => vec![
                json!(id),
                json!(name),
                json!(sku),
                json!(batch_no),
                json!(expiry_date),
                json!(origin),
                json!(location),
                json!(uid),
                json!(category),
                json!(quantity_in_stock),
                json!(status),
                json!(icon),
            ],
            ContractCall::UpdateLocation {
                id,
                location,
                price,
                status,
            } => vec![json!(id), json!(location), json!(price), json!(status)],
            ContractCall::LogSale {
                id,
                sale_date,
                price,
            } => vec![json!(id), json!(sale_date), json!(price)],
            ContractCall::DeleteProduct { id } => vec![json!(id)],
        }
    }

    /// The product id the call targets, for cache invalidation.
    pub fn product_id(&self) -> &str {
        match self {
            ContractCall::RegisterProduct { id, .. } => id,
            ContractCall::UpdateLocation { id, .. } => id,
            ContractCall::LogSale { id, .. } => id,
            ContractCall::DeleteProduct { id } => id,
        }
    }
}

/// Unsigned transaction envelope. The client fills in the destination
/// and account; this layer owns nonce, gas and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub nonce: u64,
    pub gas: u64,
    pub gas_price: u128,
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub raw: String,
}

/// Commit confirmation for a submitted transaction.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub transaction_hash: String,
}

/// Black-box RPC boundary to the inventory contract.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// The address of the signing account.
    fn account(&self) -> &str;

    // Read calls. Idempotent; the only calls the retry policy may wrap.
    async fn get_product(&self, id: &str) -> LedgerResult<RawProduct>;
    async fn get_product_count(&self) -> LedgerResult<u64>;
    async fn get_product_ids(&self, offset: u64, count: u64) -> LedgerResult<Vec<String>>;

    // Write plumbing, in the order the submitter drives it.
    async fn pending_nonce(&self) -> LedgerResult<u64>;
    async fn estimate_gas(&self, call: &ContractCall) -> LedgerResult<u64>;
    fn encode_call(&self, call: &ContractCall) -> String;
    async fn gas_price(&self) -> LedgerResult<u128>;
    async fn sign_transaction(&self, tx: &TransactionRequest) -> LedgerResult<SignedTransaction>;
    async fn submit(&self, tx: &SignedTransaction) -> LedgerResult<Receipt>;

    // Startup diagnostics.
    async fn contract_owner(&self) -> LedgerResult<String>;
    async fn account_balance(&self) -> LedgerResult<u128>;
}
