//! JSON-RPC implementation of the ledger boundary.
//!
//! Talks to a signer-capable gateway endpoint: contract reads go through
//! `ledger_call`, transaction assembly uses the `ledger_*` account and
//! gas methods, and signing is delegated to the endpoint with the
//! credential imported at startup. Transport failures map to
//! [`LedgerError::Rpc`]; errors reported by the node itself map to
//! [`LedgerError::Execution`].

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{
    ContractCall, LedgerClient, LedgerError, LedgerResult, Receipt, SignedTransaction,
    TransactionRequest,
};
use crate::config::LedgerConfig;
use crate::models::RawProduct;

pub struct HttpLedgerClient {
    http: reqwest::Client,
    rpc_url: String,
    contract_address: String,
    account: String,
}

impl HttpLedgerClient {
    /// Import the signing credential into the endpoint's signer and
    /// resolve the account address it controls.
    pub async fn connect(config: &LedgerConfig) -> LedgerResult<Self> {
        let client = Self {
            http: reqwest::Client::new(),
            rpc_url: config.rpc_url.clone(),
            contract_address: config.contract_address.clone(),
            account: String::new(),
        };

        let result = client
            .rpc("ledger_importAccount", json!([config.private_key]))
            .await?;
        let account = result
            .as_str()
            .ok_or_else(|| LedgerError::Rpc("importAccount did not return an address".to_string()))?
            .to_string();

        Ok(Self { account, ..client })
    }

    async fn rpc(&self, method: &str, params: Value) -> LedgerResult<Value> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LedgerError::Rpc(format!("RPC request failed: {}", e)))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::Rpc(format!("Invalid RPC response: {}", e)))?;

        if let Some(error) = body.get("error") {
            let message = error
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown RPC error");
            return Err(LedgerError::Execution(message.to_string()));
        }

        body.get("result")
            .cloned()
            .ok_or_else(|| LedgerError::Rpc("RPC response missing result".to_string()))
    }

    async fn call_contract(&self, method: &str, args: Vec<Value>) -> LedgerResult<Value> {
        self.rpc(
            "ledger_call",
            json!([{
                "to": self.contract_address,
                "method": method,
                "args": args,
            }]),
        )
        .await
    }
}

fn uint_result(value: &Value, what: &str) -> LedgerResult<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
    .ok_or_else(|| LedgerError::Rpc(format!("{} is not an unsigned integer", what)))
}

fn u128_result(value: &Value, what: &str) -> LedgerResult<u128> {
    match value {
        Value::Number(n) => n.as_u64().map(u128::from),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
    .ok_or_else(|| LedgerError::Rpc(format!("{} is not an unsigned integer", what)))
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    fn account(&self) -> &str {
        &self.account
    }

    async fn get_product(&self, id: &str) -> LedgerResult<RawProduct> {
        let result = self.call_contract("getProduct", vec![json!(id)]).await?;
        let values = result
            .as_array()
            .ok_or_else(|| LedgerError::Rpc("getProduct did not return a tuple".to_string()))?;
        RawProduct::from_values(values)
    }

    async fn get_product_count(&self) -> LedgerResult<u64> {
        let result = self.call_contract("getProductCount", vec![]).await?;
        uint_result(&result, "getProductCount result")
    }

    async fn get_product_ids(&self, offset: u64, count: u64) -> LedgerResult<Vec<String>> {
        let result = self
            .call_contract("getProductIds", vec![json!(offset), json!(count)])
            .await?;
        result
            .as_array()
            .ok_or_else(|| LedgerError::Rpc("getProductIds did not return an array".to_string()))?
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| LedgerError::Rpc("Product id is not a string".to_string()))
            })
            .collect()
    }

    async fn pending_nonce(&self) -> LedgerResult<u64> {
        let result = self
            .rpc("ledger_nonce", json!([self.account, "pending"]))
            .await?;
        uint_result(&result, "nonce")
    }

    async fn estimate_gas(&self, call: &ContractCall) -> LedgerResult<u64> {
        let result = self
            .rpc(
                "ledger_estimateGas",
                json!([{
                    "from": self.account,
                    "data": self.encode_call(call),
                }]),
            )
            .await?;
        uint_result(&result, "gas estimate")
    }

    fn encode_call(&self, call: &ContractCall) -> String {
        json!({
            "to": self.contract_address,
            "method": call.method(),
            "args": call.args(),
        })
        .to_string()
    }

    async fn gas_price(&self) -> LedgerResult<u128> {
        let result = self.rpc("ledger_gasPrice", json!([])).await?;
        u128_result(&result, "gas price")
    }

    async fn sign_transaction(&self, tx: &TransactionRequest) -> LedgerResult<SignedTransaction> {
        let result = self
            .rpc(
                "ledger_signTransaction",
                json!([self.account, {
                    "nonce": tx.nonce,
                    "gas": tx.gas,
                    "gasPrice": tx.gas_price.to_string(),
                    "data": tx.data,
                }]),
            )
            .await?;
        let raw = result
            .get("raw")
            .and_then(|v| v.as_str())
            .ok_or_else(|| LedgerError::Rpc("signTransaction did not return raw bytes".to_string()))?
            .to_string();
        Ok(SignedTransaction { raw })
    }

    async fn submit(&self, tx: &SignedTransaction) -> LedgerResult<Receipt> {
        let result = self
            .rpc("ledger_submitTransaction", json!([tx.raw]))
            .await?;
        let transaction_hash = result
            .get("transactionHash")
            .and_then(|v| v.as_str())
            .ok_or_else(|| LedgerError::Rpc("Receipt missing transactionHash".to_string()))?
            .to_string();
        Ok(Receipt { transaction_hash })
    }

    async fn contract_owner(&self) -> LedgerResult<String> {
        let result = self.call_contract("owner", vec![]).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LedgerError::Rpc("owner did not return an address".to_string()))
    }

    async fn account_balance(&self) -> LedgerResult<u128> {
        let result = self.rpc("ledger_balance", json!([self.account])).await?;
        u128_result(&result, "balance")
    }
}
