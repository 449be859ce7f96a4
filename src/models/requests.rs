use serde::{Deserialize, Serialize};

/// UI registration body. Presence is validated in the handler so a
/// missing field answers the structured `Missing required fields` error
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub batch_no: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub category: String,
    pub quantity_in_stock: Option<u32>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub location: String,
    pub price: Option<u64>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSaleRequest {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub sale_date: String,
    pub price: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub id: String,
}

/// Query string carried by scanner-originated GET requests.
#[derive(Debug, Deserialize)]
pub struct TagQuery {
    pub tagid: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResponse {
    pub success: bool,
    pub transaction_hash: String,
}

impl TxResponse {
    pub fn new(transaction_hash: String) -> Self {
        Self {
            success: true,
            transaction_hash,
        }
    }
}
