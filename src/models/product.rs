use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::ledger::LedgerError;

/// The closed category set understood by the inventory contract. Tag
/// payloads carrying anything else are folded into `Others`.
pub const CATEGORIES: [&str; 10] = [
    "Electronics",
    "Medical",
    "Clothing",
    "Books",
    "Toys",
    "Beauty",
    "Sports",
    "Home Decor",
    "Home Appliances",
    "Others",
];

pub const DEFAULT_CATEGORY: &str = "Others";

/// Lifecycle status of a product on the ledger.
///
/// Encoding is strict: only the three recognized strings are accepted,
/// case-insensitively. Decoding is lenient: the ledger is the source of
/// truth, so an out-of-range value decodes to `"unknown"` instead of
/// failing the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    EnRoute,
    Arrived,
    Sold,
}

impl Status {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "en route" => Ok(Status::EnRoute),
            "arrived" => Ok(Status::Arrived),
            "sold" => Ok(Status::Sold),
            _ => Err(AppError::BadRequest(format!("Invalid status: {}", s))),
        }
    }

    pub fn encode(self) -> u64 {
        match self {
            Status::EnRoute => 0,
            Status::Arrived => 1,
            Status::Sold => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::EnRoute => "en route",
            Status::Arrived => "arrived",
            Status::Sold => "sold",
        }
    }

    pub fn decode(value: u64) -> &'static str {
        match value {
            0 => "en route",
            1 => "arrived",
            2 => "sold",
            _ => "unknown",
        }
    }
}

/// A product as served to clients, with named fields and the status
/// decoded to its string form. Wire names match the contract tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub batch_no: String,
    pub expiry_date: String,
    pub origin: String,
    pub location: String,
    pub sold: bool,
    pub sale_date: String,
    pub uid: String,
    pub price: u64,
    pub category: String,
    pub quantity_in_stock: u32,
    pub status: String,
    pub icon: String,
}

impl Product {
    pub fn from_raw(raw: &RawProduct) -> Self {
        Self {
            id: raw.id.clone(),
            name: raw.name.clone(),
            sku: raw.sku.clone(),
            batch_no: raw.batch_no.clone(),
            expiry_date: raw.expiry_date.clone(),
            origin: raw.origin.clone(),
            location: raw.location.clone(),
            sold: raw.sold,
            sale_date: raw.sale_date.clone(),
            uid: raw.uid.clone(),
            price: raw.price,
            category: raw.category.clone(),
            quantity_in_stock: raw.quantity_in_stock,
            status: Status::decode(raw.status).to_string(),
            icon: raw.icon.clone(),
        }
    }
}

/// The positional tuple returned by the contract's `getProduct`, decoded
/// once at the RPC boundary into named fields. A product whose `id` is
/// empty is a tombstone: the slot exists on the ledger but the product
/// was never registered or has been deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProduct {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub batch_no: String,
    pub expiry_date: String,
    pub origin: String,
    pub location: String,
    pub sold: bool,
    pub sale_date: String,
    pub uid: String,
    pub price: u64,
    pub category: String,
    pub quantity_in_stock: u32,
    pub status: u64,
    pub icon: String,
}

impl RawProduct {
    pub const FIELD_COUNT: usize = 15;

    /// Decode the wire tuple. Numeric slots arrive either as JSON numbers
    /// or as decimal strings depending on the node, so both are accepted.
    pub fn from_values(values: &[Value]) -> std::result::Result<Self, LedgerError> {
        if values.len() < Self::FIELD_COUNT {
            return Err(LedgerError::Rpc(format!(
                "getProduct returned {} fields, expected {}",
                values.len(),
                Self::FIELD_COUNT
            )));
        }

        Ok(Self {
            id: string_field(&values[0], "id")?,
            name: string_field(&values[1], "name")?,
            sku: string_field(&values[2], "sku")?,
            batch_no: string_field(&values[3], "batchNo")?,
            expiry_date: string_field(&values[4], "expiryDate")?,
            origin: string_field(&values[5], "origin")?,
            location: string_field(&values[6], "location")?,
            sold: bool_field(&values[7], "sold")?,
            sale_date: string_field(&values[8], "saleDate")?,
            uid: string_field(&values[9], "uid")?,
            price: uint_field(&values[10], "price")?,
            category: string_field(&values[11], "category")?,
            quantity_in_stock: uint_field(&values[12], "quantityInStock")? as u32,
            status: uint_field(&values[13], "status")?,
            icon: string_field(&values[14], "icon")?,
        })
    }

    pub fn is_tombstone(&self) -> bool {
        self.id.is_empty()
    }
}

fn string_field(value: &Value, name: &str) -> std::result::Result<String, LedgerError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LedgerError::Rpc(format!("Field {} is not a string", name)))
}

fn bool_field(value: &Value, name: &str) -> std::result::Result<bool, LedgerError> {
    value
        .as_bool()
        .ok_or_else(|| LedgerError::Rpc(format!("Field {} is not a boolean", name)))
}

fn uint_field(value: &Value, name: &str) -> std::result::Result<u64, LedgerError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| LedgerError::Rpc(format!("Field {} is not an unsigned integer", name))),
        Value::String(s) => s
            .parse()
            .map_err(|_| LedgerError::Rpc(format!("Field {} is not an unsigned integer", name))),
        _ => Err(LedgerError::Rpc(format!(
            "Field {} is not an unsigned integer",
            name
        ))),
    }
}
