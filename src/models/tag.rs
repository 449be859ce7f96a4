//! Pipe-delimited tag payload grammar.
//!
//! Physical tags carry a compact textual encoding of a request:
//! `ID|Name|BatchNo|ExpiryDate|Origin[|Category|Quantity]` for
//! registration, `ID|Location|Price[|Status]` for location updates and
//! `ID|SaleDate|Price` for sales. Parsing happens before any ledger
//! call; malformed payloads never reach the network.

use crate::error::{AppError, Result};
use crate::models::product::{CATEGORIES, DEFAULT_CATEGORY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRegistration {
    pub product_id: String,
    pub name: String,
    pub batch_no: String,
    pub expiry_date: String,
    pub origin: String,
    pub category: String,
    pub quantity_in_stock: u32,
}

impl TagRegistration {
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('|').collect();
        if parts.len() < 5 {
            return Err(AppError::BadRequest(
                "Invalid text format. Expected: ID|Name|BatchNo|ExpiryDate|Origin[|Category|Quantity]"
                    .to_string(),
            ));
        }

        let category = match parts.get(5) {
            Some(c) if CATEGORIES.contains(c) => c.to_string(),
            _ => DEFAULT_CATEGORY.to_string(),
        };
        let quantity_in_stock = match parts.get(6) {
            Some(q) => q.parse().map_err(|_| {
                AppError::BadRequest("Invalid quantity. Must be a non-negative integer.".to_string())
            })?,
            None => 1,
        };

        Ok(Self {
            product_id: parts[0].to_string(),
            name: parts[1].to_string(),
            batch_no: parts[2].to_string(),
            expiry_date: parts[3].to_string(),
            origin: parts[4].to_string(),
            category,
            quantity_in_stock,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLocationUpdate {
    pub product_id: String,
    pub location: String,
    pub price: u64,
    pub status: String,
}

impl TagLocationUpdate {
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('|').collect();
        if parts.len() < 3 {
            return Err(AppError::BadRequest(
                "Invalid text format. Expected: ID|Location|Price|Status".to_string(),
            ));
        }

        let price = parts[2].parse().map_err(|_| {
            AppError::BadRequest("Invalid price. Must be a non-negative integer.".to_string())
        })?;
        let status = match parts.get(3) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => "arrived".to_string(),
        };

        Ok(Self {
            product_id: parts[0].to_string(),
            location: parts[1].to_string(),
            price,
            status,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSale {
    pub product_id: String,
    pub sale_date: String,
    pub price: u64,
}

impl TagSale {
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('|').collect();
        if parts.len() < 3 {
            return Err(AppError::BadRequest(
                "Invalid text format. Expected: ID|SaleDate|Price".to_string(),
            ));
        }

        let price = parts[2].parse().map_err(|_| {
            AppError::BadRequest("Invalid price. Must be a non-negative integer.".to_string())
        })?;

        Ok(Self {
            product_id: parts[0].to_string(),
            sale_date: parts[1].to_string(),
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_parses_full_payload() {
        let reg = TagRegistration::parse("P2|Widget|B009|2025-12-01|Nairobi|Electronics|10").unwrap();
        assert_eq!(reg.product_id, "P2");
        assert_eq!(reg.name, "Widget");
        assert_eq!(reg.batch_no, "B009");
        assert_eq!(reg.expiry_date, "2025-12-01");
        assert_eq!(reg.origin, "Nairobi");
        assert_eq!(reg.category, "Electronics");
        assert_eq!(reg.quantity_in_stock, 10);
    }

    #[test]
    fn registration_defaults_category_and_quantity() {
        let reg = TagRegistration::parse("P2|Widget|B009|2025-12-01|Nairobi").unwrap();
        assert_eq!(reg.category, "Others");
        assert_eq!(reg.quantity_in_stock, 1);
    }

    #[test]
    fn registration_folds_unknown_category_into_others() {
        let reg = TagRegistration::parse("P2|Widget|B009|2025-12-01|Nairobi|Gadgets|3").unwrap();
        assert_eq!(reg.category, "Others");
        assert_eq!(reg.quantity_in_stock, 3);
    }

    #[test]
    fn registration_rejects_short_payloads() {
        assert!(TagRegistration::parse("P2|Widget|B009|2025-12-01").is_err());
        assert!(TagRegistration::parse("").is_err());
    }

    #[test]
    fn registration_rejects_bad_quantity() {
        assert!(TagRegistration::parse("P2|Widget|B009|2025-12-01|Nairobi|Toys|-1").is_err());
        assert!(TagRegistration::parse("P2|Widget|B009|2025-12-01|Nairobi|Toys|many").is_err());
    }

    #[test]
    fn location_update_defaults_status_to_arrived() {
        let upd = TagLocationUpdate::parse("P1|Mombasa|250").unwrap();
        assert_eq!(upd.status, "arrived");
        assert_eq!(upd.price, 250);

        let upd = TagLocationUpdate::parse("P1|Mombasa|250|sold").unwrap();
        assert_eq!(upd.status, "sold");
    }

    #[test]
    fn location_update_rejects_bad_price() {
        assert!(TagLocationUpdate::parse("P1|Mombasa|free").is_err());
        assert!(TagLocationUpdate::parse("P1|Mombasa").is_err());
    }

    #[test]
    fn sale_parses_and_rejects_short_payloads() {
        let sale = TagSale::parse("P1|2025-06-01|300").unwrap();
        assert_eq!(sale.sale_date, "2025-06-01");
        assert_eq!(sale.price, 300);

        assert!(TagSale::parse("P1|2025-06-01").is_err());
    }
}
