pub mod html_service;
mod tx_service;

pub use tx_service::{GAS_CEILING, TxSubmitter};
