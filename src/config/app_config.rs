use crate::error::{AppError, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub rpc_url: String,
    pub contract_address: String,
    pub private_key: String,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3001".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid PORT value".to_string()))?,
                max_body_size: env::var("MAX_BODY_SIZE")
                    .unwrap_or_else(|_| "1048576".to_string())
                    .parse()
                    .map_err(|_| AppError::ConfigError("Invalid MAX_BODY_SIZE value".to_string()))?,
            },
            ledger: LedgerConfig {
                rpc_url: env::var("RPC_URL")?,
                contract_address: env::var("CONTRACT_ADDRESS")?,
                private_key: env::var("PRIVATE_KEY")?,
                retry_attempts: env::var("LEDGER_RETRY_ATTEMPTS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::ConfigError("Invalid LEDGER_RETRY_ATTEMPTS value".to_string())
                    })?,
                retry_delay: Duration::from_millis(
                    env::var("LEDGER_RETRY_DELAY_MS")
                        .unwrap_or_else(|_| "2000".to_string())
                        .parse()
                        .map_err(|_| {
                            AppError::ConfigError("Invalid LEDGER_RETRY_DELAY_MS value".to_string())
                        })?,
                ),
            },
            cors: CorsConfig {
                allowed_origins: env::var("FRONTEND_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
