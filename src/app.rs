use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use tower_http::cors::CorsLayer;

use crate::{
    cache::ProductCache,
    config::AppConfig,
    error::Result,
    ledger::{HttpLedgerClient, LedgerClient, RetryPolicy},
    routes,
    services::TxSubmitter,
};

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerClient>,
    pub cache: Arc<ProductCache>,
    pub submitter: Arc<TxSubmitter>,
    pub retry: RetryPolicy,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let ledger: Arc<dyn LedgerClient> = Arc::new(HttpLedgerClient::connect(&config.ledger).await?);
    startup_diagnostics(ledger.as_ref()).await;

    let state = AppState {
        cache: Arc::new(ProductCache::new()),
        submitter: Arc::new(TxSubmitter::new(ledger.clone())),
        retry: RetryPolicy::new(config.ledger.retry_attempts, config.ledger.retry_delay),
        ledger,
    };

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                crate::error::AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allowed_origins);

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .with_state(state);

    Ok(app)
}

/// Best-effort boot checks against the ledger. A misconfigured signing
/// account is logged loudly but never blocks startup; the ledger may
/// simply be slow to answer.
async fn startup_diagnostics(ledger: &dyn LedgerClient) {
    tracing::info!("Signing account: {}", ledger.account());

    match ledger.contract_owner().await {
        Ok(owner) if owner.eq_ignore_ascii_case(ledger.account()) => {
            tracing::info!("Contract owner: {}", owner);
        }
        Ok(owner) => {
            tracing::warn!(
                "Signing account {} does not match contract owner {}",
                ledger.account(),
                owner
            );
        }
        Err(err) => tracing::error!("Error checking contract ownership: {}", err),
    }

    match ledger.account_balance().await {
        Ok(0) => tracing::warn!("Signing account has zero balance; submissions will fail"),
        Ok(balance) => tracing::info!("Account balance: {} units", balance),
        Err(err) => tracing::error!("Error checking account balance: {}", err),
    }
}
