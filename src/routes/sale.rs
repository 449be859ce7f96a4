use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    AppState,
    error::{AppError, Result},
    ledger::ContractCall,
    models::{LogSaleRequest, TagQuery, TagSale, TxResponse},
    queries::product_queries,
};

pub async fn log_sale(
    State(state): State<AppState>,
    Json(payload): Json<LogSaleRequest>,
) -> Result<Json<TxResponse>> {
    if payload.product_id.is_empty() || payload.sale_date.is_empty() || payload.price.is_none() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let call = ContractCall::LogSale {
        id: payload.product_id.clone(),
        sale_date: payload.sale_date,
        price: payload.price.unwrap_or_default(),
    };

    let receipt = state.submitter.submit(call).await?;
    state.cache.invalidate(&payload.product_id);

    Ok(Json(TxResponse::new(receipt.transaction_hash)))
}

pub async fn log_sale_from_tag(
    State(state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> Response {
    let tag_id = query.tagid.unwrap_or_else(|| "none".to_string());
    let Some(text) = query.text else {
        return super::tag_page(
            StatusCode::BAD_REQUEST,
            "Sale Failed",
            "Missing text data. Please ensure the NFC tag contains valid data.",
            false,
            None,
            None,
        );
    };

    let sale = match TagSale::parse(&text) {
        Ok(sale) => sale,
        Err(err) => {
            return super::tag_page(
                StatusCode::BAD_REQUEST,
                "Sale Failed",
                &super::validation_message(err),
                false,
                None,
                None,
            );
        }
    };
    tracing::info!(
        "Tag sale input: product={} date={} tag={}",
        sale.product_id,
        sale.sale_date,
        tag_id
    );

    let call = ContractCall::LogSale {
        id: sale.product_id.clone(),
        sale_date: sale.sale_date.clone(),
        price: sale.price,
    };

    match state.submitter.submit(call).await {
        Ok(receipt) => {
            state.cache.invalidate(&sale.product_id);
            match product_queries::find_decoded(&state, &sale.product_id).await {
                Ok(product) => super::tag_page(
                    StatusCode::OK,
                    "Sale Logged",
                    &format!(
                        "Sale logged for product {} on {} for {} units.",
                        sale.product_id, sale.sale_date, sale.price
                    ),
                    true,
                    product.as_ref(),
                    Some(&receipt.transaction_hash),
                ),
                Err(err) => {
                    tracing::error!("Error fetching product after sale: {}", err);
                    super::tag_page(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Sale Failed",
                        &format!("Error logging sale: {}", err),
                        false,
                        None,
                        None,
                    )
                }
            }
        }
        Err(err) => {
            tracing::error!("Error logging sale from tag: {}", err);
            super::tag_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Sale Failed",
                &format!("Error logging sale: {}", err),
                false,
                None,
                None,
            )
        }
    }
}
