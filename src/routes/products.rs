use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState,
    error::{AppError, Result},
    ledger::ContractCall,
    models::{DeleteRequest, Product, TxResponse},
    queries::product_queries,
};

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = product_queries::find_all(&state).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Response> {
    match product_queries::find_decoded(&state, &product_id).await? {
        Some(product) => Ok(Json(product).into_response()),
        // An absent product is an expected business outcome, not a fault.
        None => Ok(Json(json!({
            "success": false,
            "message": format!(
                "Product {} is not registered or has been deleted.",
                product_id
            ),
        }))
        .into_response()),
    }
}

pub async fn delete_product(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<TxResponse>> {
    if payload.id.is_empty() {
        return Err(AppError::BadRequest("Missing productId".to_string()));
    }

    let call = ContractCall::DeleteProduct {
        id: payload.id.clone(),
    };

    let receipt = state.submitter.submit(call).await?;
    state.cache.invalidate(&payload.id);

    Ok(Json(TxResponse::new(receipt.transaction_hash)))
}
