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
    models::{Status, TagLocationUpdate, TagQuery, TxResponse, UpdateLocationRequest},
    queries::product_queries,
};

pub async fn update_location(
    State(state): State<AppState>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<TxResponse>> {
    if payload.product_id.is_empty()
        || payload.location.is_empty()
        || payload.price.is_none()
        || payload.status.is_empty()
    {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }
    let status = Status::parse(&payload.status)?;

    let call = ContractCall::UpdateLocation {
        id: payload.product_id.clone(),
        location: payload.location,
        price: payload.price.unwrap_or_default(),
        status: status.encode(),
    };

    let receipt = state.submitter.submit(call).await?;
    state.cache.invalidate(&payload.product_id);

    Ok(Json(TxResponse::new(receipt.transaction_hash)))
}

pub async fn update_location_from_tag(
    State(state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> Response {
    let tag_id = query.tagid.unwrap_or_else(|| "none".to_string());
    let Some(text) = query.text else {
        return super::tag_page(
            StatusCode::BAD_REQUEST,
            "Update Failed",
            "No text data found. Please ensure the NFC tag contains valid data.",
            false,
            None,
            None,
        );
    };

    let (upd, status) = match TagLocationUpdate::parse(&text)
        .and_then(|upd| Status::parse(&upd.status).map(|status| (upd, status)))
    {
        Ok(parsed) => parsed,
        Err(err) => {
            return super::tag_page(
                StatusCode::BAD_REQUEST,
                "Update Failed",
                &super::validation_message(err),
                false,
                None,
                None,
            );
        }
    };
    tracing::info!(
        "Tag location update input: product={} location={} tag={}",
        upd.product_id,
        upd.location,
        tag_id
    );

    let call = ContractCall::UpdateLocation {
        id: upd.product_id.clone(),
        location: upd.location.clone(),
        price: upd.price,
        status: status.encode(),
    };

    match state.submitter.submit(call).await {
        Ok(receipt) => {
            state.cache.invalidate(&upd.product_id);
            // Re-fetch so the scanner page shows the committed state.
            match product_queries::find_decoded(&state, &upd.product_id).await {
                Ok(product) => super::tag_page(
                    StatusCode::OK,
                    "Location Updated",
                    &format!(
                        "Location updated for product {} to {} with status {}.",
                        upd.product_id,
                        upd.location,
                        status.as_str()
                    ),
                    true,
                    product.as_ref(),
                    Some(&receipt.transaction_hash),
                ),
                Err(err) => {
                    tracing::error!("Error fetching product after update: {}", err);
                    super::tag_page(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Update Failed",
                        &format!("Error updating location: {}", err),
                        false,
                        None,
                        None,
                    )
                }
            }
        }
        Err(err) => {
            tracing::error!("Error updating location from tag: {}", err);
            super::tag_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Update Failed",
                &format!("Error updating location: {}", err),
                false,
                None,
                None,
            )
        }
    }
}
