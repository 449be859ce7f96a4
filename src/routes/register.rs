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
    models::{Product, RegisterRequest, Status, TagQuery, TagRegistration, TxResponse},
};

pub async fn register_product(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<TxResponse>> {
    validate_registration(&payload)?;
    let status = Status::parse(&payload.status)?;

    let call = ContractCall::RegisterProduct {
        id: payload.id.clone(),
        name: payload.name,
        sku: payload.sku,
        batch_no: payload.batch_no,
        expiry_date: payload.expiry_date,
        origin: payload.origin,
        location: payload.location,
        uid: payload.uid,
        category: payload.category,
        quantity_in_stock: payload.quantity_in_stock.unwrap_or_default(),
        status: status.encode(),
        icon: payload.icon,
    };

    let receipt = state.submitter.submit(call).await?;
    state.cache.invalidate(&payload.id);

    Ok(Json(TxResponse::new(receipt.transaction_hash)))
}

fn validate_registration(payload: &RegisterRequest) -> Result<()> {
    if payload.id.is_empty()
        || payload.name.is_empty()
        || payload.sku.is_empty()
        || payload.batch_no.is_empty()
        || payload.expiry_date.is_empty()
        || payload.origin.is_empty()
        || payload.location.is_empty()
        || payload.uid.is_empty()
        || payload.category.is_empty()
        || payload.quantity_in_stock.is_none()
        || payload.status.is_empty()
        || payload.icon.is_empty()
    {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    Ok(())
}

pub async fn register_from_tag(
    State(state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> Response {
    let tag_id = query.tagid.unwrap_or_else(|| "none".to_string());
    let Some(text) = query.text else {
        return super::tag_page(
            StatusCode::BAD_REQUEST,
            "Registration Failed",
            "No text data found. Please ensure the NFC tag contains valid data.",
            false,
            None,
            None,
        );
    };

    let reg = match TagRegistration::parse(&text) {
        Ok(reg) => reg,
        Err(err) => {
            return super::tag_page(
                StatusCode::BAD_REQUEST,
                "Registration Failed",
                &super::validation_message(err),
                false,
                None,
                None,
            );
        }
    };
    tracing::info!(
        "Tag register input: product={} name={} tag={}",
        reg.product_id,
        reg.name,
        tag_id
    );

    // Fields the compact tag payload does not carry are derived.
    let sku = format!("SKU-{}", reg.product_id);
    let uid = if tag_id != "none" {
        tag_id
    } else {
        format!("UID-{}", reg.product_id)
    };

    let call = ContractCall::RegisterProduct {
        id: reg.product_id.clone(),
        name: reg.name.clone(),
        sku: sku.clone(),
        batch_no: reg.batch_no.clone(),
        expiry_date: reg.expiry_date.clone(),
        origin: reg.origin.clone(),
        location: reg.origin.clone(),
        uid: uid.clone(),
        category: reg.category.clone(),
        quantity_in_stock: reg.quantity_in_stock,
        status: Status::EnRoute.encode(),
        icon: "BookReader".to_string(),
    };

    match state.submitter.submit(call).await {
        Ok(receipt) => {
            state.cache.invalidate(&reg.product_id);
            let product = Product {
                id: reg.product_id,
                name: reg.name,
                sku,
                batch_no: reg.batch_no,
                expiry_date: reg.expiry_date,
                origin: reg.origin.clone(),
                location: reg.origin,
                sold: false,
                sale_date: String::new(),
                uid,
                price: 0,
                category: reg.category,
                quantity_in_stock: reg.quantity_in_stock,
                status: Status::EnRoute.as_str().to_string(),
                icon: "BookReader".to_string(),
            };
            super::tag_page(
                StatusCode::OK,
                "Product Registered",
                &format!(
                    "Product {} ({}) successfully registered via NFC.",
                    product.id, product.name
                ),
                true,
                Some(&product),
                Some(&receipt.transaction_hash),
            )
        }
        Err(err) => {
            tracing::error!("Error registering product from tag: {}", err);
            super::tag_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Registration Failed",
                &format!("Error registering product: {}", err),
                false,
                None,
                None,
            )
        }
    }
}
