use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    AppState,
    models::{Product, TagQuery},
    queries::product_queries,
};

pub async fn check_product(
    State(state): State<AppState>,
    Query(query): Query<TagQuery>,
) -> Response {
    let tag_id = query.tagid.unwrap_or_else(|| "none".to_string());
    let Some(text) = query.text else {
        return super::tag_page(
            StatusCode::BAD_REQUEST,
            "Check Failed",
            "Missing text parameter. Please ensure the NFC tag contains a valid product ID.",
            false,
            None,
            None,
        );
    };

    let product_id = text.trim();
    if product_id.is_empty() {
        return super::tag_page(
            StatusCode::BAD_REQUEST,
            "Check Failed",
            "Invalid product ID in text.",
            false,
            None,
            None,
        );
    }
    tracing::info!("Checking product {} with tag {}", product_id, tag_id);

    match product_queries::find_raw(&state, product_id).await {
        Ok(Some(raw)) if !raw.is_tombstone() => {
            let product = Product::from_raw(&raw);
            let message = status_sentence(&product);
            super::tag_page(
                StatusCode::OK,
                "Product Status",
                &message,
                true,
                Some(&product),
                None,
            )
        }
        Ok(_) => super::tag_page(
            StatusCode::OK,
            "Check Failed",
            &format!(
                "Product {} is not registered or has been deleted.",
                product_id
            ),
            false,
            None,
            None,
        ),
        Err(err) => {
            tracing::error!("Error checking product: {}", err);
            super::tag_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Check Failed",
                &format!("Error checking product: {}", err),
                false,
                None,
                None,
            )
        }
    }
}

fn status_sentence(product: &Product) -> String {
    match product.status.as_str() {
        "en route" => format!(
            "Product {} ({}) is en route to {}.",
            product.id, product.name, product.location
        ),
        "arrived" => format!(
            "Product {} ({}) has arrived at {}.",
            product.id, product.name, product.location
        ),
        "sold" => format!(
            "Product {} ({}) was sold on {} for {} units.",
            product.id, product.name, product.sale_date, product.price
        ),
        _ => format!(
            "Product {} ({}) has an unknown status.",
            product.id, product.name
        ),
    }
}
