mod check;
mod health;
mod location;
mod products;
mod register;
mod sale;

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};

use crate::{AppState, error::AppError, models::Product, services::html_service};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/register",
            post(register::register_product).get(register::register_from_tag),
        )
        .route(
            "/updateLocation",
            post(location::update_location).get(location::update_location_from_tag),
        )
        .route(
            "/logSale",
            post(sale::log_sale).get(sale::log_sale_from_tag),
        )
        .route("/deleteProduct", post(products::delete_product))
        .route("/products", get(products::list_products))
        .route("/product/:product_id", get(products::get_product))
        .route("/checkProduct", get(check::check_product))
}

/// Scanner-facing response: a styled HTML page with the given status.
pub(crate) fn tag_page(
    status: StatusCode,
    title: &str,
    message: &str,
    is_success: bool,
    product: Option<&Product>,
    transaction_hash: Option<&str>,
) -> Response {
    (
        status,
        Html(html_service::page(
            title,
            message,
            is_success,
            product,
            transaction_hash,
        )),
    )
        .into_response()
}

/// Strip the error wrapper for page bodies: scanners show the plain
/// validation message, not the response-level prefix.
pub(crate) fn validation_message(err: AppError) -> String {
    match err {
        AppError::BadRequest(msg) => msg,
        other => other.to_string(),
    }
}
