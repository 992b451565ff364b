//! HTTP routes.
//!
//! Business outcomes (unknown product, out of stock) are answered with `200`
//! and a `status` message, as existing clients expect. Store failures are the
//! only `5xx` path.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::error;

use crate::Price;
use crate::engine::{Engine, EngineError};
use crate::model::{Product, ProductId, ReservationResult};

const PRODUCT_NOT_FOUND: &str = "Product not found";
const NOT_ENOUGH_STOCK: &str = "Not enough stock available";
const RESERVATION_CONFIRMED: &str = "Reservation confirmed";
const STORE_UNAVAILABLE: &str = "Reservation store unavailable";

pub fn routes(engine: Engine) -> Router {
    Router::new()
        .route("/list_products", get(list_products))
        .route("/list_products/{item_id}", get(get_product))
        .route("/reserve_product/{item_id}", get(reserve_product))
        .with_state(engine)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub item_id: ProductId,
    pub item_name: String,
    pub price: Price,
    pub initial_available_quantity: u32,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            item_id: product.id,
            item_name: product.name.clone(),
            price: product.price,
            initial_available_quantity: product.initial_stock,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: ProductView,
    pub current_quantity: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ProductId>,
}

impl StatusResponse {
    fn not_found() -> Self {
        Self {
            status: PRODUCT_NOT_FOUND,
            item_id: None,
        }
    }
}

impl From<ReservationResult> for StatusResponse {
    fn from(result: ReservationResult) -> Self {
        match result {
            ReservationResult::Confirmed(id) => Self {
                status: RESERVATION_CONFIRMED,
                item_id: Some(id),
            },
            ReservationResult::InsufficientStock(id) => Self {
                status: NOT_ENOUGH_STOCK,
                item_id: Some(id),
            },
            ReservationResult::NotFound(_) => Self::not_found(),
        }
    }
}

/// Infrastructure failure surfaced to the client.
#[derive(Debug)]
pub struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(reason = %self.0, "request failed");
        let body = StatusResponse {
            status: STORE_UNAVAILABLE,
            item_id: None,
        };
        (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
    }
}

/// Malformed ids are indistinguishable from unknown ones.
fn parse_item_id(raw: &str) -> Option<ProductId> {
    raw.trim().parse().ok()
}

async fn list_products(State(engine): State<Engine>) -> Json<Vec<ProductView>> {
    Json(
        engine
            .catalog()
            .list_all()
            .iter()
            .map(ProductView::from)
            .collect(),
    )
}

async fn get_product(
    State(engine): State<Engine>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let Some(item) = parse_item_id(&raw_id) else {
        return Ok(Json(StatusResponse::not_found()).into_response());
    };

    match engine.get_availability(item).await {
        Ok(availability) => {
            let detail = ProductDetail {
                product: ProductView::from(&availability.product),
                current_quantity: availability.available(),
            };
            Ok(Json(detail).into_response())
        }
        Err(EngineError::NotFound(_)) => Ok(Json(StatusResponse::not_found()).into_response()),
        Err(e) => Err(e.into()),
    }
}

async fn reserve_product(
    State(engine): State<Engine>,
    Path(raw_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Some(item) = parse_item_id(&raw_id) else {
        return Ok(Json(StatusResponse::not_found()));
    };

    let result = engine.reserve_one(item).await?;
    Ok(Json(result.into()))
}
