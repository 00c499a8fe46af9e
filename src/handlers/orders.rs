use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use mongodb::bson::DateTime;
use serde::Deserialize;

use crate::db::models::{DeleteReport, InsertReport, Order, OrderUserInfo};
use crate::db::{self, Store};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_info: OrderUserInfo,
    pub plant_id: String,
    #[serde(default)]
    pub plant_name: Option<String>,
    #[serde(default)]
    pub plant_image: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    pub quantity: i64,
    #[serde(default)]
    pub address: Option<String>,
    pub status: String,
}

/// POST /order (auth required) - store the submitted order. Stock is not
/// validated here; the quantity endpoint adjusts inventory separately.
pub async fn place_order(
    State(store): State<Arc<Store>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<Json<InsertReport>, ApiError> {
    let order = Order {
        id: None,
        user_info: payload.user_info,
        plant_id: payload.plant_id,
        plant_name: payload.plant_name,
        plant_image: payload.plant_image,
        price: payload.price,
        quantity: payload.quantity,
        address: payload.address,
        status: payload.status,
        timestamp: DateTime::now(),
    };

    let report = store.insert_order(order).await?;
    tracing::debug!("Order placed by {}", user.email);
    Ok(Json(report))
}

/// GET /myoders/:email - orders whose embedded buyer email matches the
/// path parameter
pub async fn my_orders(
    State(store): State<Arc<Store>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(store.orders_for_email(&email).await?))
}

/// DELETE /myoders/:id - delete by id. Deleting an absent id reports
/// deletedCount 0, not an error.
pub async fn delete_order(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteReport>, ApiError> {
    let id = db::parse_object_id(&id)?;
    Ok(Json(store.delete_order(id).await?))
}
