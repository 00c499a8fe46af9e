use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::db::models::{InsertReport, Plant, PlantSeller, UpdateReport};
use crate::db::{self, Store};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

#[derive(Debug, Deserialize)]
pub struct NewPlantRequest {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub image: String,
    #[serde(default)]
    pub seller: Option<PlantSeller>,
}

/// POST /plants (auth required) - store the submitted plant
pub async fn create_plant(
    State(store): State<Arc<Store>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewPlantRequest>,
) -> Result<Json<InsertReport>, ApiError> {
    let plant = Plant {
        id: None,
        name: payload.name,
        category: payload.category,
        description: payload.description,
        price: payload.price,
        quantity: payload.quantity,
        image: payload.image,
        seller: payload.seller,
    };

    let report = store.insert_plant(plant).await?;
    tracing::debug!("Plant created by {}", user.email);
    Ok(Json(report))
}

/// GET /plants - the full collection; no pagination, no filtering
pub async fn list_plants(State(store): State<Arc<Store>>) -> Result<Json<Vec<Plant>>, ApiError> {
    Ok(Json(store.list_plants().await?))
}

/// GET /plants/:id - a single plant, or null when the id matches nothing
pub async fn get_plant(
    State(store): State<Arc<Store>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Plant>>, ApiError> {
    let id = db::parse_object_id(&id)?;
    Ok(Json(store.find_plant(id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityUpdateRequest {
    pub quantity_to_update: i64,
    #[serde(default)]
    pub status: Option<String>,
}

/// Direction flag: "increase" adds the delta, anything else subtracts it
fn signed_delta(status: Option<&str>, quantity: i64) -> i64 {
    if status == Some("increase") {
        quantity
    } else {
        -quantity
    }
}

/// PATCH /plants/quantity/:id (auth required) - atomically adjust the
/// stored quantity by the signed delta. No floor check at zero.
pub async fn adjust_quantity(
    State(store): State<Arc<Store>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<QuantityUpdateRequest>,
) -> Result<Json<UpdateReport>, ApiError> {
    let id = db::parse_object_id(&id)?;
    let delta = signed_delta(payload.status.as_deref(), payload.quantity_to_update);

    let report = store.adjust_plant_quantity(id, delta).await?;
    tracing::debug!("Quantity of {} adjusted by {} for {}", id, delta, user.email);
    Ok(Json(report))
}
