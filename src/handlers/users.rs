use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use mongodb::bson::DateTime;
use serde::Deserialize;

use crate::db::models::{Role, UpdateReport, User};
use crate::db::Store;
use crate::error::ApiError;

/// Profile fields accepted at first sign-in. The path email is canonical;
/// an email submitted in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct UpsertUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// POST /users/:email - find-or-insert by email.
///
/// An existing user is returned unchanged; otherwise the user is created
/// with the default role and a creation timestamp. Idempotent on repeated
/// calls with the same email.
pub async fn upsert_user(
    State(store): State<Arc<Store>>,
    Path(email): Path<String>,
    Json(payload): Json<UpsertUserRequest>,
) -> Result<Json<User>, ApiError> {
    if let Some(existing) = store.find_user_by_email(&email).await? {
        return Ok(Json(existing));
    }

    let user = User {
        id: None,
        email,
        name: payload.name,
        image: payload.image,
        role: Role::Customer,
        timestamp: DateTime::now(),
    };
    let created = store.insert_user(user).await?;
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct SellerStatusRequest {
    pub status: Role,
}

/// PATCH /update-seller/:email - set the user's role to the submitted
/// status, unless a seller request is already pending (409).
pub async fn update_seller_status(
    State(store): State<Arc<Store>>,
    Path(email): Path<String>,
    Json(payload): Json<SellerStatusRequest>,
) -> Result<Json<UpdateReport>, ApiError> {
    let current = store.user_role(&email).await?;
    if current == Some(Role::Requested) {
        return Err(ApiError::conflict(
            "You have already requested. Please wait for admin response",
        ));
    }

    let report = store.set_user_role(&email, payload.status).await?;
    Ok(Json(report))
}

/// GET /users/role/:email - just the role field of the matching user, or
/// null when the user is unknown
pub async fn user_role(
    State(store): State<Arc<Store>>,
    Path(email): Path<String>,
) -> Result<Json<Option<Role>>, ApiError> {
    Ok(Json(store.user_role(&email).await?))
}
