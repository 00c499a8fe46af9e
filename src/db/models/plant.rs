use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantSeller {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    /// Expected to stay >= 0, but not enforced anywhere in the store
    pub quantity: i64,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<PlantSeller>,
}
