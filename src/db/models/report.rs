use mongodb::bson::Bson;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::Serialize;

/// Acknowledged insert summary returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertReport {
    pub inserted_id: String,
}

impl From<InsertOneResult> for InsertReport {
    fn from(result: InsertOneResult) -> Self {
        let inserted_id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Self { inserted_id }
    }
}

/// Acknowledged update summary returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateResult> for UpdateReport {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

/// Acknowledged delete summary returned to clients. A missing document is
/// reported as deletedCount 0, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReport {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteReport {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_count: result.deleted_count,
        }
    }
}
