use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Buyer identity embedded in the order document. Orders are looked up by
/// the nested `userInfo.email` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_info: OrderUserInfo,
    pub plant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub status: String,
    pub timestamp: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn wire_field_names_are_camel_case() {
        let order = Order {
            id: None,
            user_info: OrderUserInfo {
                name: None,
                email: "buyer@plantnet.dev".into(),
                image: None,
            },
            plant_id: "665f1f77bcf86cd799439011".into(),
            plant_name: Some("Monstera".into()),
            plant_image: None,
            price: Some(29.99),
            quantity: 2,
            address: Some("12 Fern Way".into()),
            status: "Pending".into(),
            timestamp: DateTime::now(),
        };
        let doc = bson::to_document(&order).unwrap();
        assert!(doc.contains_key("userInfo"));
        assert!(doc.contains_key("plantId"));
        assert!(doc.contains_key("plantName"));
        assert_eq!(
            doc.get_document("userInfo").unwrap().get_str("email").unwrap(),
            "buyer@plantnet.dev"
        );
    }
}
