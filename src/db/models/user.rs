use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Marketplace account role. `Requested` marks a pending seller upgrade
/// awaiting admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Seller,
    Admin,
    #[serde(rename = "Requested")]
    Requested,
}

impl Role {
    /// The exact string stored in the `role` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Seller => "seller",
            Role::Admin => "admin",
            Role::Requested => "Requested",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub role: Role,
    pub timestamp: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn role_wire_names_match_the_stored_strings() {
        assert_eq!(serde_json::to_value(Role::Customer).unwrap(), "customer");
        assert_eq!(serde_json::to_value(Role::Seller).unwrap(), "seller");
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
        assert_eq!(serde_json::to_value(Role::Requested).unwrap(), "Requested");
    }

    #[test]
    fn as_str_agrees_with_serde() {
        for role in [Role::Customer, Role::Seller, Role::Admin, Role::Requested] {
            assert_eq!(serde_json::to_value(role).unwrap(), role.as_str());
        }
    }

    #[test]
    fn new_user_serializes_without_an_id_field() {
        let user = User {
            id: None,
            email: "a@b.c".into(),
            name: Some("Ada".into()),
            image: None,
            role: Role::Customer,
            timestamp: DateTime::now(),
        };
        let doc = bson::to_document(&user).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("role").unwrap(), "customer");
    }

    #[test]
    fn stored_user_round_trips_through_bson() {
        let user = User {
            id: Some(ObjectId::new()),
            email: "a@b.c".into(),
            name: None,
            image: None,
            role: Role::Requested,
            timestamp: DateTime::now(),
        };
        let doc = bson::to_document(&user).unwrap();
        let back: User = bson::from_document(doc).unwrap();
        assert_eq!(back.id, user.id);
        assert_eq!(back.role, Role::Requested);
    }
}
