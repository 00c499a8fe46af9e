use std::time::Duration;

use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database,
};
use thiserror::Error;
use tracing::info;

pub mod models;

use self::models::{DeleteReport, InsertReport, Order, Plant, Role, UpdateReport, User};

use crate::config::DatabaseConfig;

/// Errors from the document store adapter
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Parse a store-assigned id from its path-parameter form
pub fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Adapter over the external document store. Owns the client for the whole
/// process lifetime: constructed once at startup, shared via the router
/// state, closed on graceful shutdown.
pub struct Store {
    client: Client,
    db: Database,
}

impl Store {
    const USERS: &'static str = "users";
    const PLANTS: &'static str = "plants";
    const ORDERS: &'static str = "orders";

    /// Connect with explicit pool sizing and the stable server API version,
    /// then ping the deployment so a bad URI fails at startup rather than on
    /// the first request.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&cfg.uri).await?;
        options.max_pool_size = Some(cfg.max_pool_size);
        options.min_pool_size = Some(cfg.min_pool_size);
        options.connect_timeout = Some(Duration::from_secs(cfg.connect_timeout_secs));
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options)?;
        let db = client.database(&cfg.db_name);

        let store = Self { client, db };
        store.ping().await?;
        info!("Connected to document store, database: {}", cfg.db_name);
        Ok(store)
    }

    /// Liveness probe against the deployment
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Shut the client down on graceful shutdown
    pub async fn close(self) {
        self.client.shutdown().await;
        info!("Closed document store client");
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(Self::USERS)
    }

    fn plants(&self) -> Collection<Plant> {
        self.db.collection(Self::PLANTS)
    }

    fn orders(&self) -> Collection<Order> {
        self.db.collection(Self::ORDERS)
    }

    // Users ----------------------------------------------------------------

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users().find_one(doc! { "email": email }, None).await?)
    }

    /// Insert a new user and return it with the store-assigned id filled in
    pub async fn insert_user(&self, mut user: User) -> Result<User, StoreError> {
        let result = self.users().insert_one(&user, None).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    pub async fn set_user_role(&self, email: &str, role: Role) -> Result<UpdateReport, StoreError> {
        let result = self
            .users()
            .update_one(
                doc! { "email": email },
                doc! { "$set": { "role": role.as_str() } },
                None,
            )
            .await?;
        Ok(result.into())
    }

    pub async fn user_role(&self, email: &str) -> Result<Option<Role>, StoreError> {
        Ok(self.find_user_by_email(email).await?.map(|user| user.role))
    }

    // Plants ---------------------------------------------------------------

    pub async fn insert_plant(&self, plant: Plant) -> Result<InsertReport, StoreError> {
        let result = self.plants().insert_one(&plant, None).await?;
        Ok(result.into())
    }

    pub async fn list_plants(&self) -> Result<Vec<Plant>, StoreError> {
        let cursor = self.plants().find(doc! {}, None).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_plant(&self, id: ObjectId) -> Result<Option<Plant>, StoreError> {
        Ok(self.plants().find_one(doc! { "_id": id }, None).await?)
    }

    /// Atomically adjust the stored quantity by the signed delta. The store
    /// guarantees per-document atomicity for the increment; there is no
    /// floor check at zero.
    pub async fn adjust_plant_quantity(
        &self,
        id: ObjectId,
        delta: i64,
    ) -> Result<UpdateReport, StoreError> {
        let result = self
            .plants()
            .update_one(doc! { "_id": id }, doc! { "$inc": { "quantity": delta } }, None)
            .await?;
        Ok(result.into())
    }

    // Orders ---------------------------------------------------------------

    pub async fn insert_order(&self, order: Order) -> Result<InsertReport, StoreError> {
        let result = self.orders().insert_one(&order, None).await?;
        Ok(result.into())
    }

    /// Orders whose embedded buyer email matches exactly
    pub async fn orders_for_email(&self, email: &str) -> Result<Vec<Order>, StoreError> {
        let cursor = self
            .orders()
            .find(doc! { "userInfo.email": email }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn delete_order(&self, id: ObjectId) -> Result<DeleteReport, StoreError> {
        let result = self.orders().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.into())
    }
}
