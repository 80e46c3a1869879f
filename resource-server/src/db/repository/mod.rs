//! Repository Module
//!
//! Typed CRUD over a [`Collection`]. Each resource model implements
//! [`Document`] to name its collection and creation defaults; one generic
//! [`Repository`] then serves all of them.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::AppError;
use shared::models::{Contact, MenuItem, Order, Reservation};
use thiserror::Error;

use super::{Collection, DbService};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store unreachable (pool exhausted or closed, I/O failure)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                RepoError::Unavailable(err.to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl RepoError {
    /// Convert into the caller-facing error.
    ///
    /// Store failures carry the operation's own message (`failure`); the
    /// driver detail only goes to the log.
    pub fn into_app_error(self, failure: &str) -> AppError {
        match self {
            RepoError::NotFound(label) => AppError::not_found(label),
            RepoError::Unavailable(detail) => {
                tracing::warn!(detail = %detail, "{failure}");
                AppError::store_unavailable(failure)
            }
            RepoError::Database(detail) => {
                tracing::error!(detail = %detail, "{failure}");
                AppError::internal(failure)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Attach a per-operation failure message to a repository result
pub trait RepoResultExt<T> {
    fn or_fail(self, failure: &str) -> Result<T, AppError>;
}

impl<T> RepoResultExt<T> for RepoResult<T> {
    fn or_fail(self, failure: &str) -> Result<T, AppError> {
        self.map_err(|e| e.into_app_error(failure))
    }
}

/// A model stored as a JSON document
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Collection name in the store
    const COLLECTION: &'static str;
    /// Human label used in not-found messages ("Menu item not found")
    const LABEL: &'static str;

    /// Fill defaulted fields on a document about to be inserted
    fn on_create(_doc: &mut Map<String, Value>) {}
}

fn stamp_created_at(doc: &mut Map<String, Value>) {
    if let Ok(now) = serde_json::to_value(chrono::Utc::now()) {
        doc.insert("createdAt".to_string(), now);
    }
}

impl Document for MenuItem {
    const COLLECTION: &'static str = "menus";
    const LABEL: &'static str = "Menu item";
}

impl Document for Order {
    const COLLECTION: &'static str = "orders";
    const LABEL: &'static str = "Order";

    fn on_create(doc: &mut Map<String, Value>) {
        stamp_created_at(doc);
    }
}

impl Document for Reservation {
    const COLLECTION: &'static str = "reservations";
    const LABEL: &'static str = "Reservation";

    fn on_create(doc: &mut Map<String, Value>) {
        stamp_created_at(doc);
    }
}

impl Document for Contact {
    const COLLECTION: &'static str = "contacts";
    const LABEL: &'static str = "Contact";
}

/// Typed repository over one document collection
pub struct Repository<T> {
    collection: Collection,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> Repository<T> {
    pub fn new(db: &DbService) -> Self {
        Self {
            collection: db.collection(T::COLLECTION),
            _marker: PhantomData,
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<T>> {
        self.collection
            .find_all()
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>> {
        self.collection.find_by_id(id).await?.map(decode).transpose()
    }

    /// Insert a create payload and return the stored document
    pub async fn create<C: Serialize>(&self, data: &C) -> RepoResult<T> {
        let mut doc = to_object(data)?;
        T::on_create(&mut doc);
        decode(self.collection.insert(doc).await?)
    }

    /// Merge an update payload; `NotFound` when the id does not exist
    pub async fn update<U: Serialize>(&self, id: &str, data: &U) -> RepoResult<T> {
        let patch = to_object(data)?;
        match self.collection.merge(id, patch).await? {
            Some(doc) => decode(doc),
            None => Err(RepoError::NotFound(T::LABEL.to_string())),
        }
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.collection.delete(id).await
    }
}

fn to_object<P: Serialize>(data: &P) -> RepoResult<Map<String, Value>> {
    match serde_json::to_value(data) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RepoError::Database(format!(
            "payload must be a JSON object, got {other}"
        ))),
        Err(e) => Err(RepoError::Database(format!("encode payload: {e}"))),
    }
}

fn decode<T: DeserializeOwned>(doc: Value) -> RepoResult<T> {
    serde_json::from_value(doc).map_err(|e| RepoError::Database(format!("decode document: {e}")))
}
