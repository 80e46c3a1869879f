//! Untyped collection operations over the `documents` table

use serde_json::{Map, Value};
use sqlx::SqlitePool;

use super::repository::{RepoError, RepoResult};

/// Field holding the document id inside every stored body
pub const ID_FIELD: &str = "_id";

/// One named collection of JSON documents
#[derive(Clone, Debug)]
pub struct Collection {
    pool: SqlitePool,
    name: &'static str,
}

impl Collection {
    pub fn new(pool: SqlitePool, name: &'static str) -> Self {
        Self { pool, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All documents in insertion order
    pub async fn find_all(&self) -> RepoResult<Vec<Value>> {
        let bodies: Vec<String> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = ? ORDER BY seq",
        )
        .bind(self.name)
        .fetch_all(&self.pool)
        .await?;

        bodies.iter().map(|b| parse_body(b)).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Value>> {
        let body: Option<String> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = ? AND doc_id = ?",
        )
        .bind(self.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        body.as_deref().map(parse_body).transpose()
    }

    /// Store a new document under a freshly generated id.
    ///
    /// Any `_id` in the input is replaced. Returns the stored document.
    pub async fn insert(&self, mut doc: Map<String, Value>) -> RepoResult<Value> {
        let id = shared::util::document_id();
        doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        let doc = Value::Object(doc);
        let body = serde_json::to_string(&doc)
            .map_err(|e| RepoError::Database(format!("encode document: {e}")))?;

        sqlx::query("INSERT INTO documents (collection, doc_id, body) VALUES (?, ?, ?)")
            .bind(self.name)
            .bind(&id)
            .bind(&body)
            .execute(&self.pool)
            .await?;

        Ok(doc)
    }

    /// Shallow-merge `patch` into the stored document.
    ///
    /// Fields absent from `patch` keep their stored value and `_id` can
    /// never be overwritten. Returns `None` when no document has `id`.
    /// The merge is a single statement, so concurrent merges of the
    /// same id resolve last-write-wins.
    pub async fn merge(&self, id: &str, mut patch: Map<String, Value>) -> RepoResult<Option<Value>> {
        patch.remove(ID_FIELD);
        // json_patch treats null as "remove key"
        patch.retain(|_, v| !v.is_null());
        let patch = serde_json::to_string(&Value::Object(patch))
            .map_err(|e| RepoError::Database(format!("encode patch: {e}")))?;

        let body: Option<String> = sqlx::query_scalar(
            "UPDATE documents SET body = json_patch(body, ?) \
             WHERE collection = ? AND doc_id = ? RETURNING body",
        )
        .bind(&patch)
        .bind(self.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        body.as_deref().map(parse_body).transpose()
    }

    /// Remove a document; reports whether a row was deleted
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND doc_id = ?")
            .bind(self.name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn parse_body(body: &str) -> RepoResult<Value> {
    serde_json::from_str(body).map_err(|e| RepoError::Database(format!("corrupt document: {e}")))
}
