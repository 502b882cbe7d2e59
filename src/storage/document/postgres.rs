//! Persistent document store implementation using PostgreSQL.
//!
//! Each collection is a table `(seq BIGSERIAL, id TEXT PRIMARY KEY, doc JSONB NOT NULL)`.
//! Collection names are validated before they are interpolated into SQL.

use super::{
    expect_object, validate_collection, DocumentStore, InsertOneResult, StoreError, UpdateResult,
};
use crate::domain::model::ObjectId;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

const UNIQUE_VIOLATION: &str = "23505";

/// A document store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        validate_collection(collection)?;
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                seq BIGSERIAL,
                id TEXT PRIMARY KEY,
                doc JSONB NOT NULL
            )",
            collection
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn collection_exists(&self, collection: &str) -> Result<bool, StoreError> {
        validate_collection(collection)?;
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )",
        )
        .bind(collection)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert_one(
        &self,
        collection: &str,
        id: ObjectId,
        doc: JsonValue,
    ) -> Result<InsertOneResult, StoreError> {
        validate_collection(collection)?;
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", collection);
        let result = sqlx::query(&sql)
            .bind(id.to_hex())
            .bind(doc)
            .execute(&self.pool)
            .await;
        match result {
            Ok(_) => Ok(InsertOneResult { inserted_id: id }),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(StoreError::DuplicateId {
                    collection: collection.to_string(),
                    id,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_one(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<JsonValue>, StoreError> {
        validate_collection(collection)?;
        let sql = format!("SELECT doc FROM {} WHERE id = $1", collection);
        let row = sqlx::query(&sql)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(row.try_get::<JsonValue, _>("doc")?)),
            None => Ok(None),
        }
    }

    async fn update_one(
        &self,
        collection: &str,
        id: ObjectId,
        changes: JsonValue,
    ) -> Result<UpdateResult, StoreError> {
        validate_collection(collection)?;
        let changes = JsonValue::Object(expect_object(changes)?);
        let sql = format!("UPDATE {} SET doc = doc || $2 WHERE id = $1", collection);
        let result = sqlx::query(&sql)
            .bind(id.to_hex())
            .bind(changes)
            .execute(&self.pool)
            .await?;
        Ok(UpdateResult {
            matched_count: result.rows_affected(),
        })
    }

    async fn delete_one(&self, collection: &str, id: ObjectId) -> Result<u64, StoreError> {
        validate_collection(collection)?;
        let sql = format!("DELETE FROM {} WHERE id = $1", collection);
        let result = sqlx::query(&sql)
            .bind(id.to_hex())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        validate_collection(collection)?;
        let sql = format!("SELECT doc FROM {} ORDER BY seq", collection);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            docs.push(row.try_get::<JsonValue, _>("doc")?);
        }
        Ok(docs)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
