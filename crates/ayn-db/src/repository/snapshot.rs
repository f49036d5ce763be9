//! # Snapshot Repository
//!
//! Reads and writes whole-collection JSON snapshots in `kv_store`.
//!
//! ## Write Path
//! ```text
//! InventoryStore::record_waste
//!      │  ChangeSet { stock, waste }
//!      ▼
//! put_all([(ayn_stock, "[...]"), (ayn_waste, "[...]")])
//!      │
//!      ▼
//! BEGIN
//!   INSERT .. ON CONFLICT(key) DO UPDATE   ayn_stock
//!   INSERT .. ON CONFLICT(key) DO UPDATE   ayn_waste
//! COMMIT
//! ```
//!
//! Values are stored exactly as serialized; the repository never looks
//! inside them.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::fmt;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

// =============================================================================
// Keys
// =============================================================================

/// The five persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    Stock,
    Recipes,
    Waste,
    Tasks,
    User,
}

impl SnapshotKey {
    pub const ALL: [SnapshotKey; 5] = [
        SnapshotKey::Stock,
        SnapshotKey::Recipes,
        SnapshotKey::Waste,
        SnapshotKey::Tasks,
        SnapshotKey::User,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SnapshotKey::Stock => "ayn_stock",
            SnapshotKey::Recipes => "ayn_recipes",
            SnapshotKey::Waste => "ayn_waste",
            SnapshotKey::Tasks => "ayn_tasks",
            SnapshotKey::User => "ayn_user",
        }
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of reading and decoding one key.
#[derive(Debug)]
pub enum Loaded<T> {
    /// Nothing stored under the key yet.
    Missing,
    /// Something is stored but it does not decode as `T`.
    Malformed(String),
    Value(T),
}

// =============================================================================
// Repository
// =============================================================================

#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Raw stored text for a key.
    pub async fn get_raw(&self, key: SnapshotKey) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Reads and decodes a key. Decode failures are reported, not raised.
    pub async fn load<T: DeserializeOwned>(&self, key: SnapshotKey) -> DbResult<Loaded<T>> {
        let Some(raw) = self.get_raw(key).await? else {
            debug!(key = %key, "Snapshot missing");
            return Ok(Loaded::Missing);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Loaded::Value(value)),
            Err(e) => {
                warn!(key = %key, error = %e, "Snapshot is malformed");
                Ok(Loaded::Malformed(e.to_string()))
            }
        }
    }

    /// Serializes and upserts one key.
    pub async fn put<T: Serialize + ?Sized>(&self, key: SnapshotKey, value: &T) -> DbResult<()> {
        let json = serde_json::to_string(value).map_err(|e| DbError::serialization(key.as_str(), e))?;
        self.put_all(&[(key, json)]).await
    }

    /// Upserts several pre-serialized keys in one transaction.
    pub async fn put_all(&self, entries: &[(SnapshotKey, String)]) -> DbResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        for (key, json) in entries {
            sqlx::query(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key.as_str())
            .bind(json.as_str())
            .bind(now.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(keys = entries.len(), "Snapshots written");
        Ok(())
    }

    /// Removes every stored key. Returns how many rows were deleted.
    pub async fn clear(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM kv_store").execute(&self.pool).await?;
        debug!(rows = result.rows_affected(), "Snapshots cleared");
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> SnapshotRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().snapshots()
    }

    #[tokio::test]
    async fn test_missing_then_put_then_load() {
        let repo = repo().await;

        let loaded: Loaded<Vec<u32>> = repo.load(SnapshotKey::Stock).await.unwrap();
        assert!(matches!(loaded, Loaded::Missing));

        repo.put(SnapshotKey::Stock, &vec![1u32, 2, 3]).await.unwrap();
        match repo.load::<Vec<u32>>(SnapshotKey::Stock).await.unwrap() {
            Loaded::Value(v) => assert_eq!(v, vec![1, 2, 3]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let repo = repo().await;
        repo.put(SnapshotKey::Tasks, "first").await.unwrap();
        repo.put(SnapshotKey::Tasks, "second").await.unwrap();

        assert_eq!(
            repo.get_raw(SnapshotKey::Tasks).await.unwrap().as_deref(),
            Some("\"second\"")
        );
    }

    #[tokio::test]
    async fn test_malformed_is_reported() {
        let repo = repo().await;
        repo.put_all(&[(SnapshotKey::Recipes, "{not json".to_string())])
            .await
            .unwrap();

        let loaded: Loaded<Vec<String>> = repo.load(SnapshotKey::Recipes).await.unwrap();
        assert!(matches!(loaded, Loaded::Malformed(_)));
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = repo().await;
        repo.put(SnapshotKey::Stock, &Vec::<u8>::new()).await.unwrap();
        repo.put(SnapshotKey::User, &Option::<u8>::None).await.unwrap();

        assert_eq!(repo.clear().await.unwrap(), 2);
        assert!(repo.get_raw(SnapshotKey::User).await.unwrap().is_none());
    }

    #[test]
    fn test_key_names() {
        let names: Vec<&str> = SnapshotKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["ayn_stock", "ayn_recipes", "ayn_waste", "ayn_tasks", "ayn_user"]);
    }
}
