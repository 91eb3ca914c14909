//! SQLite-backed snapshot store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tokio::sync::Mutex;

use async_trait::async_trait;
use chemtrack_inventory::Product;

use crate::snapshot::{SNAPSHOT_KEY, SnapshotStore, StoreError};

/// SQLite-backed key-value snapshot store.
///
/// One row per key; this application only ever uses [`SNAPSHOT_KEY`]. The
/// connection pool is initialized lazily on first use, so constructing the
/// store never touches the filesystem.
#[derive(Debug, Clone)]
pub struct SqliteSnapshotStore {
    pool: Arc<Mutex<Option<SqlitePool>>>,
    path: PathBuf,
}

impl SqliteSnapshotStore {
    /// Store at the default OS data location
    /// (`{app data dir}/chemtrack/inventory.db`).
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::at_path(default_db_path()?))
    }

    /// Store at an explicit database path (tests, portable installs).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            pool: Arc::new(Mutex::new(None)),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Initialize the database connection (called lazily on first use).
    async fn ensure_initialized(&self) -> anyhow::Result<()> {
        let mut pool_guard = self.pool.lock().await;
        if pool_guard.is_some() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store directory at {parent:?}"))?;
        }

        // mode=rwc creates the database file on first run.
        let db_url = format!("sqlite://{}?mode=rwc", self.path.to_string_lossy());

        let pool = SqlitePool::connect(&db_url)
            .await
            .with_context(|| format!("failed to open SQLite store at {:?}", self.path))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                key      TEXT PRIMARY KEY,
                data     TEXT NOT NULL,
                saved_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create snapshots table")?;

        *pool_guard = Some(pool);
        Ok(())
    }

    /// Get the pool, initializing if necessary.
    async fn get_pool(&self) -> anyhow::Result<SqlitePool> {
        self.ensure_initialized().await?;
        let pool_guard = self.pool.lock().await;
        pool_guard
            .clone()
            .context("snapshot store pool missing after initialization")
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn load(&self) -> Result<Vec<Product>, StoreError> {
        let pool = self
            .get_pool()
            .await
            .map_err(|e| StoreError::Read(format!("{e:#}")))?;

        let row = sqlx::query(
            r#"
            SELECT data
            FROM snapshots
            WHERE key = ?1
            "#,
        )
        .bind(SNAPSHOT_KEY)
        .fetch_optional(&pool)
        .await
        .map_err(|e| StoreError::Read(e.to_string()))?;

        let row = match row {
            Some(row) => row,
            None => return Ok(Vec::new()),
        };

        let data: String = row
            .try_get("data")
            .map_err(|e| StoreError::Read(e.to_string()))?;

        serde_json::from_str(&data).map_err(StoreError::Decode)
    }

    async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(products).map_err(StoreError::Encode)?;

        let pool = self
            .get_pool()
            .await
            .map_err(|e| StoreError::Write(format!("{e:#}")))?;

        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, data, saved_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                data = excluded.data,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(SNAPSHOT_KEY)
        .bind(&payload)
        .bind(&now)
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;

        tracing::debug!(products = products.len(), "persisted inventory snapshot");

        Ok(())
    }
}

/// Resolve the default database path: `{app data dir}/chemtrack/inventory.db`.
fn default_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory")?;

    let mut path = base;
    path.push("chemtrack");
    path.push("inventory.db");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chemtrack_core::ProductId;
    use chemtrack_inventory::{ProductFields, Unit};

    use super::*;

    fn temp_db_path(tag: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "chemtrack-store-test-{}-{tag}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    fn product(id: i64, name: &str, stock: f64) -> Product {
        Product::new(
            ProductId::from_millis(id),
            ProductFields {
                name: name.to_string(),
                stock,
                unit: Unit::Liter,
                min_stock: 10.0,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn fresh_store_loads_empty() {
        let store = SqliteSnapshotStore::at_path(temp_db_path("fresh"));
        let products = store.load().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = SqliteSnapshotStore::at_path(temp_db_path("roundtrip"));
        let products = vec![product(1, "Sulfuric Acid", 50.0), product(2, "Acetone", 3.5)];

        store.save(&products).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, products);
    }

    #[tokio::test]
    async fn save_overwrites_the_previous_snapshot() {
        let store = SqliteSnapshotStore::at_path(temp_db_path("overwrite"));

        store.save(&[product(1, "First", 1.0)]).await.unwrap();
        store
            .save(&[product(2, "Second", 2.0), product(3, "Third", 3.0)])
            .await
            .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name(), "Second");
        assert_eq!(loaded[1].name(), "Third");
    }

    #[tokio::test]
    async fn corrupted_snapshot_reports_decode_error() {
        let store = SqliteSnapshotStore::at_path(temp_db_path("corrupt"));
        store.save(&[product(1, "X", 1.0)]).await.unwrap();

        // Scribble over the stored value behind the adapter's back.
        let pool = store.get_pool().await.unwrap();
        sqlx::query("UPDATE snapshots SET data = ?1 WHERE key = ?2")
            .bind("not json")
            .bind(SNAPSHOT_KEY)
            .execute(&pool)
            .await
            .unwrap();

        let err = store.load().await.unwrap_err();
        match err {
            StoreError::Decode(_) => {}
            other => panic!("expected Decode error, got {other:?}"),
        }
    }
}
