use sqlx::SqlitePool;

use crate::{
    db,
    errors::AppError,
    structs::{Item, QuantityChange},
    utils::safe,
};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    upc TEXT NOT NULL UNIQUE,
    sku TEXT NOT NULL UNIQUE,
    short_description TEXT,
    quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0)
);
CREATE INDEX IF NOT EXISTS idx_items_name ON items (name);
";

const ITEM_COLS: &str = "id, name, upc, sku, short_description, quantity";

/// Escape `%`, `_` and `\` so a search string matches literally inside a
/// LIKE pattern instead of acting as wildcards.
fn escape_like(s: &str) -> String {
    s.replace('\\', r"\\").replace('%', r"\%").replace('_', r"\_")
}

/// Repository over the `items` table.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    pool: SqlitePool,
}

impl InventoryStore {
    /// Open (and create if missing) the inventory database at `url`.
    pub async fn open(url: &str) -> Result<Self, AppError> {
        let pool = db::connect(url).await?;
        Self::with_pool(pool).await
    }

    /// Open the database named by `INVENTORY_DATABASE_URL`, or `inventory.db`.
    pub async fn open_default() -> Result<Self, AppError> {
        Self::open(&db::inventory_db_url()).await
    }

    /// In-memory store for tests.
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let pool = db::connect_in_memory().await?;
        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert one item and return its row id. Quantity is clamped to >= 0
    /// before the insert. A sku or upc collision surfaces as
    /// [`AppError::Conflict`]; the constraint cannot say which column
    /// collided, so callers wanting a field-specific message should probe
    /// with [`item_exists_by_sku`](Self::item_exists_by_sku) /
    /// [`item_exists_by_upc`](Self::item_exists_by_upc) first.
    pub async fn create_item(
        &self,
        name: &str,
        upc: &str,
        sku: &str,
        short_description: Option<&str>,
        quantity: i64,
    ) -> Result<i64, AppError> {
        let result = sqlx::query(
            "INSERT INTO items (name, upc, sku, short_description, quantity) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(safe(name))
        .bind(safe(upc))
        .bind(safe(sku))
        .bind(short_description.map(safe))
        .bind(quantity.max(0))
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                log::info!("Item created: sku={}", safe(sku));
                Ok(done.last_insert_rowid())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                log::warn!("Duplicate sku or upc on insert: sku={}", safe(sku));
                Err(AppError::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a sku already exists.
    pub async fn item_exists_by_sku(&self, sku: &str) -> Result<bool, AppError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM items WHERE sku = ?")
            .bind(safe(sku))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Check if a upc already exists.
    pub async fn item_exists_by_upc(&self, upc: &str) -> Result<bool, AppError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM items WHERE upc = ?")
            .bind(safe(upc))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Get one item by sku.
    pub async fn get_item_by_sku(&self, sku: &str) -> Result<Option<Item>, AppError> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLS} FROM items WHERE sku = ?"
        ))
        .bind(safe(sku))
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    /// All items, sorted by name ascending. Case-sensitive ordering; the
    /// search and zero-stock listings below order case-insensitively.
    pub async fn list_all_items(&self) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLS} FROM items ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Items whose name contains `query`, case-insensitive, sorted by name.
    /// Wildcard characters in `query` are matched literally.
    pub async fn list_items_by_name(&self, query: &str) -> Result<Vec<Item>, AppError> {
        let pattern = format!("%{}%", escape_like(&safe(query)));
        let items = sqlx::query_as::<_, Item>(&format!(
            r"SELECT {ITEM_COLS} FROM items WHERE name LIKE ? ESCAPE '\' ORDER BY name COLLATE NOCASE ASC"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Items that are out of stock, sorted by name.
    pub async fn list_items_with_zero_qty(&self) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLS} FROM items WHERE quantity = 0 ORDER BY name COLLATE NOCASE ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Set the quantity for a sku to an absolute value, clamped to >= 0.
    /// Returns `None` when no row matches. The returned [`QuantityChange`]
    /// carries the pre- and post-write values so the caller can detect the
    /// positive-to-zero transition.
    pub async fn update_quantity_by_sku(
        &self,
        sku: &str,
        new_quantity: i64,
    ) -> Result<Option<QuantityChange>, AppError> {
        self.write_quantity(sku, |_current| new_quantity).await
    }

    /// Add or subtract from the quantity for a sku. Decrementing below zero
    /// floors at zero rather than failing; `QuantityChange::before` tells
    /// callers whether the item was already empty.
    pub async fn adjust_quantity_by_sku(
        &self,
        sku: &str,
        delta: i64,
    ) -> Result<Option<QuantityChange>, AppError> {
        self.write_quantity(sku, |current| current + delta).await
    }

    // Read-modify-write in one transaction so two concurrent writes on the
    // same sku cannot both observe the same pre-write quantity.
    async fn write_quantity(
        &self,
        sku: &str,
        new_value: impl FnOnce(i64) -> i64,
    ) -> Result<Option<QuantityChange>, AppError> {
        let sku = safe(sku);
        let mut tx = self.pool.begin().await?;

        let row: Option<(i64, String, i64)> =
            sqlx::query_as("SELECT id, name, quantity FROM items WHERE sku = ?")
                .bind(&sku)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((id, name, before)) = row else {
            return Ok(None);
        };
        let after = new_value(before).max(0);

        sqlx::query("UPDATE items SET quantity = ? WHERE sku = ?")
            .bind(after)
            .bind(&sku)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        log::info!("Quantity for sku={} changed {} -> {}", sku, before, after);
        Ok(Some(QuantityChange {
            id,
            sku,
            name,
            before,
            after,
        }))
    }

    /// Delete one row by id. Returns the number of rows removed.
    pub async fn delete_item_by_id(&self, id: i64) -> Result<u64, AppError> {
        let done = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() > 0 {
            log::info!("Item with id {} deleted", id);
        }
        Ok(done.rows_affected())
    }

    /// Delete one row by sku. Returns the number of rows removed.
    pub async fn delete_by_sku(&self, sku: &str) -> Result<u64, AppError> {
        let sku = safe(sku);
        let done = sqlx::query("DELETE FROM items WHERE sku = ?")
            .bind(&sku)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() > 0 {
            log::info!("Item with sku={} deleted", sku);
        }
        Ok(done.rows_affected())
    }
}
