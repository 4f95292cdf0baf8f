use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `users` table. `password` holds the argon2 PHC string,
/// never the cleartext.
#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub employee_name: Option<String>,
}

/// One row of the `items` table. `sku` is the business key every
/// adjustment and lookup goes through; `upc` is a second unique identifier.
#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub upc: String,
    pub sku: String,
    pub short_description: Option<String>,
    pub quantity: i64,
}

/// Outcome of a quantity write. Carrying the pre- and post-write values lets
/// callers detect the positive-to-zero transition without re-reading the row.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct QuantityChange {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub before: i64,
    pub after: i64,
}

impl QuantityChange {
    /// True when this write took the item from in stock to out of stock.
    /// A write that leaves an already-empty item at zero does not count.
    pub fn crossed_zero(&self) -> bool {
        self.before > 0 && self.after == 0
    }
}
