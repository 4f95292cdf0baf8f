//! Local inventory tracking: two independent SQLite-backed stores (items
//! and login credentials), the validation that fronts them, and the
//! out-of-stock alert contract. Single device, single writer; there is no
//! network surface.

pub mod alerts;
pub mod credentials;
pub mod db;
pub mod errors;
pub mod inventory;
pub mod service;
pub mod structs;
pub mod utils;
pub mod validate;

pub use alerts::{LogStockAlert, StockAlertNotifier};
pub use credentials::CredentialStore;
pub use errors::{AddItemError, AppError, ChangePasswordError, RegisterError};
pub use inventory::InventoryStore;
pub use service::{AccountService, InventoryService};
pub use structs::{Item, QuantityChange, User};
pub use validate::ValidationError;

/// Initialise env_logger with an `info` default. Safe to call more than
/// once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("info")).try_init();
}
