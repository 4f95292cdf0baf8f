use std::sync::Arc;

use crate::{
    alerts::{alert_on_zero_crossing, StockAlertNotifier},
    credentials::CredentialStore,
    errors::{AddItemError, AppError, ChangePasswordError, RegisterError},
    inventory::InventoryStore,
    structs::{Item, QuantityChange},
    validate,
};

/// Account flows composed over the credential store: registration, login
/// and password change, with all validation done up front.
#[derive(Debug, Clone)]
pub struct AccountService {
    store: CredentialStore,
}

impl AccountService {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Create an account. Probes for an existing username first so the
    /// caller gets a field-specific error instead of a bare constraint
    /// violation; the constraint still backstops a race.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm: &str,
        employee_name: Option<&str>,
    ) -> Result<i64, RegisterError> {
        validate::require("Username", username)?;
        validate::validate_new_password(password, confirm)?;

        if self.store.user_exists(username).await? {
            return Err(RegisterError::UsernameTaken);
        }

        match self.store.create_user(username, password, employee_name).await {
            Ok(id) => Ok(id),
            Err(AppError::Conflict) => Err(RegisterError::UsernameTaken),
            Err(e) => Err(e.into()),
        }
    }

    /// True iff the exact username/password pair is on file.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, AppError> {
        self.store.validate_login(username, password).await
    }

    /// Change a password after verifying the current one.
    pub async fn change_password(
        &self,
        username: &str,
        current: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<(), ChangePasswordError> {
        validate::validate_new_password(new_password, confirm)?;

        if !self.store.validate_login(username, current).await? {
            log::warn!("Password change refused, current password wrong: {}", username);
            return Err(ChangePasswordError::WrongPassword);
        }

        let rows = self.store.change_password(username, new_password).await?;
        if rows == 0 {
            return Err(ChangePasswordError::UserNotFound);
        }
        Ok(())
    }
}

/// Inventory flows composed over the item store plus the stock-alert
/// notifier. This is where the zero-crossing contract is enforced: every
/// quantity write that lands on zero from a positive value notifies exactly
/// once.
#[derive(Clone)]
pub struct InventoryService {
    store: InventoryStore,
    alerts: Arc<dyn StockAlertNotifier>,
}

impl InventoryService {
    pub fn new(store: InventoryStore, alerts: Arc<dyn StockAlertNotifier>) -> Self {
        Self { store, alerts }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Add one item. Sku and upc are probed separately so a duplicate gets
    /// reported against the right field. Quantity defaults to 0.
    pub async fn add_item(
        &self,
        name: &str,
        upc: &str,
        sku: &str,
        description: Option<&str>,
        quantity: Option<i64>,
    ) -> Result<i64, AddItemError> {
        validate::validate_new_item(name, upc, sku, quantity)?;

        if self.store.item_exists_by_sku(sku).await? {
            return Err(AddItemError::DuplicateSku);
        }
        if self.store.item_exists_by_upc(upc).await? {
            return Err(AddItemError::DuplicateUpc);
        }

        let id = self
            .store
            .create_item(name, upc, sku, description, quantity.unwrap_or(0))
            .await?;
        Ok(id)
    }

    /// Relative quantity change, flooring at zero. Fails with
    /// [`AppError::NotFound`] when the sku does not exist.
    pub async fn adjust_quantity(&self, sku: &str, delta: i64) -> Result<QuantityChange, AppError> {
        let change = self
            .store
            .adjust_quantity_by_sku(sku, delta)
            .await?
            .ok_or(AppError::NotFound)?;
        alert_on_zero_crossing(&change, self.alerts.as_ref());
        Ok(change)
    }

    /// Absolute quantity set, clamped at zero.
    pub async fn set_quantity(&self, sku: &str, quantity: i64) -> Result<QuantityChange, AppError> {
        let change = self
            .store
            .update_quantity_by_sku(sku, quantity)
            .await?
            .ok_or(AppError::NotFound)?;
        alert_on_zero_crossing(&change, self.alerts.as_ref());
        Ok(change)
    }

    pub async fn item(&self, sku: &str) -> Result<Item, AppError> {
        self.store.get_item_by_sku(sku).await?.ok_or(AppError::NotFound)
    }

    pub async fn all_items(&self) -> Result<Vec<Item>, AppError> {
        self.store.list_all_items().await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Item>, AppError> {
        self.store.list_items_by_name(query).await
    }

    pub async fn out_of_stock(&self) -> Result<Vec<Item>, AppError> {
        self.store.list_items_with_zero_qty().await
    }

    /// Remove an item by sku; missing sku is a user-visible failure.
    pub async fn remove_item(&self, sku: &str) -> Result<(), AppError> {
        if self.store.delete_by_sku(sku).await? == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Remove an item by row id.
    pub async fn remove_item_by_id(&self, id: i64) -> Result<(), AppError> {
        if self.store.delete_item_by_id(id).await? == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
