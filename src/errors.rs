use sqlx::Error as SqlxError;
use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Unique constraint violated")]
    Conflict,

    #[error("Not found")]
    NotFound,

    #[error("Password hashing error: {0}")]
    Password(String),
}

/// Account-registration failure, split so callers can show a field-specific
/// message for a taken username instead of a generic database error.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Username is already taken")]
    UsernameTaken,

    #[error(transparent)]
    Store(#[from] AppError),
}

#[derive(Debug, Error)]
pub enum ChangePasswordError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("No such user")]
    UserNotFound,

    #[error(transparent)]
    Store(#[from] AppError),
}

/// Add-item failure. The items table cannot report which unique column
/// collided, so the service probes sku and upc up front and raises these.
#[derive(Debug, Error)]
pub enum AddItemError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("An item with this SKU already exists")]
    DuplicateSku,

    #[error("An item with this UPC already exists")]
    DuplicateUpc,

    #[error(transparent)]
    Store(#[from] AppError),
}
