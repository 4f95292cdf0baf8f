use thiserror::Error;

/// Input problems caught before any store call. Never persisted, reported
/// straight back to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("Password must contain at least one number")]
    PasswordNeedsDigit,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Quantity cannot be negative")]
    NegativeQuantity,
}

pub const MIN_PASSWORD_LEN: usize = 8;

/// Require a non-empty value after trimming.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Password rules for registration and password change: minimum length and
/// at least one digit.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let p = password.trim();
    require("Password", p)?;
    if p.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if !p.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordNeedsDigit);
    }
    Ok(())
}

/// Password plus its confirmation field.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    validate_password(password)?;
    if password.trim() != confirm.trim() {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Field checks for a new inventory item. Quantity is `None` when the
/// caller left it blank; it then defaults to 0 at the service layer.
pub fn validate_new_item(
    name: &str,
    upc: &str,
    sku: &str,
    quantity: Option<i64>,
) -> Result<(), ValidationError> {
    require("Name", name)?;
    require("UPC", upc)?;
    require("SKU", sku)?;
    if quantity.is_some_and(|q| q < 0) {
        return Err(ValidationError::NegativeQuantity);
    }
    Ok(())
}
