use common::valuation::{MAX_AMOUNT, is_valid_amount, round_money};
use rust_decimal::Decimal;

use crate::error::AppError;

/// Validate a trimmed item name (1-256 Unicode characters).
pub fn validate_item_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 256 {
        return Err(AppError::Validation(
            "Item name must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Trim an optional text field, turning blank input into `None`.
pub fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Check that a money field fits NUMERIC(10,2) and round it to cents.
pub fn validate_amount(field: &str, value: Option<Decimal>) -> Result<Option<Decimal>, AppError> {
    match value {
        None => Ok(None),
        Some(v) if is_valid_amount(v) => Ok(Some(round_money(v))),
        Some(_) => Err(AppError::Validation(format!(
            "{field} must be between 0 and {MAX_AMOUNT}"
        ))),
    }
}

/// Trim and drop blank entries from a string list.
pub fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
