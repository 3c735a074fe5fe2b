// src/services/pricing.rs

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use crate::common::error::AppError;

/// Gross selling price: `purchase_price * (1 + tax_rate_percent / 100)`.
/// Exact decimal arithmetic, no rounding step. A result outside the `Decimal`
/// range is reported against `purchasePrice` as a validation error.
pub fn selling_price(purchase_price: Decimal, tax_rate_percent: Decimal) -> Result<Decimal, AppError> {
    tax_rate_percent
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|rate| Decimal::ONE.checked_add(rate))
        .and_then(|factor| purchase_price.checked_mul(factor))
        .ok_or_else(|| {
            let mut err = ValidationError::new("range");
            err.message = Some("The purchase price is too large to calculate a selling price.".into());
            let mut errors = ValidationErrors::new();
            errors.add("purchasePrice", err);
            AppError::ValidationError(errors)
        })
}
