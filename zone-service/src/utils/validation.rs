//! Input validation helpers
//!
//! Centralized limits and checks applied to zone and assignment payloads
//! before anything is written.

use rust_decimal::Decimal;
use shared::error::AppError;
use shared::models::{AssignmentOverrides, AssignmentUpdate, ZoneForm, ZoneUpdate};

// ── Text length limits ──────────────────────────────────────────────

/// Zone names
pub const MAX_NAME_LEN: usize = 200;

/// Zone descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// A single coverage area entry (postcode, neighbourhood)
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Coverage areas per zone
pub const MAX_COVERAGE_AREAS: usize = 500;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(
            AppError::validation(format!("{field} must not be empty")).with_detail("field", field),
        );
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

fn validate_coverage_areas(areas: &[String]) -> Result<(), AppError> {
    if areas.len() > MAX_COVERAGE_AREAS {
        return Err(AppError::validation(format!(
            "coverage_areas has too many entries ({}, max {MAX_COVERAGE_AREAS})",
            areas.len()
        )));
    }
    for area in areas {
        validate_required_text(area, "coverage_areas", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}

// ── Money ───────────────────────────────────────────────────────────

/// Prices and fees must not be negative.
pub fn validate_money(value: Option<Decimal>, field: &str) -> Result<(), AppError> {
    if let Some(v) = value
        && v < Decimal::ZERO
    {
        return Err(
            AppError::validation(format!("{field} must not be negative")).with_detail("field", field),
        );
    }
    Ok(())
}

/// Percentages live in 0..=100.
pub fn validate_percentage(value: Option<Decimal>, field: &str) -> Result<(), AppError> {
    if let Some(v) = value
        && (v < Decimal::ZERO || v > Decimal::ONE_HUNDRED)
    {
        return Err(
            AppError::validation(format!("{field} must be between 0 and 100"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

fn validate_min_quantity(value: Option<i32>) -> Result<(), AppError> {
    if let Some(q) = value
        && q < 1
    {
        return Err(
            AppError::validation("override_min_order_quantity must be at least 1")
                .with_detail("field", "override_min_order_quantity"),
        );
    }
    Ok(())
}

// ── Payloads ────────────────────────────────────────────────────────

pub fn validate_zone_form(form: &ZoneForm) -> Result<(), AppError> {
    validate_required_text(&form.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&form.description, "description", MAX_NOTE_LEN)?;
    validate_money(Some(form.delivery_fee), "delivery_fee")?;
    validate_money(form.default_b2b_price, "default_b2b_price")?;
    validate_money(form.default_b2c_price, "default_b2c_price")?;
    validate_percentage(form.discount_percentage, "discount_percentage")?;
    validate_coverage_areas(&form.coverage_areas)
}

pub fn validate_zone_update(update: &ZoneUpdate) -> Result<(), AppError> {
    if let Some(name) = &update.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(
        &update.description.clone().flatten(),
        "description",
        MAX_NOTE_LEN,
    )?;
    validate_money(update.delivery_fee, "delivery_fee")?;
    validate_money(update.default_b2b_price.flatten(), "default_b2b_price")?;
    validate_money(update.default_b2c_price.flatten(), "default_b2c_price")?;
    validate_percentage(update.discount_percentage.flatten(), "discount_percentage")?;
    if let Some(areas) = &update.coverage_areas {
        validate_coverage_areas(areas)?;
    }
    Ok(())
}

pub fn validate_overrides(overrides: &AssignmentOverrides) -> Result<(), AppError> {
    validate_money(overrides.override_base_price, "override_base_price")?;
    validate_money(overrides.override_b2b_price, "override_b2b_price")?;
    validate_money(overrides.override_b2c_price, "override_b2c_price")?;
    validate_min_quantity(overrides.override_min_order_quantity)
}

pub fn validate_assignment_update(update: &AssignmentUpdate) -> Result<(), AppError> {
    validate_money(update.override_base_price.flatten(), "override_base_price")?;
    validate_money(update.override_b2b_price.flatten(), "override_b2b_price")?;
    validate_money(update.override_b2c_price.flatten(), "override_b2c_price")?;
    validate_min_quantity(update.override_min_order_quantity.flatten())
}
