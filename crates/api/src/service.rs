//! Shared business logic — framework-agnostic pure functions.
//!
//! Route handlers stay thin adapters: they extract, call into here, and map
//! `ServiceError` to a response.

use brewlog_core::{calc, validate};

use crate::ServiceError;

// ─── Validation ─────────────────────────────────────────────────────────────

/// Validate and normalize an entity display name. Returns the trimmed name.
pub fn validate_entity_name(name: &str, what: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim().to_string();
    if trimmed.is_empty() || trimmed.len() > 120 {
        return Err(ServiceError::BadRequest(format!(
            "{what} must be 1-120 characters"
        )));
    }
    Ok(trimmed)
}

/// Validate a grinder's adjustment range.
pub fn validate_grinder_range(
    min_setting: f64,
    max_setting: f64,
    step_size: f64,
) -> Result<(), ServiceError> {
    if min_setting >= max_setting {
        return Err(ServiceError::BadRequest(
            "min_setting must be less than max_setting".into(),
        ));
    }
    if step_size <= 0.0 {
        return Err(ServiceError::BadRequest("step_size must be positive".into()));
    }
    Ok(())
}

/// Validate the physical inputs of a brew.
pub fn validate_brew_input(water_ml: f64, dose_g: f64) -> Result<(), ServiceError> {
    validate::validate_brew_input(water_ml, dose_g)
        .map_err(|e| ServiceError::BadRequest(e.to_string()))
}

/// Validate a grind setting against the grinder it was made on.
pub fn validate_grind_setting(value: f64, min: f64, max: f64) -> Result<(), ServiceError> {
    validate::validate_grind_setting(value, min, max)
        .map_err(|e| ServiceError::BadRequest(e.to_string()))
}

/// Validate a 1-5 overall rating.
pub fn validate_rating(value: i64) -> Result<(), ServiceError> {
    validate::validate_rating(value).map_err(|e| ServiceError::BadRequest(e.to_string()))
}

// ─── Brew creation ──────────────────────────────────────────────────────────

/// How far a client-supplied ratio may sit from water/dose — one rounding
/// step, so clients rounding to more decimals than we store still pass.
const RATIO_TOLERANCE: f64 = 0.1;

/// Ratio to store for a new brew: the client's value when sent, otherwise
/// derived from water and dose. A supplied ratio inconsistent with
/// water/dose is rejected, so stored brews keep `ratio ≈ water / dose`.
/// Callers must validate `dose_g > 0` first.
pub fn resolve_ratio(water_ml: f64, dose_g: f64, ratio: Option<f64>) -> Result<f64, ServiceError> {
    let exact = water_ml / dose_g;
    match ratio {
        Some(r) if (r - exact).abs() > RATIO_TOLERANCE => Err(ServiceError::BadRequest(format!(
            "ratio {r} does not match water/dose (expected about {})",
            calc::round_tenth(exact)
        ))),
        Some(r) => Ok(r),
        None => Ok(calc::round_tenth(exact)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_names_are_trimmed() {
        assert_eq!(
            validate_entity_name("  Odd Kin  ", "bean name").unwrap(),
            "Odd Kin"
        );
        assert!(validate_entity_name("", "bean name").is_err());
        assert!(validate_entity_name("   ", "bean name").is_err());
        assert!(validate_entity_name(&"x".repeat(121), "bean name").is_err());
        assert!(validate_entity_name(&"x".repeat(120), "bean name").is_ok());
    }

    #[test]
    fn grinder_range_must_be_ordered() {
        assert!(validate_grinder_range(1.0, 40.0, 1.0).is_ok());
        assert!(validate_grinder_range(40.0, 1.0, 1.0).is_err());
        assert!(validate_grinder_range(1.0, 1.0, 1.0).is_err());
        assert!(validate_grinder_range(1.0, 40.0, 0.0).is_err());
    }

    #[test]
    fn ratio_is_derived_when_omitted() {
        assert_eq!(resolve_ratio(300.0, 20.0, None), Ok(15.0));
        assert_eq!(resolve_ratio(250.0, 15.0, None), Ok(16.7));
    }

    #[test]
    fn supplied_ratio_must_match_water_and_dose() {
        // exact and within-one-step values pass through unrounded
        assert_eq!(resolve_ratio(300.0, 20.0, Some(15.0)), Ok(15.0));
        assert_eq!(resolve_ratio(250.0, 15.0, Some(16.67)), Ok(16.67));
        // a stray value can't store a brew with ratio != water/dose
        assert!(resolve_ratio(300.0, 20.0, Some(16.0)).is_err());
        assert!(resolve_ratio(300.0, 20.0, Some(14.8)).is_err());
    }
}
