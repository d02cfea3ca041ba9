//! Brew input validation shared by the API service layer.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum BrewValidationError {
    #[error("water_ml must be positive, got {value}")]
    NonPositiveWater { value: f64 },
    #[error("dose_g must be positive, got {value}")]
    NonPositiveDose { value: f64 },
    #[error("overall_rating must be between 1 and 5, got {value}")]
    RatingOutOfRange { value: i64 },
    #[error("grind setting {value} is outside the grinder range {min}..{max}")]
    GrindOutOfRange { value: f64, min: f64, max: f64 },
}

/// Check the physical inputs of a brew.
pub fn validate_brew_input(water_ml: f64, dose_g: f64) -> Result<(), BrewValidationError> {
    if water_ml <= 0.0 {
        return Err(BrewValidationError::NonPositiveWater { value: water_ml });
    }
    if dose_g <= 0.0 {
        return Err(BrewValidationError::NonPositiveDose { value: dose_g });
    }
    Ok(())
}

/// Check a 1-5 overall rating.
pub fn validate_rating(value: i64) -> Result<(), BrewValidationError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(BrewValidationError::RatingOutOfRange { value })
    }
}

/// Check a grind setting against the grinder's advertised range.
pub fn validate_grind_setting(value: f64, min: f64, max: f64) -> Result<(), BrewValidationError> {
    if value < min || value > max {
        return Err(BrewValidationError::GrindOutOfRange { value, min, max });
    }
    Ok(())
}
