//! Test fixtures.

use crate::recommend::{BrewRecord, TasteFeedback};

/// A logged brew with no feedback attached.
pub fn brew(water_ml: f64, dose_g: f64, grind_setting: f64, ratio: f64) -> BrewRecord {
    BrewRecord {
        water_ml,
        dose_g,
        grind_setting,
        ratio,
        feedback: None,
    }
}

/// Neutral feedback with the given rating and no taste flags.
pub fn feedback(overall_rating: i64) -> TasteFeedback {
    TasteFeedback {
        overall_rating,
        too_strong: false,
        too_weak: false,
        is_sour: false,
        is_bitter: false,
    }
}

/// Attach feedback to a brew.
pub fn with_feedback(mut brew: BrewRecord, feedback: TasteFeedback) -> BrewRecord {
    brew.feedback = Some(feedback);
    brew
}

/// Attach neutral feedback with the given rating.
pub fn rated(brew: BrewRecord, overall_rating: i64) -> BrewRecord {
    with_feedback(brew, feedback(overall_rating))
}
