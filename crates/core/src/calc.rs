//! Water/dose/ratio derivation for the brew form.
//!
//! The three values are interdependent (`ratio = water / dose`). Every edit
//! recomputes exactly one of the other two; which one depends on the edited
//! field and whether the ratio is locked.

use serde::{Deserialize, Serialize};

/// The interdependent brew parameter triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrewParams {
    pub water_ml: f64,
    pub dose_g: f64,
    pub ratio: f64,
}

/// One of the three brew form fields.
///
/// Doubles as "the field the user edited" and "the field the calculator
/// derives" — the two are resolved against each other by [`derived_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrewField {
    Water,
    Dose,
    Ratio,
}

/// Resolve which field an edit recomputes.
///
/// Unlocked: editing water or dose rederives the ratio; editing the ratio
/// rederives water. Locked: the ratio is held, so editing water rederives
/// the dose and editing the dose (or the ratio itself) rederives water.
pub fn derived_field(edited: BrewField, ratio_locked: bool) -> BrewField {
    match (edited, ratio_locked) {
        (BrewField::Water, false) | (BrewField::Dose, false) => BrewField::Ratio,
        (BrewField::Water, true) => BrewField::Dose,
        (BrewField::Dose, true) | (BrewField::Ratio, _) => BrewField::Water,
    }
}

/// Recompute `derived` from the other two fields.
///
/// A derivation that would divide by zero leaves the triple untouched.
pub fn solve_for(params: BrewParams, derived: BrewField) -> BrewParams {
    let mut next = params;
    match derived {
        BrewField::Ratio => {
            if params.dose_g != 0.0 {
                next.ratio = round_tenth(params.water_ml / params.dose_g);
            }
        }
        BrewField::Dose => {
            if params.ratio != 0.0 {
                next.dose_g = round_tenth(params.water_ml / params.ratio);
            }
        }
        BrewField::Water => {
            next.water_ml = round_ml(params.dose_g * params.ratio);
        }
    }
    next
}

/// Apply one form edit: resolve the derived field, then recompute it.
pub fn recalculate(params: BrewParams, edited: BrewField, ratio_locked: bool) -> BrewParams {
    solve_for(params, derived_field(edited, ratio_locked))
}

/// Round a water volume to the nearest whole millilitre.
pub fn round_ml(value: f64) -> f64 {
    value.round()
}

/// Round a dose, grind, or ratio value to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(water_ml: f64, dose_g: f64, ratio: f64) -> BrewParams {
        BrewParams {
            water_ml,
            dose_g,
            ratio,
        }
    }

    #[test]
    fn editing_dose_unlocked_rederives_ratio() {
        let next = recalculate(params(300.0, 20.0, 12.0), BrewField::Dose, false);
        assert_eq!(next, params(300.0, 20.0, 15.0));
    }

    #[test]
    fn editing_ratio_rederives_water() {
        let next = recalculate(params(100.0, 20.0, 16.0), BrewField::Ratio, false);
        assert_eq!(next, params(320.0, 20.0, 16.0));
    }

    #[test]
    fn locked_ratio_keeps_ratio_on_water_edit() {
        let next = recalculate(params(340.0, 15.0, 17.0), BrewField::Water, true);
        assert_eq!(next, params(340.0, 20.0, 17.0));
    }

    #[test]
    fn locked_ratio_rederives_water_on_dose_edit() {
        let next = recalculate(params(250.0, 18.0, 3.0), BrewField::Dose, true);
        assert_eq!(next, params(54.0, 18.0, 3.0));
    }

    #[test]
    fn zero_dose_skips_ratio_derivation() {
        let before = params(300.0, 0.0, 16.0);
        assert_eq!(recalculate(before, BrewField::Water, false), before);
    }

    #[test]
    fn zero_ratio_skips_dose_derivation() {
        let before = params(300.0, 20.0, 0.0);
        assert_eq!(recalculate(before, BrewField::Water, true), before);
    }

    #[test]
    fn exactly_one_field_changes_per_edit() {
        let before = params(300.0, 20.0, 12.0);
        let cases = [
            (BrewField::Water, false),
            (BrewField::Dose, false),
            (BrewField::Ratio, false),
            (BrewField::Water, true),
            (BrewField::Dose, true),
            (BrewField::Ratio, true),
        ];
        for (edited, locked) in cases {
            let after = recalculate(before, edited, locked);
            let derived = derived_field(edited, locked);
            let changed = [
                (BrewField::Water, after.water_ml != before.water_ml),
                (BrewField::Dose, after.dose_g != before.dose_g),
                (BrewField::Ratio, after.ratio != before.ratio),
            ];
            for (field, did_change) in changed {
                if did_change {
                    assert_eq!(field, derived, "unexpected change for {edited:?}/{locked}");
                }
                assert_ne!(
                    (field, did_change),
                    (edited, true),
                    "edited field was overwritten"
                );
            }
        }
    }

    #[test]
    fn ratio_rounds_to_one_decimal() {
        let next = recalculate(params(250.0, 15.0, 1.0), BrewField::Water, false);
        assert_eq!(next.ratio, 16.7);
    }

    #[test]
    fn fields_serialize_as_snake_case() {
        assert_eq!(serde_json::to_string(&BrewField::Water).unwrap(), "\"water\"");
        let parsed: BrewField = serde_json::from_str("\"ratio\"").unwrap();
        assert_eq!(parsed, BrewField::Ratio);
    }
}
