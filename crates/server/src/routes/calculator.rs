use axum::Json;

use brewlog_api::{CalculatorRequest, CalculatorResponse};
use brewlog_core::calc::{self, BrewParams};

/// POST /api/calculator — one brew-form edit round trip. Exactly one field
/// is recomputed; the edited field is never overwritten.
pub async fn calculate(Json(req): Json<CalculatorRequest>) -> Json<CalculatorResponse> {
    let params = BrewParams {
        water_ml: req.water_ml,
        dose_g: req.dose_g,
        ratio: req.ratio,
    };
    let derived = calc::derived_field(req.edited, req.ratio_locked);
    let next = calc::solve_for(params, derived);

    Json(CalculatorResponse {
        water_ml: next.water_ml,
        dose_g: next.dose_g,
        ratio: next.ratio,
        derived,
    })
}
