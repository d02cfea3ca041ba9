//! Brew parameter recommendations from logged history.
//!
//! Strategies are tried in a fixed priority order; the first one with an
//! answer wins:
//! 1. average of well-rated brews
//! 2. taste-flag adjustment of the most recent brew
//! 3. the most recent brew as-is
//! 4. per-method defaults

use serde::{Deserialize, Serialize};

use crate::calc::{round_ml, round_tenth};
use crate::defaults;

/// Ratio bounds for the taste-flag adjustment.
const RATIO_ADJUST_MAX: f64 = 20.0;
const RATIO_ADJUST_MIN: f64 = 10.0;
/// Coarsest reachable grind step for the adjustment.
const GRIND_ADJUST_FLOOR: f64 = 1.0;

/// Taste feedback attached to a logged brew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasteFeedback {
    pub overall_rating: i64,
    pub too_strong: bool,
    pub too_weak: bool,
    pub is_sour: bool,
    pub is_bitter: bool,
}

impl TasteFeedback {
    /// A brew counts as "good" when it rated 4+ and tasted clean.
    pub fn is_good(&self) -> bool {
        self.overall_rating >= 4 && !self.has_negative_flags()
    }

    pub fn has_negative_flags(&self) -> bool {
        self.too_strong || self.too_weak || self.is_sour || self.is_bitter
    }
}

/// One logged brew, as consumed by the recommender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrewRecord {
    pub water_ml: f64,
    pub dose_g: f64,
    pub grind_setting: f64,
    pub ratio: f64,
    pub feedback: Option<TasteFeedback>,
}

impl BrewRecord {
    /// The parameter set this brew used.
    pub fn target(&self) -> BrewTarget {
        BrewTarget {
            water_ml: self.water_ml,
            dose_g: self.dose_g,
            grind_setting: self.grind_setting,
            ratio: self.ratio,
        }
    }
}

/// A full parameter set to brew with next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrewTarget {
    pub water_ml: f64,
    pub dose_g: f64,
    pub grind_setting: f64,
    pub ratio: f64,
}

/// How much history backs a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which strategy produced the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    GoodBrewAverage,
    FeedbackAdjustment,
    LastBrew,
    MethodDefaults,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::GoodBrewAverage => "good_brew_average",
            Self::FeedbackAdjustment => "feedback_adjustment",
            Self::LastBrew => "last_brew",
            Self::MethodDefaults => "method_defaults",
        }
    }
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommendation plus the evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub target: BrewTarget,
    pub confidence: Confidence,
    pub source: RecommendationSource,
    pub sample_count: usize,
}

/// Recommend parameters for the next brew.
///
/// `history` holds the brews already logged for one bean/method/grinder
/// combination, most recent first. `method_name` feeds the default table
/// when there is no history at all.
pub fn recommend(history: &[BrewRecord], method_name: &str) -> Recommendation {
    good_brew_average(history)
        .or_else(|| feedback_adjustment(history))
        .or_else(|| last_brew(history))
        .unwrap_or_else(|| method_default(method_name))
}

/// Strategy 1: average the brews rated 4+ with no taste complaints.
fn good_brew_average(history: &[BrewRecord]) -> Option<Recommendation> {
    let good: Vec<&BrewRecord> = history
        .iter()
        .filter(|b| b.feedback.is_some_and(|f| f.is_good()))
        .collect();
    if good.is_empty() {
        return None;
    }

    let n = good.len() as f64;
    let target = BrewTarget {
        water_ml: round_ml(good.iter().map(|b| b.water_ml).sum::<f64>() / n),
        dose_g: round_tenth(good.iter().map(|b| b.dose_g).sum::<f64>() / n),
        grind_setting: round_tenth(good.iter().map(|b| b.grind_setting).sum::<f64>() / n),
        ratio: round_tenth(good.iter().map(|b| b.ratio).sum::<f64>() / n),
    };
    let confidence = match good.len() {
        1 => Confidence::Low,
        2 => Confidence::Medium,
        _ => Confidence::High,
    };
    Some(Recommendation {
        target,
        confidence,
        source: RecommendationSource::GoodBrewAverage,
        sample_count: good.len(),
    })
}

/// Strategy 2: nudge the most recent brew by the taste flags.
///
/// Vote counting across all feedback: a strong-vs-weak majority moves the
/// ratio one point (clamped to 10..=20); any sour vote drops the grind one
/// step (floored at 1); any bitter vote raises it one step.
fn feedback_adjustment(history: &[BrewRecord]) -> Option<Recommendation> {
    let latest = history.first()?;
    let votes: Vec<TasteFeedback> = history.iter().filter_map(|b| b.feedback).collect();
    if votes.is_empty() {
        return None;
    }

    let strong = votes.iter().filter(|f| f.too_strong).count();
    let weak = votes.iter().filter(|f| f.too_weak).count();

    let mut target = latest.target();
    if strong > weak {
        target.ratio = (target.ratio + 1.0).min(RATIO_ADJUST_MAX);
    } else if weak > strong {
        target.ratio = (target.ratio - 1.0).max(RATIO_ADJUST_MIN);
    }
    if votes.iter().any(|f| f.is_sour) {
        target.grind_setting = (target.grind_setting - 1.0).max(GRIND_ADJUST_FLOOR);
    }
    if votes.iter().any(|f| f.is_bitter) {
        target.grind_setting += 1.0;
    }

    let confidence = if history.len() >= 3 {
        Confidence::Medium
    } else {
        Confidence::Low
    };
    Some(Recommendation {
        target,
        confidence,
        source: RecommendationSource::FeedbackAdjustment,
        sample_count: history.len(),
    })
}

/// Strategy 3: repeat the most recent brew.
fn last_brew(history: &[BrewRecord]) -> Option<Recommendation> {
    let latest = history.first()?;
    Some(Recommendation {
        target: latest.target(),
        confidence: Confidence::Low,
        source: RecommendationSource::LastBrew,
        sample_count: 1,
    })
}

/// Strategy 4: the built-in defaults for the method.
fn method_default(method_name: &str) -> Recommendation {
    Recommendation {
        target: defaults::method_defaults(method_name),
        confidence: Confidence::Low,
        source: RecommendationSource::MethodDefaults,
        sample_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn averages_well_rated_brews() {
        let history = vec![
            testing::rated(testing::brew(300.0, 20.0, 15.0, 15.0), 5),
            testing::rated(testing::brew(320.0, 20.0, 16.0, 16.0), 4),
            testing::rated(testing::brew(310.0, 20.0, 17.0, 17.0), 4),
        ];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.source, RecommendationSource::GoodBrewAverage);
        assert_eq!(rec.confidence, Confidence::High);
        assert_eq!(rec.sample_count, 3);
        assert_eq!(rec.target.water_ml, 310.0);
        assert_eq!(rec.target.dose_g, 20.0);
        assert_eq!(rec.target.grind_setting, 16.0);
        assert_eq!(rec.target.ratio, 16.0);
    }

    #[test]
    fn good_average_ignores_poorly_rated_brews() {
        let history = vec![
            testing::rated(testing::brew(400.0, 25.0, 20.0, 16.0), 2),
            testing::rated(testing::brew(300.0, 20.0, 15.0, 15.0), 4),
        ];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.source, RecommendationSource::GoodBrewAverage);
        assert_eq!(rec.confidence, Confidence::Low);
        assert_eq!(rec.sample_count, 1);
        assert_eq!(rec.target.water_ml, 300.0);
    }

    #[test]
    fn two_good_brews_give_medium_confidence() {
        let history = vec![
            testing::rated(testing::brew(300.0, 20.0, 15.0, 15.0), 4),
            testing::rated(testing::brew(320.0, 20.0, 15.0, 16.0), 5),
        ];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.confidence, Confidence::Medium);
    }

    #[test]
    fn flagged_brews_are_not_good_even_when_rated_high() {
        let mut fb = testing::feedback(5);
        fb.is_bitter = true;
        let history = vec![testing::with_feedback(
            testing::brew(300.0, 20.0, 15.0, 15.0),
            fb,
        )];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.source, RecommendationSource::FeedbackAdjustment);
    }

    #[test]
    fn strong_majority_raises_ratio() {
        let mut fb = testing::feedback(2);
        fb.too_strong = true;
        let history = vec![testing::with_feedback(
            testing::brew(320.0, 20.0, 15.0, 16.0),
            fb,
        )];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.source, RecommendationSource::FeedbackAdjustment);
        assert_eq!(rec.target.ratio, 17.0);
        assert_eq!(rec.target.water_ml, 320.0);
        assert_eq!(rec.target.grind_setting, 15.0);
    }

    #[test]
    fn ratio_adjustment_caps_at_twenty() {
        let mut fb = testing::feedback(2);
        fb.too_strong = true;
        let history = vec![testing::with_feedback(
            testing::brew(400.0, 20.0, 15.0, 20.0),
            fb,
        )];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.target.ratio, 20.0);
    }

    #[test]
    fn weak_majority_lowers_ratio_with_floor() {
        let mut fb = testing::feedback(2);
        fb.too_weak = true;
        let history = vec![testing::with_feedback(
            testing::brew(200.0, 20.0, 15.0, 10.0),
            fb,
        )];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.target.ratio, 10.0);
    }

    #[test]
    fn strong_weak_tie_leaves_ratio_alone() {
        let mut strong = testing::feedback(2);
        strong.too_strong = true;
        let mut weak = testing::feedback(2);
        weak.too_weak = true;
        let history = vec![
            testing::with_feedback(testing::brew(320.0, 20.0, 15.0, 16.0), strong),
            testing::with_feedback(testing::brew(300.0, 20.0, 15.0, 15.0), weak),
        ];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.target.ratio, 16.0);
    }

    #[test]
    fn sour_votes_drop_grind_with_floor() {
        let mut fb = testing::feedback(3);
        fb.is_sour = true;
        let history = vec![testing::with_feedback(
            testing::brew(300.0, 20.0, 1.0, 15.0),
            fb,
        )];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.target.grind_setting, 1.0);
    }

    #[test]
    fn bitter_votes_raise_grind() {
        let mut fb = testing::feedback(3);
        fb.is_bitter = true;
        let history = vec![testing::with_feedback(
            testing::brew(300.0, 20.0, 15.0, 15.0),
            fb,
        )];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.target.grind_setting, 16.0);
    }

    #[test]
    fn three_brews_analyzed_give_medium_confidence() {
        let mut fb = testing::feedback(2);
        fb.too_weak = true;
        let history = vec![
            testing::with_feedback(testing::brew(300.0, 20.0, 15.0, 15.0), fb),
            testing::brew(310.0, 20.0, 15.0, 15.5),
            testing::brew(320.0, 20.0, 15.0, 16.0),
        ];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.source, RecommendationSource::FeedbackAdjustment);
        assert_eq!(rec.confidence, Confidence::Medium);
        assert_eq!(rec.sample_count, 3);
    }

    #[test]
    fn history_without_feedback_repeats_last_brew() {
        let history = vec![
            testing::brew(310.0, 18.0, 14.0, 17.2),
            testing::brew(320.0, 20.0, 15.0, 16.0),
        ];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.source, RecommendationSource::LastBrew);
        assert_eq!(rec.confidence, Confidence::Low);
        assert_eq!(rec.sample_count, 1);
        assert_eq!(rec.target, testing::brew(310.0, 18.0, 14.0, 17.2).target());
    }

    #[test]
    fn empty_history_falls_back_to_method_defaults() {
        let rec = recommend(&[], "Espresso");
        assert_eq!(rec.source, RecommendationSource::MethodDefaults);
        assert_eq!(rec.confidence, Confidence::Low);
        assert_eq!(rec.sample_count, 0);
        assert_eq!(rec.target.water_ml, 60.0);
        assert_eq!(rec.target.dose_g, 18.0);
        assert_eq!(rec.target.grind_setting, 5.0);
        assert_eq!(rec.target.ratio, 3.0);
    }

    #[test]
    fn good_average_wins_over_flag_adjustment() {
        let mut flagged = testing::feedback(1);
        flagged.too_strong = true;
        let history = vec![
            testing::with_feedback(testing::brew(400.0, 20.0, 12.0, 20.0), flagged),
            testing::rated(testing::brew(300.0, 20.0, 15.0, 15.0), 5),
        ];
        let rec = recommend(&history, "V60");
        assert_eq!(rec.source, RecommendationSource::GoodBrewAverage);
        assert_eq!(rec.target.ratio, 15.0);
    }
}
