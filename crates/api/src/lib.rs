//! Shared API types and SQL builders for brewlog.
//!
//! This crate is the single source of truth for all request/response types
//! exchanged between the server and the web UI.

use serde::{Deserialize, Serialize};

pub mod db;
pub mod service;

// Re-export core types that appear in requests/responses
pub use brewlog_core::calc::BrewField;
pub use brewlog_core::recommend::{Confidence, RecommendationSource};

// ─── Shared Enums ────────────────────────────────────────────────────────────

/// Roast level of a coffee bean.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoastLevel {
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl RoastLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Light => "light",
            Self::MediumLight => "medium_light",
            Self::Medium => "medium",
            Self::MediumDark => "medium_dark",
            Self::Dark => "dark",
        }
    }

    /// Parse the stored TEXT form back into the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "medium_light" => Some(Self::MediumLight),
            "medium" => Some(Self::Medium),
            "medium_dark" => Some(Self::MediumDark),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a grinder's adjustment scale behaves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    Numeric,
    Stepped,
    Continuous,
}

impl SettingType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Numeric => "numeric",
            Self::Stepped => "stepped",
            Self::Continuous => "continuous",
        }
    }

    /// Parse the stored TEXT form back into the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "numeric" => Some(Self::Numeric),
            "stepped" => Some(Self::Stepped),
            "continuous" => Some(Self::Continuous),
            _ => None,
        }
    }
}

impl std::fmt::Display for SettingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Beans ───────────────────────────────────────────────────────────────────

/// Request body for `POST /api/beans`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBeanRequest {
    pub name: String,
    pub roaster: Option<String>,
    pub origin: Option<String>,
    pub roast_level: RoastLevel,
}

/// Request body for `PUT /api/beans/{id}` — only provided fields change.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBeanRequest {
    pub name: Option<String>,
    pub roaster: Option<String>,
    pub origin: Option<String>,
    pub roast_level: Option<RoastLevel>,
}

/// A coffee bean as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeanResponse {
    pub id: String,
    pub name: String,
    pub roaster: Option<String>,
    pub origin: Option<String>,
    pub roast_level: RoastLevel,
    pub created_at: String,
}

/// Returned by `GET /api/beans`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListBeansResponse {
    pub beans: Vec<BeanResponse>,
}

// ─── Methods ─────────────────────────────────────────────────────────────────

/// Request body for `POST /api/methods`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMethodRequest {
    pub name: String,
}

/// Request body for `PUT /api/methods/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMethodRequest {
    pub name: Option<String>,
}

/// A brew method as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// Returned by `GET /api/methods`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListMethodsResponse {
    pub methods: Vec<MethodResponse>,
}

// ─── Grinders ────────────────────────────────────────────────────────────────

/// Request body for `POST /api/grinders`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGrinderRequest {
    pub name: String,
    pub min_setting: f64,
    pub max_setting: f64,
    pub step_size: f64,
    pub setting_type: SettingType,
}

/// Request body for `PUT /api/grinders/{id}` — only provided fields change.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateGrinderRequest {
    pub name: Option<String>,
    pub min_setting: Option<f64>,
    pub max_setting: Option<f64>,
    pub step_size: Option<f64>,
    pub setting_type: Option<SettingType>,
}

/// A grinder as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrinderResponse {
    pub id: String,
    pub name: String,
    pub min_setting: f64,
    pub max_setting: f64,
    pub step_size: f64,
    pub setting_type: SettingType,
    pub created_at: String,
}

/// Returned by `GET /api/grinders`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListGrindersResponse {
    pub grinders: Vec<GrinderResponse>,
}

// ─── Brews ───────────────────────────────────────────────────────────────────

/// Request body for `POST /api/brews`.
///
/// `ratio` is derived from water and dose when omitted.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBrewRequest {
    pub bean_id: String,
    pub method_id: String,
    pub grinder_id: String,
    pub water_ml: f64,
    pub dose_g: f64,
    pub grind_setting: f64,
    pub ratio: Option<f64>,
}

/// One logged brew with its equipment names joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrewSummary {
    pub id: String,
    pub bean_id: String,
    pub bean_name: String,
    pub method_id: String,
    pub method_name: String,
    pub grinder_id: String,
    pub grinder_name: String,
    pub water_ml: f64,
    pub dose_g: f64,
    pub grind_setting: f64,
    pub ratio: f64,
    pub created_at: String,
}

/// Returned by `GET /api/brews`.
#[derive(Debug, Serialize, Deserialize)]
pub struct BrewListResponse {
    pub brews: Vec<BrewSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Query parameters for `GET /api/brews` — pagination and equipment filters.
#[derive(Debug, Serialize, Deserialize)]
pub struct BrewListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    pub bean_id: Option<String>,
    pub method_id: Option<String>,
    pub grinder_id: Option<String>,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    20
}

/// Single brew detail returned by `GET /api/brews/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct BrewDetailResponse {
    #[serde(flatten)]
    pub brew: BrewSummary,
    pub feedback: Vec<FeedbackResponse>,
}

// ─── Feedback ────────────────────────────────────────────────────────────────

/// Request body for `POST /api/brews/{id}/feedback`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFeedbackRequest {
    pub overall_rating: i64,
    #[serde(default)]
    pub too_strong: bool,
    #[serde(default)]
    pub too_weak: bool,
    #[serde(default)]
    pub is_sour: bool,
    #[serde(default)]
    pub is_bitter: bool,
    pub coffee_amount_ml: Option<f64>,
    pub notes: Option<String>,
}

/// A feedback entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub id: String,
    pub brew_id: String,
    pub overall_rating: i64,
    pub too_strong: bool,
    pub too_weak: bool,
    pub is_sour: bool,
    pub is_bitter: bool,
    pub coffee_amount_ml: Option<f64>,
    pub notes: Option<String>,
    pub created_at: String,
}

// ─── Calculator ──────────────────────────────────────────────────────────────

/// Request body for `POST /api/calculator` — one brew-form edit round trip.
#[derive(Debug, Serialize, Deserialize)]
pub struct CalculatorRequest {
    pub water_ml: f64,
    pub dose_g: f64,
    pub ratio: f64,
    /// The field the user just edited.
    pub edited: BrewField,
    #[serde(default)]
    pub ratio_locked: bool,
}

/// The recomputed triple plus which field was derived.
#[derive(Debug, Serialize, Deserialize)]
pub struct CalculatorResponse {
    pub water_ml: f64,
    pub dose_g: f64,
    pub ratio: f64,
    pub derived: BrewField,
}

// ─── Recommendations ─────────────────────────────────────────────────────────

/// Query parameters for `GET /api/recommendations`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationQuery {
    pub bean_id: String,
    pub method_id: String,
    pub grinder_id: String,
}

/// Returned by `GET /api/recommendations`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub water_ml: f64,
    pub dose_g: f64,
    pub grind_setting: f64,
    pub ratio: f64,
    pub confidence: Confidence,
    pub source: RecommendationSource,
    pub sample_count: usize,
}

impl From<brewlog_core::recommend::Recommendation> for RecommendationResponse {
    fn from(rec: brewlog_core::recommend::Recommendation) -> Self {
        Self {
            water_ml: rec.target.water_ml,
            dose_g: rec.target.dose_g,
            grind_setting: rec.target.grind_setting,
            ratio: rec.target.ratio,
            confidence: rec.confidence,
            source: rec.source,
            sample_count: rec.sample_count,
        }
    }
}

// ─── Health & Metrics ────────────────────────────────────────────────────────

/// Per-table row counts reported by the health check.
#[derive(Debug, Serialize, Deserialize)]
pub struct TableCounts {
    pub beans: i64,
    pub methods: i64,
    pub grinders: i64,
    pub brews: i64,
    pub brew_feedback: i64,
}

/// Returned by `GET /api/health` — database connectivity plus row counts.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub tables: TableCounts,
}

/// Returned by `GET /api/metrics` — service info and aggregate totals.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub service: String,
    pub version: String,
    pub started_at: String,
    pub uptime_seconds: i64,
    pub brews_recorded: i64,
    pub feedback_recorded: i64,
    pub average_rating: Option<f64>,
}

// ─── Misc ────────────────────────────────────────────────────────────────────

/// Generic success response for operations that don't return data.
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub success: bool,
}

/// JSON error shape `{"success": false, "error": "..."}` returned by all
/// error responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// ─── Service Error ───────────────────────────────────────────────────────────

/// Framework-agnostic service error.
///
/// Each variant maps to an HTTP status code; the server converts this into
/// its response type at the handler boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ServiceError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ServiceError {
    /// HTTP status code as a `u16`.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Internal(m) => m,
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ServiceError {}

impl From<&ServiceError> for ApiError {
    fn from(e: &ServiceError) -> Self {
        ApiError::new(e.message())
    }
}
