// =============================================================================
// Surge Backend - Prediction API
// =============================================================================
// Endpoints for festival, pollution, staff, and combined predictions.
// Raw request fields are validated here; the estimators in surge-core only
// ever see typed, in-range inputs.
// =============================================================================

use std::collections::HashSet;

use axum::{extract::Query, response::IntoResponse, Json};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use surge_core::festival::{self, FestivalSurgeInput, HistoricalBaseline, Intensity};
use surge_core::pollution::{self, PollutionSurgeInput};
use surge_core::staffing::{self, StaffRequirementInput};

use crate::error::ApiError;

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct FestivalPredictionRequest {
    pub festival_name: String,
    /// ISO date ("2024-11-01") or RFC 3339 datetime
    pub start_date: String,
    pub end_date: String,
    pub festival_intensity: Intensity,
    pub historical_data: Option<HistoricalBaseline>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PollutionPredictionRequest {
    pub aqi: f64,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub location: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StaffForecastRequest {
    pub predicted_patient_inflow: u32,
    pub current_staff_count: Option<u32>,
    pub department: Option<String>,
    pub shift_type: Option<String>,
}

/// Envelope for the single-signal prediction endpoints.
#[derive(Debug, Serialize)]
pub struct PredictionResponse<T: Serialize> {
    pub success: bool,
    pub prediction_type: &'static str,
    #[serde(flatten)]
    pub prediction: T,
}

#[derive(Debug, Serialize)]
pub struct StaffForecastResponse {
    pub success: bool,
    pub forecast_type: &'static str,
    #[serde(flatten)]
    pub forecast: staffing::StaffForecast,
}

#[derive(Debug, Deserialize)]
pub struct CombinedPredictionQuery {
    pub festival_name: Option<String>,
    pub festival_start: Option<String>,
    pub festival_end: Option<String>,
    pub festival_intensity: Option<Intensity>,
    pub aqi: Option<f64>,
    pub location: Option<String>,
}

/// Per-signal sub-results; a missing signal produces no entry.
#[derive(Debug, Serialize)]
pub struct CombinedPredictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub festival: Option<festival::FestivalSurgePrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollution: Option<pollution::PollutionSurgePrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff: Option<staffing::StaffForecast>,
}

#[derive(Debug, Serialize)]
pub struct CombinedPredictionResponse {
    pub success: bool,
    pub combined_predicted_inflow: u32,
    pub predictions: CombinedPredictions,
    pub all_recommendations: Vec<String>,
}

// =============================================================================
// Validation Helpers
// =============================================================================

/// Parse a calendar date from either a plain ISO date or a full RFC 3339
/// datetime (dashboard clients send both).
fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| ApiError::BadRequest(format!("invalid date: {value}")))
}

/// AQI readings outside the instrument scale never reach the estimator.
fn validate_aqi(aqi: f64) -> Result<f64, ApiError> {
    if !(0.0..=500.0).contains(&aqi) {
        return Err(ApiError::BadRequest(format!(
            "aqi must be within [0, 500], got {aqi}"
        )));
    }
    Ok(aqi)
}

/// Deduplicate merged recommendations, keeping first-occurrence order so
/// combined responses are reproducible.
fn dedup_recommendations(recommendations: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    recommendations
        .into_iter()
        .filter(|rec| seen.insert(rec.clone()))
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// Root discovery listing.
pub async fn service_info() -> impl IntoResponse {
    Json(json!({
        "service": "Hospital Surge Prediction Service",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "festival_prediction": "/api/predict/festival",
            "pollution_prediction": "/api/predict/pollution",
            "staff_forecast": "/api/predict/staff",
            "combined_prediction": "/api/predict/combined",
            "festival_calendar": "/api/festivals",
            "festival_window": "/api/festivals/window",
            "health": "/health"
        }
    }))
}

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
    }))
}

/// Predict patient inflow during a festival window.
pub async fn predict_festival(
    Json(req): Json<FestivalPredictionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = FestivalSurgeInput {
        festival_name: req.festival_name,
        start_date: parse_date(&req.start_date)?,
        end_date: parse_date(&req.end_date)?,
        intensity: req.festival_intensity,
        historical: req.historical_data,
        location: req.location,
    };

    let prediction = festival::estimate(&input)?;
    Ok(Json(PredictionResponse {
        success: true,
        prediction_type: "festival_surge",
        prediction,
    }))
}

/// Predict the respiratory surge for a pollution reading.
pub async fn predict_pollution(
    Json(req): Json<PollutionPredictionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = PollutionSurgeInput {
        aqi: validate_aqi(req.aqi)?,
        pm25: req.pm25,
        pm10: req.pm10,
        location: req.location,
        date: req.date,
    };

    let prediction = pollution::estimate(&input);
    Ok(Json(PredictionResponse {
        success: true,
        prediction_type: "pollution_surge",
        prediction,
    }))
}

/// Forecast staff requirements for a predicted inflow.
pub async fn forecast_staff(
    Json(req): Json<StaffForecastRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = StaffRequirementInput {
        predicted_patients: req.predicted_patient_inflow,
        current_staff: req.current_staff_count,
        department: req.department,
        shift_type: req.shift_type,
    };

    let forecast = staffing::forecast(&input);
    Ok(Json(StaffForecastResponse {
        success: true,
        forecast_type: "staff_requirement",
        forecast,
    }))
}

/// Combined prediction: run whichever estimators have complete input, sum
/// their inflows, and feed the total back through the staff estimator.
pub async fn combined_prediction(
    Query(query): Query<CombinedPredictionQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut total_inflow: u32 = 0;
    let mut all_recommendations = Vec::new();

    let festival_prediction = match (
        &query.festival_name,
        &query.festival_start,
        &query.festival_end,
        query.festival_intensity,
    ) {
        (Some(name), Some(start), Some(end), Some(intensity)) => {
            let input = FestivalSurgeInput {
                festival_name: name.clone(),
                start_date: parse_date(start)?,
                end_date: parse_date(end)?,
                intensity,
                historical: None,
                location: query.location.clone(),
            };
            let prediction = festival::estimate(&input)?;
            total_inflow += prediction.predicted_inflow;
            all_recommendations.extend(prediction.recommendations.iter().cloned());
            Some(prediction)
        }
        _ => None,
    };

    let pollution_prediction = match query.aqi {
        Some(aqi) => {
            let input = PollutionSurgeInput {
                aqi: validate_aqi(aqi)?,
                pm25: None,
                pm10: None,
                location: query.location.clone(),
                date: None,
            };
            let prediction = pollution::estimate(&input);
            total_inflow += prediction.predicted_inflow;
            all_recommendations.extend(prediction.recommendations.iter().cloned());
            Some(prediction)
        }
        None => None,
    };

    let staff_forecast = if total_inflow > 0 {
        let forecast = staffing::forecast(&StaffRequirementInput {
            predicted_patients: total_inflow,
            ..Default::default()
        });
        all_recommendations.extend(forecast.recommendations.iter().cloned());
        Some(forecast)
    } else {
        None
    };

    tracing::info!(
        combined_inflow = total_inflow,
        festival = festival_prediction.is_some(),
        pollution = pollution_prediction.is_some(),
        "combined prediction served"
    );

    Ok(Json(CombinedPredictionResponse {
        success: true,
        combined_predicted_inflow: total_inflow,
        predictions: CombinedPredictions {
            festival: festival_prediction,
            pollution: pollution_prediction,
            staff: staff_forecast,
        },
        all_recommendations: dedup_recommendations(all_recommendations),
    }))
}
