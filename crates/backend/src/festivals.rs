// =============================================================================
// Surge Backend - Festival Calendar API
// =============================================================================
// Read-only lookups against the fixed festival calendar.
// =============================================================================

use axum::{extract::Query, response::IntoResponse, Json};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use surge_core::calendar;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Defaults to the current year.
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub success: bool,
    pub year: i32,
    pub festivals: Vec<calendar::CalendarEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// ISO date to check ("2024-10-19").
    pub date: String,
    /// Half-width of the window in days; defaults to 3.
    pub window_days: Option<i64>,
}

/// GET /api/festivals — the tracked festivals for a year.
pub async fn list_festivals(Query(query): Query<CalendarQuery>) -> impl IntoResponse {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    Json(CalendarResponse {
        success: true,
        year,
        festivals: calendar::calendar_for_year(year),
    })
}

/// GET /api/festivals/window — the festival closest to a date, if any
/// falls within the window.
pub async fn festival_window(
    Query(query): Query<WindowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("invalid date: {}", query.date)))?;
    let window_days = query.window_days.unwrap_or(3);
    if window_days < 0 {
        return Err(ApiError::BadRequest(
            "window_days must be non-negative".into(),
        ));
    }

    Ok(Json(calendar::festival_window(date, window_days)))
}
