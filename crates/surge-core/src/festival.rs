//! # Festival Surge Estimator
//!
//! Table of Contents:
//! 1. Intensity / HistoricalBaseline — estimator inputs
//! 2. Surge multiplier table — per-festival tiers
//! 3. FestivalSurgePrediction — result record
//! 4. estimate — the estimator itself

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EstimateError, RiskLevel};

/// Daily patient baseline used when no historical figures are supplied.
const BASE_DAILY_PATIENTS: f64 = 100.0;

// ─────────────────────────────────────────────
// 1. Inputs
// ─────────────────────────────────────────────

/// Expected crowd intensity of the festival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

/// Optional historical figures for the same festival.
///
/// An explicit average-daily figure takes precedence over a previous-year
/// total (which is spread evenly across the window).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoricalBaseline {
    pub average_daily_patients: Option<f64>,
    pub previous_year_cases: Option<f64>,
}

impl HistoricalBaseline {
    fn is_empty(&self) -> bool {
        self.average_daily_patients.is_none() && self.previous_year_cases.is_none()
    }
}

/// Typed input to [`estimate`]. The festival name is free text; it is
/// normalized to a lookup key internally.
#[derive(Debug, Clone)]
pub struct FestivalSurgeInput {
    pub festival_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub intensity: Intensity,
    pub historical: Option<HistoricalBaseline>,
    /// Carried through to the factor breakdown untouched.
    pub location: Option<String>,
}

// ─────────────────────────────────────────────
// 2. Surge multiplier table
// ─────────────────────────────────────────────

/// Per-intensity surge multipliers for one festival.
#[derive(Debug, Clone, Copy)]
struct SurgeTiers {
    low: f64,
    medium: f64,
    high: f64,
}

impl SurgeTiers {
    fn for_intensity(&self, intensity: Intensity) -> f64 {
        match intensity {
            Intensity::Low => self.low,
            Intensity::Medium => self.medium,
            Intensity::High => self.high,
        }
    }
}

/// Normalize a free-text festival name to a table key (lowercase, spaces
/// to underscores). Unknown keys resolve to the default tier set.
fn festival_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn surge_tiers(key: &str) -> SurgeTiers {
    match key {
        "diwali" => SurgeTiers { low: 1.3, medium: 1.6, high: 2.0 },
        "holi" => SurgeTiers { low: 1.2, medium: 1.5, high: 1.8 },
        "eid" => SurgeTiers { low: 1.2, medium: 1.4, high: 1.7 },
        "christmas" => SurgeTiers { low: 1.1, medium: 1.3, high: 1.6 },
        "new_year" => SurgeTiers { low: 1.2, medium: 1.5, high: 1.9 },
        "dussehra" => SurgeTiers { low: 1.2, medium: 1.4, high: 1.7 },
        "ganesh_chaturthi" => SurgeTiers { low: 1.3, medium: 1.6, high: 2.1 },
        "durga_puja" => SurgeTiers { low: 1.2, medium: 1.5, high: 1.8 },
        _ => SurgeTiers { low: 1.2, medium: 1.4, high: 1.7 },
    }
}

// ─────────────────────────────────────────────
// 3. Result record
// ─────────────────────────────────────────────

/// Resource estimate for the festival window, per day.
#[derive(Debug, Clone, Serialize)]
pub struct FestivalResources {
    pub beds: u32,
    pub doctors: u32,
    pub nurses: u32,
    pub ambulances: u32,
    pub equipment: Vec<String>,
}

/// Echo of the inputs plus the derived quantities that drove the estimate.
#[derive(Debug, Clone, Serialize)]
pub struct FestivalFactors {
    pub festival_name: String,
    pub intensity: Intensity,
    pub duration_days: i64,
    pub surge_multiplier: f64,
    pub base_daily_patients: f64,
    pub location: Option<String>,
}

/// Complete festival surge prediction.
#[derive(Debug, Clone, Serialize)]
pub struct FestivalSurgePrediction {
    pub predicted_inflow: u32,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub estimated_resources: FestivalResources,
    pub factors: FestivalFactors,
}

// ─────────────────────────────────────────────
// 4. Estimator
// ─────────────────────────────────────────────

/// Estimate patient inflow over a festival window.
///
/// `predicted_inflow = floor(base_rate * multiplier * duration_days)`
/// where the base rate comes from the historical baseline when supplied
/// and a fixed constant otherwise. Rejects windows that end before they
/// start.
pub fn estimate(input: &FestivalSurgeInput) -> Result<FestivalSurgePrediction, EstimateError> {
    if input.end_date < input.start_date {
        return Err(EstimateError::InvalidDateWindow {
            start: input.start_date,
            end: input.end_date,
        });
    }
    let duration_days = (input.end_date - input.start_date).num_days() + 1;

    let tiers = surge_tiers(&festival_key(&input.festival_name));
    let multiplier = tiers.for_intensity(input.intensity);

    let baseline = input.historical.as_ref().filter(|h| !h.is_empty());
    let base_daily = match baseline {
        Some(HistoricalBaseline { average_daily_patients: Some(avg), .. }) => *avg,
        Some(HistoricalBaseline { previous_year_cases: Some(total), .. }) => {
            *total / duration_days as f64
        }
        _ => BASE_DAILY_PATIENTS,
    };

    let predicted_inflow = (base_daily * multiplier * duration_days as f64) as u32;

    let confidence = if baseline.is_some() { 85.0 } else { 65.0 };

    let risk_level = if multiplier >= 1.8 {
        RiskLevel::High
    } else if multiplier >= 1.4 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let per_day = |share: f64| (predicted_inflow as f64 * share / duration_days as f64) as u32;
    let estimated_resources = FestivalResources {
        beds: per_day(0.3),
        doctors: per_day(0.05),
        nurses: per_day(0.1),
        ambulances: per_day(0.02),
        equipment: vec![
            "Oxygen cylinders".into(),
            "Emergency medication".into(),
            "Monitoring devices".into(),
        ],
    };

    let recommendations = recommendations(
        &input.festival_name,
        input.intensity,
        predicted_inflow,
        duration_days,
    );

    Ok(FestivalSurgePrediction {
        predicted_inflow,
        confidence,
        risk_level,
        recommendations,
        estimated_resources,
        factors: FestivalFactors {
            festival_name: input.festival_name.clone(),
            intensity: input.intensity,
            duration_days,
            surge_multiplier: multiplier,
            base_daily_patients: base_daily,
            location: input.location.clone(),
        },
    })
}

fn recommendations(
    festival_name: &str,
    intensity: Intensity,
    predicted_inflow: u32,
    duration_days: i64,
) -> Vec<String> {
    let mut recs = vec![format!(
        "Prepare for {festival_name} - Expected {predicted_inflow} patients over {duration_days} days"
    )];

    match intensity {
        Intensity::High => {
            recs.push("Increase emergency department capacity by 50%".into());
            recs.push("Arrange additional ambulance services".into());
            recs.push("Coordinate with nearby hospitals for overflow capacity".into());
        }
        Intensity::Medium => {
            recs.push("Increase emergency department capacity by 30%".into());
            recs.push("Ensure adequate staffing during peak hours".into());
        }
        Intensity::Low => {}
    }

    recs.push("Stock up on festival-related injury medications".into());
    recs.push("Increase respiratory department capacity (fireworks/air quality)".into());
    recs.push("Prepare for alcohol-related incidents".into());
    recs.push("Ensure 24/7 availability of key departments".into());
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(name: &str, intensity: Intensity, days: u32) -> FestivalSurgeInput {
        FestivalSurgeInput {
            festival_name: name.into(),
            start_date: date(2024, 11, 1),
            end_date: date(2024, 11, days),
            intensity,
            historical: None,
            location: None,
        }
    }

    #[test]
    fn diwali_high_three_days() {
        let p = estimate(&input("Diwali", Intensity::High, 3)).unwrap();

        // 100 * 2.0 * 3
        assert_eq!(p.predicted_inflow, 600);
        assert_eq!(p.confidence, 65.0);
        assert_eq!(p.risk_level, RiskLevel::High);
        assert_eq!(p.factors.duration_days, 3);
        assert_eq!(p.factors.surge_multiplier, 2.0);

        // Per-day resource floors
        assert_eq!(p.estimated_resources.beds, 60);
        assert_eq!(p.estimated_resources.doctors, 10);
        assert_eq!(p.estimated_resources.nurses, 20);
        assert_eq!(p.estimated_resources.ambulances, 4);
    }

    #[test]
    fn name_normalization_hits_table() {
        let p = estimate(&input("Ganesh Chaturthi", Intensity::High, 2)).unwrap();
        assert_eq!(p.factors.surge_multiplier, 2.1);
    }

    #[test]
    fn unknown_festival_uses_default_tiers() {
        let unknown = estimate(&input("Village Mela", Intensity::Medium, 3)).unwrap();
        assert_eq!(unknown.factors.surge_multiplier, 1.4);
        // 100 * 1.4 * 3
        assert_eq!(unknown.predicted_inflow, 420);
        assert_eq!(unknown.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn average_daily_baseline_raises_confidence() {
        let mut i = input("Holi", Intensity::Low, 2);
        i.historical = Some(HistoricalBaseline {
            average_daily_patients: Some(50.0),
            previous_year_cases: None,
        });
        let p = estimate(&i).unwrap();
        assert_eq!(p.confidence, 85.0);
        // 50 * 1.2 * 2
        assert_eq!(p.predicted_inflow, 120);
        assert_eq!(p.factors.base_daily_patients, 50.0);
    }

    #[test]
    fn previous_year_total_spreads_over_window() {
        let mut i = input("Holi", Intensity::Low, 3);
        i.historical = Some(HistoricalBaseline {
            average_daily_patients: None,
            previous_year_cases: Some(300.0),
        });
        let p = estimate(&i).unwrap();
        assert_eq!(p.factors.base_daily_patients, 100.0);
        assert_eq!(p.predicted_inflow, 360);
    }

    #[test]
    fn empty_baseline_counts_as_absent() {
        let mut i = input("Holi", Intensity::Low, 2);
        i.historical = Some(HistoricalBaseline::default());
        let p = estimate(&i).unwrap();
        assert_eq!(p.confidence, 65.0);
        assert_eq!(p.factors.base_daily_patients, 100.0);
    }

    #[test]
    fn inflow_scales_linearly_with_duration() {
        let three = estimate(&input("Eid", Intensity::Medium, 3)).unwrap();
        let six = estimate(&input("Eid", Intensity::Medium, 6)).unwrap();
        assert_eq!(six.predicted_inflow, three.predicted_inflow * 2);
    }

    #[test]
    fn reversed_window_is_rejected() {
        let mut i = input("Diwali", Intensity::High, 3);
        i.end_date = date(2024, 10, 30);
        assert!(matches!(
            estimate(&i),
            Err(EstimateError::InvalidDateWindow { .. })
        ));
    }

    #[test]
    fn single_day_window_counts_one_day() {
        let p = estimate(&input("Christmas", Intensity::Low, 1)).unwrap();
        assert_eq!(p.factors.duration_days, 1);
        // 100 * 1.1 * 1
        assert_eq!(p.predicted_inflow, 110);
        assert_eq!(p.risk_level, RiskLevel::Low);
    }

    #[test]
    fn high_intensity_advice_tier() {
        let p = estimate(&input("Diwali", Intensity::High, 3)).unwrap();
        assert!(p
            .recommendations
            .iter()
            .any(|r| r == "Increase emergency department capacity by 50%"));
        assert!(p
            .recommendations
            .iter()
            .any(|r| r == "Prepare for alcohol-related incidents"));
    }
}
