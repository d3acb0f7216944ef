//! # Pollution Surge Estimator
//!
//! Table of Contents:
//! 1. AqiCategory — fixed AQI band classification
//! 2. PollutionSurgeInput / result records
//! 3. estimate — respiratory surge from an AQI reading

use serde::{Deserialize, Serialize};

use crate::RiskLevel;

/// Daily respiratory patient baseline before any pollution effect.
const BASE_DAILY_RESPIRATORY_PATIENTS: f64 = 20.0;

// ─────────────────────────────────────────────
// 1. AQI bands
// ─────────────────────────────────────────────

/// The six standard AQI bands. Classification is by upper bound; anything
/// above 300 is hazardous, so the classifier is total even for readings
/// past the nominal 500 ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Classify an AQI reading into its band.
    pub fn classify(aqi: f64) -> Self {
        if aqi <= 50.0 {
            Self::Good
        } else if aqi <= 100.0 {
            Self::Moderate
        } else if aqi <= 150.0 {
            Self::UnhealthySensitive
        } else if aqi <= 200.0 {
            Self::Unhealthy
        } else if aqi <= 300.0 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        }
    }

    /// Surge multiplier applied to the respiratory baseline.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Good => 1.0,
            Self::Moderate => 1.1,
            Self::UnhealthySensitive => 1.3,
            Self::Unhealthy => 1.6,
            Self::VeryUnhealthy => 2.0,
            Self::Hazardous => 2.5,
        }
    }

    /// Extra patients expected on top of the scaled baseline.
    pub fn additional_patients(&self) -> u32 {
        match self {
            Self::Good => 0,
            Self::Moderate => 5,
            Self::UnhealthySensitive => 15,
            Self::Unhealthy => 30,
            Self::VeryUnhealthy => 50,
            Self::Hazardous => 80,
        }
    }

    pub fn risk(&self) -> RiskLevel {
        match self {
            Self::Good | Self::Moderate => RiskLevel::Low,
            Self::UnhealthySensitive => RiskLevel::Medium,
            Self::Unhealthy => RiskLevel::High,
            Self::VeryUnhealthy | Self::Hazardous => RiskLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::UnhealthySensitive => "unhealthy_sensitive",
            Self::Unhealthy => "unhealthy",
            Self::VeryUnhealthy => "very_unhealthy",
            Self::Hazardous => "hazardous",
        }
    }
}

// ─────────────────────────────────────────────
// 2. Input / result records
// ─────────────────────────────────────────────

/// Typed input to [`estimate`]. Only `aqi` drives the formula; PM readings,
/// location, and date are informational passthrough.
#[derive(Debug, Clone)]
pub struct PollutionSurgeInput {
    pub aqi: f64,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub location: Option<String>,
    pub date: Option<String>,
}

/// Respiratory-specific resource estimate.
#[derive(Debug, Clone, Serialize)]
pub struct PollutionResources {
    pub respiratory_beds: u32,
    pub oxygen_cylinders: u32,
    pub nebulizers: u32,
    /// Only provisioned above AQI 200.
    pub ventilators: u32,
    pub respiratory_medications: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollutionFactors {
    pub aqi: f64,
    pub aqi_category: AqiCategory,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub surge_multiplier: f64,
    pub location: Option<String>,
    pub date: Option<String>,
}

/// Complete pollution surge prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PollutionSurgePrediction {
    pub predicted_inflow: u32,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub estimated_resources: PollutionResources,
    pub factors: PollutionFactors,
}

// ─────────────────────────────────────────────
// 3. Estimator
// ─────────────────────────────────────────────

/// Estimate the respiratory patient surge for an AQI reading.
///
/// `predicted_inflow = floor(20 * band_multiplier + band_additional)`.
/// Confidence rises with the reading: extreme pollution correlates with
/// admissions far more reliably than moderate pollution does.
pub fn estimate(input: &PollutionSurgeInput) -> PollutionSurgePrediction {
    let category = AqiCategory::classify(input.aqi);
    let multiplier = category.multiplier();
    let risk_level = category.risk();

    let predicted_inflow = (BASE_DAILY_RESPIRATORY_PATIENTS * multiplier
        + category.additional_patients() as f64) as u32;

    let confidence = if input.aqi >= 200.0 {
        90.0
    } else if input.aqi >= 150.0 {
        80.0
    } else {
        70.0
    };

    let estimated_resources = PollutionResources {
        respiratory_beds: (predicted_inflow as f64 * 0.4) as u32,
        oxygen_cylinders: (predicted_inflow as f64 * 0.6) as u32,
        nebulizers: (predicted_inflow as f64 * 0.3) as u32,
        ventilators: if input.aqi > 200.0 {
            (predicted_inflow as f64 * 0.1) as u32
        } else {
            0
        },
        respiratory_medications: "High stock required".into(),
    };

    let recommendations = recommendations(input.aqi, category, risk_level);

    PollutionSurgePrediction {
        predicted_inflow,
        confidence,
        risk_level,
        recommendations,
        estimated_resources,
        factors: PollutionFactors {
            aqi: input.aqi,
            aqi_category: category,
            pm25: input.pm25,
            pm10: input.pm10,
            surge_multiplier: multiplier,
            location: input.location.clone(),
            date: input.date.clone(),
        },
    }
}

fn recommendations(aqi: f64, category: AqiCategory, risk: RiskLevel) -> Vec<String> {
    let mut recs = Vec::new();

    if aqi > 200.0 {
        recs.push("⚠️ CRITICAL: Very high pollution levels detected".into());
        recs.push("Increase respiratory department capacity immediately".into());
        recs.push("Stock up on oxygen cylinders and nebulizers".into());
        recs.push("Alert high-risk patients (elderly, children, asthmatics)".into());
        recs.push("Consider setting up temporary respiratory care unit".into());
    } else if aqi > 150.0 {
        recs.push("High pollution levels - monitor respiratory cases closely".into());
        recs.push("Ensure adequate supply of respiratory medications".into());
        recs.push("Increase respiratory department staffing".into());
    } else if aqi > 100.0 {
        recs.push("Moderate pollution - prepare for slight increase in respiratory cases".into());
    }

    recs.push(format!(
        "AQI: {} ({}) - Risk Level: {}",
        aqi,
        category.as_str().to_uppercase(),
        risk.as_str().to_uppercase()
    ));
    recs.push("Coordinate with nearby hospitals for respiratory emergencies".into());
    recs.push("Monitor air quality forecasts for upcoming days".into());
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(aqi: f64) -> PollutionSurgeInput {
        PollutionSurgeInput {
            aqi,
            pm25: None,
            pm10: None,
            location: None,
            date: None,
        }
    }

    #[test]
    fn very_unhealthy_reading() {
        let p = estimate(&reading(250.0));

        assert_eq!(p.factors.aqi_category, AqiCategory::VeryUnhealthy);
        // floor(20 * 2.0 + 50)
        assert_eq!(p.predicted_inflow, 90);
        assert_eq!(p.confidence, 90.0);
        assert_eq!(p.risk_level, RiskLevel::Critical);
        assert_eq!(p.estimated_resources.ventilators, 9);
        assert_eq!(p.estimated_resources.respiratory_beds, 36);
        assert_eq!(p.estimated_resources.oxygen_cylinders, 54);
        assert_eq!(p.estimated_resources.nebulizers, 27);
    }

    #[test]
    fn clean_air_reading() {
        let p = estimate(&reading(0.0));
        assert_eq!(p.factors.aqi_category, AqiCategory::Good);
        assert_eq!(p.predicted_inflow, 20);
        assert_eq!(p.confidence, 70.0);
        assert_eq!(p.risk_level, RiskLevel::Low);
        assert_eq!(p.estimated_resources.ventilators, 0);
    }

    #[test]
    fn band_upper_bounds_are_inclusive() {
        assert_eq!(AqiCategory::classify(50.0), AqiCategory::Good);
        assert_eq!(AqiCategory::classify(100.0), AqiCategory::Moderate);
        assert_eq!(AqiCategory::classify(150.0), AqiCategory::UnhealthySensitive);
        assert_eq!(AqiCategory::classify(200.0), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::classify(300.0), AqiCategory::VeryUnhealthy);
        assert_eq!(AqiCategory::classify(500.0), AqiCategory::Hazardous);
        // Classifier stays total past the nominal ceiling
        assert_eq!(AqiCategory::classify(730.0), AqiCategory::Hazardous);
    }

    #[test]
    fn no_ventilators_at_band_boundary() {
        let p = estimate(&reading(200.0));
        // floor(20 * 1.6 + 30)
        assert_eq!(p.predicted_inflow, 62);
        assert_eq!(p.estimated_resources.ventilators, 0);
        assert_eq!(p.confidence, 90.0);
    }

    #[test]
    fn inflow_is_monotonic_in_aqi() {
        let mut last = 0;
        for aqi in (0..=500).step_by(25) {
            let inflow = estimate(&reading(aqi as f64)).predicted_inflow;
            assert!(
                inflow >= last,
                "inflow dropped from {last} to {inflow} at AQI {aqi}"
            );
            last = inflow;
        }
    }

    #[test]
    fn status_line_embeds_reading() {
        let p = estimate(&reading(120.0));
        assert!(p
            .recommendations
            .iter()
            .any(|r| r == "AQI: 120 (UNHEALTHY_SENSITIVE) - Risk Level: MEDIUM"));
        assert!(p
            .recommendations
            .iter()
            .any(|r| r.starts_with("Moderate pollution")));
    }

    #[test]
    fn passthrough_fields_survive() {
        let p = estimate(&PollutionSurgeInput {
            aqi: 80.0,
            pm25: Some(35.5),
            pm10: Some(60.0),
            location: Some("Delhi".into()),
            date: Some("2024-11-01".into()),
        });
        assert_eq!(p.factors.pm25, Some(35.5));
        assert_eq!(p.factors.pm10, Some(60.0));
        assert_eq!(p.factors.location.as_deref(), Some("Delhi"));
        assert_eq!(p.factors.date.as_deref(), Some("2024-11-01"));
    }
}
