//! # Staff Requirement Estimator
//!
//! Table of Contents:
//! 1. StaffRatios — per-department staff-to-patient ratios
//! 2. StaffRequirementInput / StaffForecast — input and result records
//! 3. forecast — required headcount and gap computation

use serde::Serialize;

// Minimum headcount kept on duty regardless of predicted inflow.
const MIN_DOCTORS: u32 = 2;
const MIN_NURSES: u32 = 4;
const MIN_SUPPORT: u32 = 2;

// Assumed role split of an undifferentiated current-staff total.
const CURRENT_DOCTOR_SHARE: f64 = 0.3;
const CURRENT_NURSE_SHARE: f64 = 0.5;
const CURRENT_SUPPORT_SHARE: f64 = 0.2;

// ─────────────────────────────────────────────
// 1. Department ratios
// ─────────────────────────────────────────────

/// Staff required per patient, by role.
#[derive(Debug, Clone, Copy)]
struct StaffRatios {
    doctors: f64,
    nurses: f64,
    support: f64,
}

/// Ratios for a department key (already lowercased). Unknown departments
/// resolve to the default mix.
fn department_ratios(department: &str) -> StaffRatios {
    match department {
        "emergency" => StaffRatios { doctors: 0.1, nurses: 0.2, support: 0.05 },
        "general" => StaffRatios { doctors: 0.05, nurses: 0.15, support: 0.03 },
        "icu" => StaffRatios { doctors: 0.2, nurses: 0.5, support: 0.1 },
        "opd" => StaffRatios { doctors: 0.08, nurses: 0.12, support: 0.04 },
        _ => StaffRatios { doctors: 0.08, nurses: 0.18, support: 0.04 },
    }
}

/// Demand scaling per shift; unknown shifts scale by 1.0.
fn shift_multiplier(shift: &str) -> f64 {
    match shift {
        "morning" => 1.0,
        "evening" => 0.8,
        "night" => 0.6,
        _ => 1.0,
    }
}

// ─────────────────────────────────────────────
// 2. Input / result records
// ─────────────────────────────────────────────

/// Typed input to [`forecast`].
#[derive(Debug, Clone, Default)]
pub struct StaffRequirementInput {
    pub predicted_patients: u32,
    /// Total current staff across roles. Zero is treated as "not supplied".
    pub current_staff: Option<u32>,
    pub department: Option<String>,
    pub shift_type: Option<String>,
}

/// Per-role shortfall between required and current staffing.
#[derive(Debug, Clone, Serialize)]
pub struct StaffingGap {
    pub doctors: u32,
    pub nurses: u32,
    pub support: u32,
    pub total_gap: u32,
}

/// Complete staffing forecast.
#[derive(Debug, Clone, Serialize)]
pub struct StaffForecast {
    pub required_doctors: u32,
    pub required_nurses: u32,
    pub required_support_staff: u32,
    pub current_gap: Option<StaffingGap>,
    pub recommendations: Vec<String>,
}

// ─────────────────────────────────────────────
// 3. Estimator
// ─────────────────────────────────────────────

/// Forecast required staffing for a predicted patient inflow.
///
/// Role requirements are `floor(patients * ratio)`, scaled by the shift
/// multiplier when a shift is given, then clamped to the minimum on-duty
/// floors. A gap is reported only when a non-zero current staff total is
/// supplied.
pub fn forecast(input: &StaffRequirementInput) -> StaffForecast {
    let ratios = department_ratios(
        &input
            .department
            .as_deref()
            .unwrap_or("default")
            .to_lowercase(),
    );

    let mut required_doctors = (input.predicted_patients as f64 * ratios.doctors) as u32;
    let mut required_nurses = (input.predicted_patients as f64 * ratios.nurses) as u32;
    let mut required_support = (input.predicted_patients as f64 * ratios.support) as u32;

    if let Some(shift) = input.shift_type.as_deref() {
        let mult = shift_multiplier(&shift.to_lowercase());
        required_doctors = (required_doctors as f64 * mult) as u32;
        required_nurses = (required_nurses as f64 * mult) as u32;
        required_support = (required_support as f64 * mult) as u32;
    }

    required_doctors = required_doctors.max(MIN_DOCTORS);
    required_nurses = required_nurses.max(MIN_NURSES);
    required_support = required_support.max(MIN_SUPPORT);

    let current_gap = input
        .current_staff
        .filter(|&total| total > 0)
        .map(|total| {
            let current_doctors = (total as f64 * CURRENT_DOCTOR_SHARE) as u32;
            let current_nurses = (total as f64 * CURRENT_NURSE_SHARE) as u32;
            let current_support = (total as f64 * CURRENT_SUPPORT_SHARE) as u32;
            StaffingGap {
                doctors: required_doctors.saturating_sub(current_doctors),
                nurses: required_nurses.saturating_sub(current_nurses),
                support: required_support.saturating_sub(current_support),
                total_gap: (required_doctors + required_nurses + required_support)
                    .saturating_sub(total),
            }
        });

    let recommendations = recommendations(
        required_doctors,
        required_nurses,
        required_support,
        current_gap.as_ref(),
        input.department.as_deref(),
        input.shift_type.as_deref(),
    );

    StaffForecast {
        required_doctors,
        required_nurses,
        required_support_staff: required_support,
        current_gap,
        recommendations,
    }
}

fn recommendations(
    doctors: u32,
    nurses: u32,
    support: u32,
    gap: Option<&StaffingGap>,
    department: Option<&str>,
    shift_type: Option<&str>,
) -> Vec<String> {
    let mut recs = Vec::new();
    let total_required = doctors + nurses + support;

    match gap {
        Some(gap) if gap.total_gap > 0 => {
            recs.push(format!(
                "⚠️ Staff shortage: {} additional staff members needed",
                gap.total_gap
            ));
            if gap.doctors > 0 {
                recs.push(format!(
                    "Require {} additional doctors - consider calling on-call staff",
                    gap.doctors
                ));
            }
            if gap.nurses > 0 {
                recs.push(format!(
                    "Require {} additional nurses - arrange temporary staffing",
                    gap.nurses
                ));
            }
            if gap.support > 0 {
                recs.push(format!("Require {} additional support staff", gap.support));
            }
        }
        _ => recs.push("Current staffing levels appear adequate".into()),
    }

    recs.push(format!(
        "Recommended staffing: {doctors} doctors, {nurses} nurses, {support} support staff"
    ));

    if let Some(department) = department {
        recs.push(format!("For {department} department"));
    }
    if let Some(shift) = shift_type {
        recs.push(format!("For {shift} shift"));
    }

    if total_required > 50 {
        recs.push("Consider splitting workload across multiple shifts".into());
        recs.push("Coordinate with nearby hospitals for staff sharing".into());
    }

    recs
}
