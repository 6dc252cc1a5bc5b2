//! Exercise prescription from a risk assessment over the marker set.
//!
//! Risk assessment and intensity selection are separate predicates. A value
//! can be flagged as a risk factor without lowering the program intensity
//! (cholesterol never changes intensity, and glucose only does above 200).

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Advisory, AdvisoryBuilder, AdvisoryKind};
use crate::models::marker::{MarkerName, MarkerSet, MarkerValue, format_value};

const RISK_CHOLESTEROL: i64 = 240;
const RISK_GLUCOSE: i64 = 126;
const RISK_HEMOGLOBIN: i64 = 12;

const REDUCED_GLUCOSE: i64 = 200;
const REDUCED_HEMOGLOBIN: i64 = 12;

const ADDENDUM_GLUCOSE: i64 = 100;
const ADDENDUM_CHOLESTEROL: i64 = 200;

/// A marker value that crossed an exercise safety threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFactor {
    pub marker: MarkerName,
    pub value: MarkerValue,
    pub threshold: Decimal,
    /// Guidance shown under special considerations.
    pub note: &'static str,
}

impl RiskFactor {
    /// One-line description, e.g. `High cholesterol (250 mg/dL)`.
    pub fn description(&self) -> String {
        let label = match self.marker {
            MarkerName::Cholesterol => "High cholesterol",
            MarkerName::Glucose => "Elevated glucose",
            MarkerName::Hemoglobin => "Low hemoglobin",
            other => other.label(),
        };
        format!("{} ({} {})", label, format_value(self.value), self.marker.unit())
    }
}

/// Flag every breached exercise threshold, in cholesterol, glucose,
/// hemoglobin order.
pub fn assess_risk(markers: &MarkerSet) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if let Some(value) = markers.get(MarkerName::Cholesterol) {
        if value > Decimal::from(RISK_CHOLESTEROL) {
            factors.push(RiskFactor {
                marker: MarkerName::Cholesterol,
                value,
                threshold: Decimal::from(RISK_CHOLESTEROL),
                note: "Emphasize aerobic exercise for cholesterol management",
            });
        }
    }
    if let Some(value) = markers.get(MarkerName::Glucose) {
        if value > Decimal::from(RISK_GLUCOSE) {
            factors.push(RiskFactor {
                marker: MarkerName::Glucose,
                value,
                threshold: Decimal::from(RISK_GLUCOSE),
                note: "Monitor blood sugar before and after exercise",
            });
        }
    }
    if let Some(value) = markers.get(MarkerName::Hemoglobin) {
        if value < Decimal::from(RISK_HEMOGLOBIN) {
            factors.push(RiskFactor {
                marker: MarkerName::Hemoglobin,
                value,
                threshold: Decimal::from(RISK_HEMOGLOBIN),
                note: "Start with low-intensity exercise due to potential anemia",
            });
        }
    }

    factors
}

/// Overall cardiovascular program intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Low to moderate, 20-30 minutes, 3-4 times per week.
    Reduced,
    /// Moderate, 30-45 minutes, 4-5 times per week.
    Standard,
}

impl Intensity {
    pub fn level(&self) -> &'static str {
        match self {
            Self::Reduced => "Low to moderate intensity",
            Self::Standard => "Moderate intensity",
        }
    }

    pub fn duration(&self) -> &'static str {
        match self {
            Self::Reduced => "20-30 minutes",
            Self::Standard => "30-45 minutes",
        }
    }

    pub fn frequency(&self) -> &'static str {
        match self {
            Self::Reduced => "3-4 times per week",
            Self::Standard => "4-5 times per week",
        }
    }
}

/// Reduced when hemoglobin is below 12 or glucose is above 200.
pub fn select_intensity(markers: &MarkerSet) -> Intensity {
    let low_hemoglobin = markers.is_below(MarkerName::Hemoglobin, Decimal::from(REDUCED_HEMOGLOBIN));
    let very_high_glucose = markers.is_above(MarkerName::Glucose, Decimal::from(REDUCED_GLUCOSE));

    if low_hemoglobin || very_high_glucose {
        Intensity::Reduced
    } else {
        Intensity::Standard
    }
}

/// Structured decisions behind an exercise advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExercisePlan {
    pub risk_factors: Vec<RiskFactor>,
    pub intensity: Intensity,
}

impl ExercisePlan {
    pub fn for_markers(markers: &MarkerSet) -> Self {
        Self {
            risk_factors: assess_risk(markers),
            intensity: select_intensity(markers),
        }
    }
}

/// Produces an exercise prescription from a marker set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExerciseAdvisor;

impl ExerciseAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn plan(&self, markers: &MarkerSet) -> ExercisePlan {
        ExercisePlan::for_markers(markers)
    }

    /// Advice stamped with the current local time.
    pub fn advise(&self, markers: &MarkerSet) -> Advisory {
        self.advise_at(markers, Local::now().naive_local())
    }

    pub fn advise_at(&self, markers: &MarkerSet, generated_at: NaiveDateTime) -> Advisory {
        let plan = self.plan(markers);
        let mut out = AdvisoryBuilder::new(AdvisoryKind::Exercise, generated_at);

        out.header(
            "PERSONALIZED EXERCISE PLAN BASED ON YOUR BLOOD RESULTS",
            60,
            "Blood Markers Evaluated",
            "Your Blood Values:",
            markers,
        );

        out.line("MEDICAL CLEARANCE REQUIRED");
        out.line("Obtain physician approval before starting any new exercise program");
        out.blank();

        if !plan.risk_factors.is_empty() {
            out.line("HEALTH CONSIDERATIONS BASED ON YOUR RESULTS:");
            for factor in &plan.risk_factors {
                out.line(format!("  ! {}", factor.description()));
            }
            out.blank();
        }

        cardio_section(&mut out, plan.intensity);
        strength_section(&mut out);

        if !plan.risk_factors.is_empty() {
            out.blank();
            out.section("SPECIAL CONSIDERATIONS FOR YOUR BLOOD RESULTS:", 55);
            for factor in &plan.risk_factors {
                out.line(format!("• {}", factor.note));
            }
        }

        if let Some(glucose) = markers.get(MarkerName::Glucose) {
            if glucose > Decimal::from(ADDENDUM_GLUCOSE) {
                out.blank();
                out.line(format!(
                    "BLOOD SUGAR MANAGEMENT (Your glucose: {} mg/dL):",
                    format_value(glucose)
                ));
                out.lines([
                    "• Check blood sugar before exercising",
                    "• Exercise 1-2 hours after meals when possible",
                    "• Keep glucose tablets available during exercise",
                    "• Stop exercising if you feel dizzy or weak",
                ]);
            }
        }

        if let Some(cholesterol) = markers.get(MarkerName::Cholesterol) {
            if cholesterol > Decimal::from(ADDENDUM_CHOLESTEROL) {
                out.blank();
                out.line(format!(
                    "HEART HEALTH FOCUS (Your cholesterol: {} mg/dL):",
                    format_value(cholesterol)
                ));
                out.lines([
                    "• Prioritize aerobic exercise for cholesterol reduction",
                    "• Monitor heart rate during exercise",
                    "• Aim for 150+ minutes of cardio per week",
                    "• Consider joining cardiac rehabilitation if available",
                ]);
            }
        }

        closing_section(&mut out, markers.len());
        out.build()
    }
}

/// Exercise advice for a marker set, stamped with the current time.
pub fn advise_exercise(markers: &MarkerSet) -> Advisory {
    ExerciseAdvisor::new().advise(markers)
}

fn cardio_section(out: &mut AdvisoryBuilder, intensity: Intensity) {
    out.section("CARDIOVASCULAR EXERCISE PROGRAM", 45);
    if intensity == Intensity::Reduced {
        out.line("Modified program due to your blood test results");
    }
    out.line(format!("• Intensity: {}", intensity.level()));
    out.line(format!("• Duration: {}", intensity.duration()));
    out.line(format!("• Frequency: {}", intensity.frequency()));
    out.line("• Target heart rate: 50-70% of maximum");
    out.blank();

    out.line("RECOMMENDED ACTIVITIES:");
    out.lines([
        "• Walking: Start with 20 minutes, gradually increase",
        "• Swimming: Excellent low-impact option",
        "• Cycling: Stationary or outdoor on flat terrain",
        "• Elliptical machine: Joint-friendly cardio",
        "• Water aerobics: Great for joint protection",
    ]);
}

fn strength_section(out: &mut AdvisoryBuilder) {
    out.blank();
    out.section("STRENGTH TRAINING PROGRAM", 40);
    out.lines([
        "• Frequency: 2-3 times per week",
        "• Focus: Full-body functional movements",
        "• Rest: 48 hours between strength sessions",
    ]);
    out.blank();

    out.line("BEGINNER STRENGTH ROUTINE:");
    out.lines([
        "• Bodyweight squats: 2 sets x 8-12 reps",
        "• Wall or knee push-ups: 2 sets x 5-10 reps",
        "• Seated rows (resistance band): 2 sets x 8-12 reps",
        "• Plank hold: 2 sets x 15-30 seconds",
        "• Glute bridges: 2 sets x 10-15 reps",
    ]);
}

fn closing_section(out: &mut AdvisoryBuilder, marker_count: usize) {
    out.blank();
    out.section("12-WEEK PROGRESSION PLAN:", 35);
    out.lines([
        "Weeks 1-2: Establish routine, focus on consistency",
        "Weeks 3-4: Gradually increase duration by 5 minutes",
        "Weeks 5-8: Add second strength training day",
        "Weeks 9-12: Increase intensity or add new activities",
    ]);

    out.blank();
    out.section("STOP EXERCISE IMMEDIATELY IF YOU EXPERIENCE:", 50);
    out.lines([
        "• Chest pain or pressure",
        "• Unusual shortness of breath",
        "• Dizziness or lightheadedness",
        "• Irregular heartbeat",
        "• Nausea or excessive fatigue",
    ]);

    out.blank();
    out.line("SEEK IMMEDIATE MEDICAL ATTENTION FOR ANY OF THESE SYMPTOMS");
    out.blank();
    out.line(format!(
        "SUMMARY: Exercise plan customized for your {} blood markers",
        marker_count
    ));
    out.line("DISCLAIMER: This plan is based on your blood test results but");
    out.line("    requires medical clearance before implementation.");
}
