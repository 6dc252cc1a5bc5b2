//! Nutrition guidance from hemoglobin, cholesterol and glucose values.

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{Advisory, AdvisoryBuilder, AdvisoryKind};
use crate::models::marker::{MarkerName, MarkerSet, MarkerValue, format_value};

const HEMOGLOBIN_LOW: i64 = 12;
const HEMOGLOBIN_HIGH: i64 = 16;
const CHOLESTEROL_DESIRABLE: i64 = 200;
const GLUCOSE_NORMAL_MAX: i64 = 100;
const GLUCOSE_DIABETES: i64 = 126;

/// Hemoglobin tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HemoglobinStatus {
    /// Below 12 g/dL.
    Low,
    /// Above 16 g/dL.
    Elevated,
    Normal,
}

impl HemoglobinStatus {
    pub fn classify(value: MarkerValue) -> Self {
        if value < Decimal::from(HEMOGLOBIN_LOW) {
            Self::Low
        } else if value > Decimal::from(HEMOGLOBIN_HIGH) {
            Self::Elevated
        } else {
            Self::Normal
        }
    }
}

/// Total cholesterol tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CholesterolStatus {
    /// Above 200 mg/dL.
    Elevated,
    Good,
}

impl CholesterolStatus {
    pub fn classify(value: MarkerValue) -> Self {
        if value > Decimal::from(CHOLESTEROL_DESIRABLE) {
            Self::Elevated
        } else {
            Self::Good
        }
    }
}

/// Glucose tier. Anything above 100 mg/dL is elevated, and elevated values
/// are split at 126 mg/dL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseStatus {
    /// 126 mg/dL and above.
    DiabetesRange,
    /// Above 100 and below 126 mg/dL.
    PrediabetesRange,
    Normal,
}

impl GlucoseStatus {
    pub fn classify(value: MarkerValue) -> Self {
        if value > Decimal::from(GLUCOSE_NORMAL_MAX) {
            if value >= Decimal::from(GLUCOSE_DIABETES) {
                Self::DiabetesRange
            } else {
                Self::PrediabetesRange
            }
        } else {
            Self::Normal
        }
    }

    pub fn is_elevated(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Three-month cholesterol target: 85% to 90% of the current value, rounded
/// to whole mg/dL.
pub fn cholesterol_target(value: MarkerValue) -> (Decimal, Decimal) {
    let low = (value * Decimal::new(85, 2)).round();
    let high = (value * Decimal::new(90, 2)).round();
    (low, high)
}

/// Produces dietary guidance from a marker set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NutritionAdvisor;

impl NutritionAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Advice stamped with the current local time.
    pub fn advise(&self, markers: &MarkerSet) -> Advisory {
        self.advise_at(markers, Local::now().naive_local())
    }

    /// Advice stamped with a fixed time. Output depends only on the inputs.
    pub fn advise_at(&self, markers: &MarkerSet, generated_at: NaiveDateTime) -> Advisory {
        let mut out = AdvisoryBuilder::new(AdvisoryKind::Nutrition, generated_at);

        out.header(
            "NUTRITION ANALYSIS BASED ON YOUR BLOOD TEST RESULTS",
            65,
            "Blood Markers Found",
            "Detected Values:",
            markers,
        );

        let mut analysis_provided = false;

        if let Some(value) = markers.get(MarkerName::Hemoglobin) {
            analysis_provided = true;
            hemoglobin_section(&mut out, value);
        }
        if let Some(value) = markers.get(MarkerName::Cholesterol) {
            analysis_provided = true;
            cholesterol_section(&mut out, value);
        }
        if let Some(value) = markers.get(MarkerName::Glucose) {
            analysis_provided = true;
            glucose_section(&mut out, value);
        }

        if !analysis_provided {
            general_section(&mut out);
        }

        closing_section(&mut out);
        out.build()
    }
}

/// Nutrition advice for a marker set, stamped with the current time.
pub fn advise_nutrition(markers: &MarkerSet) -> Advisory {
    NutritionAdvisor::new().advise(markers)
}

fn hemoglobin_section(out: &mut AdvisoryBuilder, value: MarkerValue) {
    let v = format_value(value);
    out.section("IRON STATUS ANALYSIS", 40);
    out.line(format!("Your Hemoglobin Level: {} g/dL", v));

    match HemoglobinStatus::classify(value) {
        HemoglobinStatus::Low => {
            out.line(format!("LOW HEMOGLOBIN DETECTED ({} g/dL)", v));
            out.line("Your hemoglobin is below normal range (12.1-15.1 g/dL for women, 13.8-17.2 g/dL for men)");
            out.blank();
            out.line("IRON-RICH FOODS TO INCLUDE DAILY:");
            out.lines([
                "• Red meat: 3-4 oz serving (provides ~2.5mg iron)",
                "• Chicken/Turkey: 4 oz serving (provides ~1.1mg iron)",
                "• Spinach: 1 cup cooked (provides ~6.4mg iron)",
                "• Lentils: 1 cup cooked (provides ~6.6mg iron)",
                "• Fortified cereals: 1 cup (provides ~4-18mg iron)",
            ]);
            out.blank();
            out.line("ENHANCE IRON ABSORPTION WITH VITAMIN C:");
            out.lines([
                "• Drink orange juice with iron-rich meals",
                "• Add bell peppers, strawberries, or tomatoes",
                "• Take iron supplements with vitamin C (consult doctor first)",
            ]);
            out.blank();
            out.line("AVOID WITH IRON-RICH MEALS:");
            out.lines([
                "• Coffee and tea (wait 1-2 hours after eating)",
                "• Calcium supplements",
                "• Dairy products during iron-rich meals",
            ]);
        }
        HemoglobinStatus::Elevated => {
            out.line(format!("ELEVATED HEMOGLOBIN ({} g/dL)", v));
            out.line("Your hemoglobin is above normal range");
            out.lines([
                "• Increase daily water intake to 10-12 glasses",
                "• Avoid iron supplements unless prescribed",
                "• Focus on hydrating foods: watermelon, cucumber, soups",
                "• Consult your doctor about this elevated level",
            ]);
        }
        HemoglobinStatus::Normal => {
            out.line(format!("NORMAL HEMOGLOBIN LEVEL ({} g/dL)", v));
            out.line("Your iron status appears healthy");
            out.lines([
                "• Continue current iron intake from balanced diet",
                "• Include variety of protein sources",
            ]);
        }
    }
    out.blank();
}

fn cholesterol_section(out: &mut AdvisoryBuilder, value: MarkerValue) {
    let v = format_value(value);
    out.section("CHOLESTEROL MANAGEMENT", 35);
    out.line(format!("Your Total Cholesterol: {} mg/dL", v));

    match CholesterolStatus::classify(value) {
        CholesterolStatus::Elevated => {
            out.line(format!("ELEVATED CHOLESTEROL ({} mg/dL)", v));
            out.line("Your cholesterol is above desirable level (<200 mg/dL)");
            out.blank();
            out.line("HEART-HEALTHY FOODS TO EAT DAILY:");
            out.lines([
                "• Fatty fish: Salmon, mackerel, sardines (2-3x/week, 4oz servings)",
                "• Oats: 1 cup cooked daily (provides 3g soluble fiber)",
                "• Beans: 1/2 cup daily (lentils, black beans, chickpeas)",
                "• Nuts: 1 oz almonds or walnuts daily",
                "• Olive oil: 2-3 tablespoons for cooking",
            ]);
            out.blank();
            out.line("FOODS TO LIMIT OR AVOID:");
            out.lines([
                "• Red meat: Limit to 2x/week, lean cuts only",
                "• Full-fat dairy: Switch to low-fat versions",
                "• Fried foods: Bake, grill, or steam instead",
                "• Processed foods: Avoid packaged snacks and fast food",
            ]);
            out.blank();
            let (low, high) = cholesterol_target(value);
            out.line("TARGET: Reduce cholesterol by 10-15% in 3 months");
            out.line(format!(
                "This could bring your level to approximately {}-{} mg/dL",
                low, high
            ));
        }
        CholesterolStatus::Good => {
            out.line(format!("GOOD CHOLESTEROL LEVEL ({} mg/dL)", v));
            out.line("Your cholesterol is in the desirable range (<200 mg/dL)");
            out.lines([
                "• Continue heart-healthy Mediterranean-style diet",
                "• Maintain current healthy fat intake",
            ]);
        }
    }
    out.blank();
}

fn glucose_section(out: &mut AdvisoryBuilder, value: MarkerValue) {
    let v = format_value(value);
    out.section("BLOOD SUGAR MANAGEMENT", 30);
    out.line(format!("Your Glucose Level: {} mg/dL", v));

    let status = GlucoseStatus::classify(value);
    if status.is_elevated() {
        out.line(format!("ELEVATED GLUCOSE ({} mg/dL)", v));
        match status {
            GlucoseStatus::DiabetesRange => out.line("This indicates diabetes range (≥126 mg/dL)"),
            _ => out.line("This indicates prediabetes range (100-125 mg/dL)"),
        };
        out.blank();
        out.line("BLOOD SUGAR FRIENDLY FOODS:");
        out.lines([
            "• Whole grains: Brown rice, quinoa, steel-cut oats",
            "• Legumes: Beans, lentils, chickpeas (1/2 cup per meal)",
            "• Non-starchy vegetables: Broccoli, spinach, peppers (unlimited)",
            "• Lean proteins: Chicken, fish, tofu (4-6 oz per meal)",
        ]);
        out.blank();
        out.line("MEAL TIMING STRATEGY:");
        out.lines([
            "• Eat every 3-4 hours to prevent blood sugar spikes",
            "• Include protein with every meal and snack",
            "• Avoid large portions of carbohydrates",
            "• Test blood sugar before and after meals if possible",
        ]);
        out.blank();
        out.line("FOODS TO AVOID:");
        out.lines([
            "• White bread, white rice, pastries",
            "• Sugary drinks: Soda, fruit juice, sports drinks",
            "• Candy, cookies, ice cream",
            "• Large portions of any carbohydrate",
        ]);
    } else {
        out.line(format!("NORMAL GLUCOSE LEVEL ({} mg/dL)", v));
        out.line("Your blood sugar is in the healthy range (70-99 mg/dL)");
        out.lines([
            "• Continue balanced carbohydrate intake",
            "• Maintain regular meal timing",
        ]);
    }
    out.blank();
}

fn general_section(out: &mut AdvisoryBuilder) {
    out.section("GENERAL NUTRITION GUIDANCE", 35);
    out.line("Specific blood markers were not detected in the automated analysis.");
    out.line("However, here are evidence-based nutrition recommendations:");
    out.blank();
    out.line("DAILY NUTRITION TARGETS:");
    out.lines([
        "• Vegetables: 5-9 servings (1 serving = 1 cup raw or 1/2 cup cooked)",
        "• Fruits: 2-4 servings (1 serving = 1 medium fruit)",
        "• Whole grains: 6-8 servings (1 serving = 1 slice bread or 1/2 cup rice)",
        "• Lean protein: 5-6 oz total daily",
        "• Healthy fats: 2-3 tablespoons daily (olive oil, nuts)",
    ]);
    out.blank();
    out.line("HYDRATION:");
    out.lines([
        "• Water: 8-10 glasses daily",
        "• Limit sugary beverages and alcohol",
    ]);
}

fn closing_section(out: &mut AdvisoryBuilder) {
    out.blank();
    out.section("IMPLEMENTATION TIMELINE", 30);
    out.lines([
        "Week 1: Focus on increasing vegetables and water intake",
        "Week 2: Add heart-healthy fats and reduce processed foods",
        "Week 3-4: Establish consistent meal timing",
        "Month 2-3: Monitor progress with follow-up blood tests",
    ]);
    out.blank();
    out.line("MONITORING PROGRESS:");
    out.lines([
        "• Keep a 3-day food diary",
        "• Track energy levels and symptoms",
        "• Schedule blood work in 3 months to reassess",
        "• Work with a registered dietitian for personalized guidance",
    ]);
    out.blank();
    out.line("IMPORTANT: Consult with your healthcare provider before making");
    out.line("    significant dietary changes, especially if you have medical conditions.");
}
