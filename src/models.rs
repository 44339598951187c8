use crate::persistence::{ExerciseForm, HabitForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    #[default]
    Smoking,
    Drinking,
}

impl HabitType {
    pub fn as_str(self) -> &'static str {
        match self {
            HabitType::Smoking => "smoking",
            HabitType::Drinking => "drinking",
        }
    }
}

impl fmt::Display for HabitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "smoking" => Ok(HabitType::Smoking),
            "drinking" => Ok(HabitType::Drinking),
            other => Err(format!("unknown habit type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    #[default]
    Walking,
    Jogging,
    Cycling,
    Swimming,
    WeightTraining,
    Yoga,
    JumpingRope,
    Basketball,
    Badminton,
    Elliptical,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 10] = [
        ExerciseType::Walking,
        ExerciseType::Jogging,
        ExerciseType::Cycling,
        ExerciseType::Swimming,
        ExerciseType::WeightTraining,
        ExerciseType::Yoga,
        ExerciseType::JumpingRope,
        ExerciseType::Basketball,
        ExerciseType::Badminton,
        ExerciseType::Elliptical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseType::Walking => "walking",
            ExerciseType::Jogging => "jogging",
            ExerciseType::Cycling => "cycling",
            ExerciseType::Swimming => "swimming",
            ExerciseType::WeightTraining => "weight_training",
            ExerciseType::Yoga => "yoga",
            ExerciseType::JumpingRope => "jumping_rope",
            ExerciseType::Basketball => "basketball",
            ExerciseType::Badminton => "badminton",
            ExerciseType::Elliptical => "elliptical",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ExerciseType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown exercise type '{s}'"))
    }
}

/// Smoking or drinking habit, fully extracted from the form.
///
/// Fields for the habit that is not selected are carried along but ignored
/// by the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitProfile {
    pub habit_type: HabitType,
    pub cigarettes_per_day: u32,
    pub cigarette_price: f64,
    pub cigarettes_per_pack: u32,
    /// Milliliters per day.
    pub drinks_per_day: u32,
    /// Price per liter.
    pub drink_price: f64,
    pub quit_period_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProfile {
    pub exercise_type: ExerciseType,
    pub duration_minutes: u32,
    pub frequency_per_week: u32,
    pub weight_kg: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RiskReductions {
    pub cancer: f64,
    pub heart: f64,
    pub stroke: f64,
    pub respiratory: f64,
}

impl RiskReductions {
    /// Bar chart order.
    pub fn to_series(self) -> Vec<f64> {
        vec![self.cancer, self.heart, self.stroke, self.respiratory]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitResult {
    pub money_saved: f64,
    pub life_increase_months: f64,
    pub risk_reductions: RiskReductions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HealthDimensions {
    pub cardio: u32,
    pub mental: u32,
    pub metabolic: u32,
    pub musculoskeletal: u32,
    pub respiratory: u32,
}

impl HealthDimensions {
    /// Radar chart order.
    pub fn to_series(self) -> Vec<f64> {
        [
            self.cardio,
            self.mental,
            self.metabolic,
            self.musculoskeletal,
            self.respiratory,
        ]
        .into_iter()
        .map(f64::from)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResult {
    pub calories_per_session: u64,
    pub weekly_calories: u64,
    pub cardio_risk_reduction: f64,
    pub mood_improvement: u32,
    pub mood_improvement_display: String,
    pub health_dimensions: HealthDimensions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Red,
    Amber,
    Green,
}

impl ColorBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 33.0 {
            ColorBand::Red
        } else if percentage < 66.0 {
            ColorBand::Amber
        } else {
            ColorBand::Green
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            ColorBand::Red => "#e74c3c",
            ColorBand::Amber => "#f39c12",
            ColorBand::Green => "#2ecc71",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub quit_type: HabitType,
    pub target_days: u32,
    pub elapsed_days: i64,
    pub percentage: f64,
    pub percentage_display: u32,
    pub color: ColorBand,
    pub color_hex: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub field: String,
    pub value: f64,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetProgressRequest {
    pub habit_type: HabitType,
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub habit: Option<HabitType>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormsResponse {
    pub habit: HabitForm,
    pub exercise: ExerciseForm,
    pub last_saved: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveFormsRequest {
    pub habit: HabitForm,
    pub exercise: ExerciseForm,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub saved_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitCalculation {
    pub profile: HabitProfile,
    pub result: BenefitResult,
    pub progress: ProgressReport,
    pub errors: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseCalculation {
    pub profile: ExerciseProfile,
    pub result: ExerciseResult,
    pub errors: BTreeMap<String, String>,
}
