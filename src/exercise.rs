use crate::habit::round_to;
use crate::models::{ExerciseProfile, ExerciseResult, ExerciseType, HealthDimensions};

const BASELINE_MINUTES: f64 = 30.0;
const BASELINE_SESSIONS: f64 = 3.0;
/// Jogging's factor.
const BASELINE_FACTOR: f64 = 0.075;
const MOOD_CAP: u32 = 95;
const DIMENSION_CAP: f64 = 100.0;

/// Per-type weights for the five health dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionWeights {
    pub cardio: f64,
    pub respiratory: f64,
    pub mental: f64,
    pub metabolic: f64,
    pub musculoskeletal: f64,
}

const fn weights(
    cardio: f64,
    respiratory: f64,
    mental: f64,
    metabolic: f64,
    musculoskeletal: f64,
) -> DimensionWeights {
    DimensionWeights { cardio, respiratory, mental, metabolic, musculoskeletal }
}

/// kcal burned per kg of body weight per minute.
pub fn calorie_factor(kind: ExerciseType) -> f64 {
    match kind {
        ExerciseType::Walking => 0.048,
        ExerciseType::Jogging => 0.075,
        ExerciseType::Cycling => 0.08,
        ExerciseType::Swimming => 0.1,
        ExerciseType::WeightTraining => 0.085,
        ExerciseType::Yoga => 0.045,
        ExerciseType::JumpingRope => 0.13,
        ExerciseType::Basketball => 0.09,
        ExerciseType::Badminton => 0.075,
        ExerciseType::Elliptical => 0.085,
    }
}

pub fn dimension_weights(kind: ExerciseType) -> DimensionWeights {
    match kind {
        ExerciseType::Walking | ExerciseType::Jogging | ExerciseType::Cycling => {
            weights(80.0, 75.0, 65.0, 60.0, 50.0)
        }
        ExerciseType::Swimming => weights(75.0, 85.0, 70.0, 65.0, 70.0),
        ExerciseType::WeightTraining => weights(50.0, 45.0, 60.0, 70.0, 90.0),
        ExerciseType::Yoga => weights(45.0, 60.0, 90.0, 40.0, 75.0),
        ExerciseType::JumpingRope => weights(90.0, 80.0, 65.0, 85.0, 60.0),
        ExerciseType::Basketball => weights(85.0, 70.0, 75.0, 75.0, 65.0),
        ExerciseType::Badminton => weights(75.0, 65.0, 70.0, 65.0, 60.0),
        ExerciseType::Elliptical => weights(80.0, 75.0, 60.0, 70.0, 55.0),
    }
}

/// Intensity relative to 30 minutes of jogging three times a week.
pub fn exercise_index(profile: &ExerciseProfile) -> f64 {
    (f64::from(profile.duration_minutes) / BASELINE_MINUTES)
        * (f64::from(profile.frequency_per_week) / BASELINE_SESSIONS)
        * (calorie_factor(profile.exercise_type) / BASELINE_FACTOR)
}

pub fn calculate_benefits(profile: &ExerciseProfile) -> ExerciseResult {
    let factor = calorie_factor(profile.exercise_type);
    let per_session =
        (factor * f64::from(profile.weight_kg) * f64::from(profile.duration_minutes)).round();
    let weekly = (per_session * f64::from(profile.frequency_per_week)).round();

    let index = exercise_index(profile);
    let mood = mood_improvement(index);

    ExerciseResult {
        calories_per_session: per_session as u64,
        weekly_calories: weekly as u64,
        cardio_risk_reduction: round_to(index * 25.0, 1),
        mood_improvement: mood,
        mood_improvement_display: format!("{mood}%"),
        health_dimensions: health_dimensions(index, dimension_weights(profile.exercise_type)),
    }
}

pub fn mood_improvement(index: f64) -> u32 {
    let raw = (index * 60.0).round().max(0.0);
    if raw >= f64::from(MOOD_CAP) {
        MOOD_CAP
    } else {
        raw as u32
    }
}

pub fn health_dimensions(index: f64, weights: DimensionWeights) -> HealthDimensions {
    let score = |weight: f64| (index * weight).clamp(0.0, DIMENSION_CAP).round() as u32;
    HealthDimensions {
        cardio: score(weights.cardio),
        mental: score(weights.mental),
        metabolic: score(weights.metabolic),
        musculoskeletal: score(weights.musculoskeletal),
        respiratory: score(weights.respiratory),
    }
}
