//! Form snapshots in the key/value store.
//!
//! Values are kept as the raw strings the user typed so a reload shows
//! exactly what was entered. Typed profiles are extracted separately by
//! [`HabitForm::extract`] and [`ExerciseForm::extract`].

use crate::models::{ExerciseProfile, ExerciseType, HabitProfile, HabitType};
use crate::storage::KeyValueStore;
use crate::validation::{ErrorSlots, field_spec, validate_raw};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

pub const HABIT_KEY: &str = "healthSimulator_smokingData";
pub const EXERCISE_KEY: &str = "healthSimulator_exerciseData";
pub const LAST_SAVED_KEY: &str = "healthSimulator_lastSaved";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitForm {
    pub habit_type: String,
    pub cigarettes_per_day: String,
    pub cigarette_price: String,
    pub cigarettes_per_pack: String,
    pub drinks_per_day: String,
    pub drink_price: String,
    pub quit_period: String,
}

impl Default for HabitForm {
    fn default() -> Self {
        Self {
            habit_type: HabitType::Smoking.as_str().to_string(),
            cigarettes_per_day: "10".to_string(),
            cigarette_price: "20".to_string(),
            cigarettes_per_pack: "20".to_string(),
            drinks_per_day: "200".to_string(),
            drink_price: "50".to_string(),
            quit_period: "12".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseForm {
    pub exercise_type: String,
    pub exercise_duration: String,
    pub exercise_frequency: String,
    pub user_weight: String,
}

impl Default for ExerciseForm {
    fn default() -> Self {
        Self {
            exercise_type: ExerciseType::Jogging.as_str().to_string(),
            exercise_duration: "30".to_string(),
            exercise_frequency: "3".to_string(),
            user_weight: "70".to_string(),
        }
    }
}

fn checked(slots: &mut ErrorSlots, field: &str, raw: &str) -> f64 {
    let outcome = match field_spec(field) {
        Some(spec) => slots.check(&spec, raw),
        None => validate_raw(field, raw, 0.0),
    };
    outcome.value
}

fn whole(value: f64) -> u32 {
    value.clamp(0.0, f64::from(u32::MAX)) as u32
}

impl HabitForm {
    pub fn extract(&self, slots: &mut ErrorSlots) -> Result<HabitProfile, String> {
        Ok(HabitProfile {
            habit_type: self.habit_type.parse()?,
            cigarettes_per_day: whole(checked(slots, "cigarettes-per-day", &self.cigarettes_per_day)),
            cigarette_price: checked(slots, "cigarette-price", &self.cigarette_price),
            cigarettes_per_pack: whole(checked(slots, "cigarettes-per-pack", &self.cigarettes_per_pack)),
            drinks_per_day: whole(checked(slots, "drinks-per-day", &self.drinks_per_day)),
            drink_price: checked(slots, "drink-price", &self.drink_price),
            quit_period_days: whole(checked(slots, "quit-period", &self.quit_period)),
        })
    }
}

impl ExerciseForm {
    pub fn extract(&self, slots: &mut ErrorSlots) -> Result<ExerciseProfile, String> {
        Ok(ExerciseProfile {
            exercise_type: self.exercise_type.parse()?,
            duration_minutes: whole(checked(slots, "exercise-duration", &self.exercise_duration)),
            frequency_per_week: whole(checked(slots, "exercise-frequency", &self.exercise_frequency)),
            weight_kg: whole(checked(slots, "user-weight", &self.user_weight)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub habit: Option<HabitForm>,
    pub exercise: Option<ExerciseForm>,
    pub last_saved: Option<DateTime<Utc>>,
}

pub fn save_snapshot<S: KeyValueStore>(
    store: &mut S,
    habit: &HabitForm,
    exercise: &ExerciseForm,
    now: DateTime<Utc>,
) -> Result<(), serde_json::Error> {
    let habit = serde_json::to_string(habit)?;
    let exercise = serde_json::to_string(exercise)?;
    store.set(HABIT_KEY, habit);
    store.set(EXERCISE_KEY, exercise);
    store.set(LAST_SAVED_KEY, now.to_rfc3339());
    Ok(())
}

/// Broken entries are logged and treated as absent.
pub fn load_snapshot<S: KeyValueStore>(store: &S) -> Snapshot {
    Snapshot {
        habit: load_record(store, HABIT_KEY),
        exercise: load_record(store, EXERCISE_KEY),
        last_saved: store.get(LAST_SAVED_KEY).and_then(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|err| error!("failed to load saved data: {LAST_SAVED_KEY}: {err}"))
                .ok()
        }),
    }
}

fn load_record<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore,
    T: for<'de> Deserialize<'de>,
{
    let raw = store.get(key)?;
    serde_json::from_str(&raw)
        .map_err(|err| error!("failed to load saved data: {key}: {err}"))
        .ok()
}
