use crate::models::{ColorBand, HabitType, ProgressReport};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use tracing::warn;

pub const START_DATE_KEY: &str = "quit-start-date";
pub const QUIT_TYPE_KEY: &str = "quit-type";
pub const TARGET_DAYS_KEY: &str = "quit-target-days";
pub const DEFAULT_TARGET_DAYS: u32 = 90;

/// Quit-habit progress as stored in three scalar keys.
#[derive(Debug, Clone, PartialEq)]
pub struct QuitProgress {
    pub start_date: DateTime<Utc>,
    pub quit_type: HabitType,
    pub target_days: u32,
}

impl QuitProgress {
    /// Missing or unreadable entries fall back to a fresh start at `now`
    /// for the habit currently selected.
    pub fn load<S: KeyValueStore>(store: &S, current: HabitType, now: DateTime<Utc>) -> Self {
        let start_date = store
            .get(START_DATE_KEY)
            .and_then(|raw| match DateTime::parse_from_rfc3339(&raw) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                Err(err) => {
                    warn!("ignoring stored {START_DATE_KEY}: {err}");
                    None
                }
            })
            .unwrap_or(now);

        let quit_type = store
            .get(QUIT_TYPE_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(current);

        let target_days = store
            .get(TARGET_DAYS_KEY)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_TARGET_DAYS);

        Self { start_date, quit_type, target_days }
    }

    pub fn report(&self, now: DateTime<Utc>) -> ProgressReport {
        let elapsed_days = (now - self.start_date).num_days().max(0);
        let target = f64::from(self.target_days.max(1));
        let percentage = (elapsed_days as f64 / target * 100.0).min(100.0);
        let color = ColorBand::from_percentage(percentage);

        ProgressReport {
            quit_type: self.quit_type,
            target_days: self.target_days,
            elapsed_days,
            percentage,
            percentage_display: percentage.round() as u32,
            color,
            color_hex: color.hex().to_string(),
        }
    }
}

pub fn refresh<S: KeyValueStore>(store: &S, current: HabitType) -> ProgressReport {
    refresh_at(store, current, Utc::now())
}

/// Read-only: never writes the implicit fresh start back.
pub fn refresh_at<S: KeyValueStore>(
    store: &S,
    current: HabitType,
    now: DateTime<Utc>,
) -> ProgressReport {
    QuitProgress::load(store, current, now).report(now)
}

/// Starts a new attempt. Confirmation happens in the browser before this is called.
pub fn reset_at<S: KeyValueStore>(
    store: &mut S,
    habit: HabitType,
    now: DateTime<Utc>,
) -> ProgressReport {
    store.set(START_DATE_KEY, now.to_rfc3339());
    store.set(QUIT_TYPE_KEY, habit.as_str().to_string());
    store.set(TARGET_DAYS_KEY, DEFAULT_TARGET_DAYS.to_string());
    refresh_at(store, habit, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreData;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_store_is_a_fresh_start() {
        let store = StoreData::default();
        let report = refresh_at(&store, HabitType::Drinking, now());
        assert_eq!(report.elapsed_days, 0);
        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.color, ColorBand::Red);
        assert_eq!(report.target_days, 90);
        assert_eq!(report.quit_type, HabitType::Drinking);
        assert!(store.is_empty());
    }

    #[test]
    fn reset_writes_three_keys() {
        let mut store = StoreData::default();
        let report = reset_at(&mut store, HabitType::Smoking, now());
        assert_eq!(report.elapsed_days, 0);
        assert_eq!(store.get(QUIT_TYPE_KEY).as_deref(), Some("smoking"));
        assert_eq!(store.get(TARGET_DAYS_KEY).as_deref(), Some("90"));
        assert!(store.get(START_DATE_KEY).is_some());
    }

    #[test]
    fn bands_follow_percentage() {
        let mut store = StoreData::default();
        reset_at(&mut store, HabitType::Smoking, now());

        let at = |days: i64, hours: i64| {
            refresh_at(&store, HabitType::Smoking, now() + Duration::days(days) + Duration::hours(hours))
        };

        let day_one = at(0, 23);
        assert_eq!(day_one.elapsed_days, 0);

        let amber = at(45, 0);
        assert_eq!(amber.elapsed_days, 45);
        assert_eq!(amber.percentage, 50.0);
        assert_eq!(amber.percentage_display, 50);
        assert_eq!(amber.color, ColorBand::Amber);

        let green = at(60, 0);
        assert_eq!(green.color, ColorBand::Green);
        assert_eq!(green.color_hex, "#2ecc71");

        let done = at(200, 0);
        assert_eq!(done.percentage, 100.0);
        assert_eq!(done.color, ColorBand::Green);
    }

    #[test]
    fn band_edges() {
        assert_eq!(ColorBand::from_percentage(32.9), ColorBand::Red);
        assert_eq!(ColorBand::from_percentage(33.0), ColorBand::Amber);
        assert_eq!(ColorBand::from_percentage(65.9), ColorBand::Amber);
        assert_eq!(ColorBand::from_percentage(66.0), ColorBand::Green);
    }

    #[test]
    fn bad_stored_values_fall_back() {
        let mut store = StoreData::default();
        store.set(START_DATE_KEY, "not a date".to_string());
        store.set(QUIT_TYPE_KEY, "vaping".to_string());
        store.set(TARGET_DAYS_KEY, "0".to_string());

        let progress = QuitProgress::load(&store, HabitType::Smoking, now());
        assert_eq!(progress.start_date, now());
        assert_eq!(progress.quit_type, HabitType::Smoking);
        assert_eq!(progress.target_days, DEFAULT_TARGET_DAYS);
    }

    #[test]
    fn custom_target_is_honoured() {
        let mut store = StoreData::default();
        reset_at(&mut store, HabitType::Drinking, now());
        store.set(TARGET_DAYS_KEY, "30".to_string());

        let report = refresh_at(&store, HabitType::Smoking, now() + Duration::days(15));
        assert_eq!(report.target_days, 30);
        assert_eq!(report.percentage, 50.0);
        assert_eq!(report.quit_type, HabitType::Drinking);
    }

    #[test]
    fn future_start_counts_as_zero() {
        let mut store = StoreData::default();
        reset_at(&mut store, HabitType::Smoking, now() + Duration::days(3));
        assert_eq!(refresh_at(&store, HabitType::Smoking, now()).elapsed_days, 0);
    }
}
