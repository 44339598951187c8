use crate::charts::{Chart, ChartRegistry, EXERCISE_CHART, RISK_CHART};
use crate::errors::AppError;
use crate::models::{
    ExerciseCalculation, FormsResponse, HabitCalculation, ProgressQuery, ProgressReport,
    ResetProgressRequest, SaveFormsRequest, SaveResponse, ValidateRequest, ValidateResponse,
};
use crate::persistence::{ExerciseForm, HabitForm, load_snapshot, save_snapshot};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use crate::validation::field_spec;
use crate::{exercise, habit, progress};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::{Local, Utc};
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    let snapshot = load_snapshot(&*store);
    Html(render_index(
        &snapshot.habit.unwrap_or_default(),
        &snapshot.exercise.unwrap_or_default(),
    ))
}

pub async fn get_forms(State(state): State<AppState>) -> Json<FormsResponse> {
    let store = state.store.lock().await;
    let snapshot = load_snapshot(&*store);
    let message = snapshot.last_saved.map(|saved| {
        format!(
            "Loaded data saved at {}",
            saved.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        )
    });

    Json(FormsResponse {
        habit: snapshot.habit.unwrap_or_default(),
        exercise: snapshot.exercise.unwrap_or_default(),
        last_saved: snapshot.last_saved,
        message,
    })
}

pub async fn save_forms(
    State(state): State<AppState>,
    Json(payload): Json<SaveFormsRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let now = Utc::now();
    let mut store = state.store.lock().await;
    save_snapshot(&mut *store, &payload.habit, &payload.exercise, now)?;
    persist_data(&state.data_path, &store).await?;
    info!(habit = %payload.habit.habit_type, exercise = %payload.exercise.exercise_type, "forms saved");

    Ok(Json(SaveResponse {
        saved_at: now,
        message: "Data saved automatically".to_string(),
    }))
}

pub async fn validate_field(
    State(state): State<AppState>,
    Json(payload): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError> {
    let spec = field_spec(payload.field.trim())
        .ok_or_else(|| AppError::not_found(format!("unknown field '{}'", payload.field)))?;

    let mut slots = state.errors.lock().await;
    let outcome = slots.check(&spec, &payload.value);

    Ok(Json(ValidateResponse {
        field: spec.id.to_string(),
        value: outcome.value,
        error: outcome.error,
    }))
}

pub async fn calculate_habit(
    State(state): State<AppState>,
    Json(form): Json<HabitForm>,
) -> Result<Json<HabitCalculation>, AppError> {
    let (profile, errors) = {
        let mut slots = state.errors.lock().await;
        let profile = form.extract(&mut slots).map_err(AppError::bad_request)?;
        (profile, slots.active())
    };

    let result = habit::calculate_benefits(&profile);
    debug!(?profile, ?result, "habit benefits calculated");

    let progress = {
        let store = state.store.lock().await;
        progress::refresh(&*store, profile.habit_type)
    };

    state
        .charts
        .lock()
        .await
        .update_dataset(RISK_CHART, result.risk_reductions.to_series())?;

    Ok(Json(HabitCalculation {
        profile,
        result,
        progress,
        errors,
    }))
}

pub async fn calculate_exercise(
    State(state): State<AppState>,
    Json(form): Json<ExerciseForm>,
) -> Result<Json<ExerciseCalculation>, AppError> {
    let (profile, errors) = {
        let mut slots = state.errors.lock().await;
        let profile = form.extract(&mut slots).map_err(AppError::bad_request)?;
        (profile, slots.active())
    };

    let result = exercise::calculate_benefits(&profile);
    debug!(?profile, ?result, "exercise benefits calculated");

    state
        .charts
        .lock()
        .await
        .update_dataset(EXERCISE_CHART, result.health_dimensions.to_series())?;

    Ok(Json(ExerciseCalculation {
        profile,
        result,
        errors,
    }))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Json<ProgressReport> {
    let store = state.store.lock().await;
    Json(progress::refresh(&*store, query.habit.unwrap_or_default()))
}

pub async fn reset_progress(
    State(state): State<AppState>,
    Json(payload): Json<ResetProgressRequest>,
) -> Result<Json<ProgressReport>, AppError> {
    let mut store = state.store.lock().await;
    let report = progress::reset_at(&mut *store, payload.habit_type, Utc::now());
    persist_data(&state.data_path, &store).await?;
    info!(quit_type = %report.quit_type, target_days = report.target_days, "quit progress reset");

    Ok(Json(report))
}

pub async fn get_charts(State(state): State<AppState>) -> Json<ChartRegistry> {
    let charts = state.charts.lock().await;
    Json(charts.clone())
}

pub async fn get_chart(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Chart>, AppError> {
    let charts = state.charts.lock().await;
    charts
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("unknown chart '{name}'")))
}
