use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use maxfit_core::error::MaxFitError;
use maxfit_core::program::{
    nutrition_programs, workout_programs, FitnessProgram, WorkoutFilter, WorkoutStats,
};

use crate::app_state::AppState;
use crate::context::SessionUser;
use crate::services::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkoutQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: WorkoutFilter,
}

#[derive(Debug, Serialize)]
pub struct WorkoutEntry {
    #[serde(flatten)]
    pub program: FitnessProgram,
    pub stats: WorkoutStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionEntry {
    #[serde(flatten)]
    pub program: FitnessProgram,
    pub daily_calories: i64,
    pub snack_calories: i64,
}

#[derive(Debug, Serialize)]
pub struct Listing<T> {
    pub programs: Vec<T>,
}

/// `GET /dashboard/workout-plan?q=&type=`
pub async fn workout_plan(
    State(app): State<AppState>,
    Extension(user): Extension<SessionUser>,
    query: Result<Query<WorkoutQuery>, QueryRejection>,
) -> Result<Json<Listing<WorkoutEntry>>, ApiError> {
    let Query(q) = query.map_err(|e| MaxFitError::BadRequest(format!("invalid query: {e}")))?;
    let all = app.programs().programs_for(&user.email).await?;

    let programs = workout_programs(&all, q.q.as_deref(), q.kind)
        .into_iter()
        .filter_map(|p| {
            let stats = WorkoutStats::of(p.workout_plan.as_ref()?);
            Some(WorkoutEntry {
                program: p.clone(),
                stats,
            })
        })
        .collect();

    Ok(Json(Listing { programs }))
}

/// `GET /dashboard/nutrition-plan`
pub async fn nutrition_plan(
    State(app): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<Listing<NutritionEntry>>, ApiError> {
    let all = app.programs().programs_for(&user.email).await?;

    let programs = nutrition_programs(&all)
        .into_iter()
        .filter_map(|p| {
            let diet = p.diet_plan.as_ref()?;
            Some(NutritionEntry {
                daily_calories: diet.daily_calories(),
                snack_calories: diet.snack_calories(),
                program: p.clone(),
            })
        })
        .collect();

    Ok(Json(Listing { programs }))
}
