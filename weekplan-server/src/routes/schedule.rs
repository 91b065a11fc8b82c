//! Schedule generation endpoint.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use weekplan_core::{UserProfile, WeeklySchedule};
use weekplan_llm::{ScheduleSource, generate_weekly_schedule};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/schedule/generate", post(generate))
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub profile: UserProfile,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub schedule: WeeklySchedule,
    /// "llm", "fallback" or "degraded"
    pub source: &'static str,
    /// Human-readable list of what validation backfilled
    pub repairs: Vec<String>,
}

/// POST /api/schedule/generate - Run the generator for a profile
async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let generated = generate_weekly_schedule(&state.config.llm, &req.profile).await?;

    let source = match generated.source {
        ScheduleSource::Llm => "llm",
        ScheduleSource::Fallback => "fallback",
        ScheduleSource::Degraded => "degraded",
    };

    let repairs = generated
        .report
        .repairs
        .iter()
        .map(|r| format!("{r:?}"))
        .collect();

    Ok(Json(GenerateResponse {
        schedule: generated.schedule,
        source,
        repairs,
    }))
}
