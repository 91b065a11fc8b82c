//! Notification and reminder-scheduling endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use weekplan_core::{
    Activity, NotificationSettings, UserProfile, WeekplanError, WeeklySchedule, derive_reminders,
};
use weekplan_notify::UserContext;

use crate::routes::AppError;
use crate::state::AppState;

const BROADCAST_TITLE: &str = "Weekplan Update";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications/register", post(register_token))
        .route("/api/notifications/sms", post(send_sms))
        .route("/api/notifications/push", post(send_push))
        .route("/api/notifications/broadcast", post(broadcast))
        .route("/api/notifications/schedule", post(schedule_reminders))
        .route("/api/health", get(health))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub token: String,
    pub user_id: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/notifications/register - Register a push device token
async fn register_token(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    if req.token.is_empty() || req.user_id.is_empty() {
        return Err(AppError::bad_request("Token and user_id are required"));
    }

    state
        .tokens
        .lock()
        .unwrap()
        .insert(req.user_id.clone(), req.token.clone());
    state
        .scheduler
        .update_device_token(&req.user_id, &req.token);

    tracing::info!(user = %req.user_id, "registered device token");

    Ok(Json(RegisterResponse {
        success: true,
        message: "Token registered successfully".to_string(),
    }))
}

#[derive(Deserialize)]
pub struct SmsRequest {
    pub to: String,
    pub message: String,
    #[serde(default)]
    pub user_id: String,
}

#[derive(Serialize)]
pub struct SmsResponse {
    pub success: bool,
    pub message_id: String,
}

/// POST /api/notifications/sms - Send one SMS
async fn send_sms(
    State(state): State<AppState>,
    Json(req): Json<SmsRequest>,
) -> Result<Json<SmsResponse>, AppError> {
    if req.to.is_empty() || req.message.is_empty() {
        return Err(AppError::bad_request("Phone number and message are required"));
    }

    let client = state
        .dispatcher
        .sms_client()
        .ok_or_else(|| AppError::unavailable("SMS transport not configured"))?;

    let sid = client.send_sms(&req.to, &req.message).await.map_err(|e| match e {
        WeekplanError::InvalidPhoneNumber(_) => {
            AppError::bad_request("Invalid phone number format")
        }
        other => AppError::from(other),
    })?;

    tracing::info!(user = %req.user_id, sid = %sid, "SMS sent");

    Ok(Json(SmsResponse {
        success: true,
        message_id: sid,
    }))
}

#[derive(Deserialize)]
pub struct PushRequest {
    pub token: String,
    pub message: String,
    pub activity: Option<Activity>,
    #[serde(default)]
    pub user_id: String,
}

#[derive(Serialize)]
pub struct PushResponse {
    pub success: bool,
}

/// POST /api/notifications/push - Send one push notification
async fn send_push(
    State(state): State<AppState>,
    Json(req): Json<PushRequest>,
) -> Result<Json<PushResponse>, AppError> {
    if req.token.is_empty() || req.message.is_empty() {
        return Err(AppError::bad_request("Token and message are required"));
    }

    let client = state
        .dispatcher
        .push_client()
        .ok_or_else(|| AppError::unavailable("Push transport not configured"))?;

    client
        .send_push(&req.token, &req.message, req.activity.as_ref(), &req.user_id)
        .await?;

    Ok(Json(PushResponse { success: true }))
}

#[derive(Deserialize)]
pub struct BroadcastRequest {
    pub message: String,
    pub title: Option<String>,
}

#[derive(Serialize)]
pub struct BroadcastResponse {
    pub success: bool,
    pub success_count: u32,
    pub failure_count: u32,
}

/// POST /api/notifications/broadcast - Send to every registered device
async fn broadcast(
    State(state): State<AppState>,
    Json(req): Json<BroadcastRequest>,
) -> Result<Json<BroadcastResponse>, AppError> {
    if req.message.is_empty() {
        return Err(AppError::bad_request("Message is required"));
    }

    let client = state
        .dispatcher
        .push_client()
        .ok_or_else(|| AppError::unavailable("Push transport not configured"))?;

    let tokens = state.registered_tokens();
    let title = req.title.as_deref().unwrap_or(BROADCAST_TITLE);
    let outcome = client.send_broadcast(&tokens, &req.message, title).await?;

    tracing::info!(
        "broadcast sent to {}/{} devices",
        outcome.success_count,
        tokens.len()
    );

    Ok(Json(BroadcastResponse {
        success: true,
        success_count: outcome.success_count,
        failure_count: outcome.failure_count,
    }))
}

#[derive(Deserialize)]
pub struct ScheduleRequest {
    pub user_id: String,
    pub profile: UserProfile,
    pub schedule: WeeklySchedule,
    /// Absent means default settings
    pub settings: Option<NotificationSettings>,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub reminders_armed: usize,
}

/// POST /api/notifications/schedule - (Re)derive and arm a user's reminders
///
/// Replaces the user's whole reminder set: stale rows from a previous
/// schedule never survive a regeneration.
async fn schedule_reminders(
    State(state): State<AppState>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    if req.user_id.is_empty() {
        return Err(AppError::bad_request("user_id is required"));
    }

    let settings = req.settings.unwrap_or_default();
    let now = Local::now().naive_local();
    let reminders = derive_reminders(&req.schedule, &settings, now);
    let armed = reminders.len();

    let mut context = UserContext::new(req.user_id.clone(), settings);
    context.device_token = state.token_for(&req.user_id);
    state.scheduler.schedule_user(context, reminders);

    tracing::info!(user = %req.user_id, goal = %req.profile.goal, "scheduled {armed} reminders");

    Ok(Json(ScheduleResponse {
        success: true,
        reminders_armed: armed,
    }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub active_users: usize,
    pub active_schedules: usize,
}

/// GET /api/health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        active_users: state.tokens.lock().unwrap().len(),
        active_schedules: state.scheduler.user_count(),
    })
}
