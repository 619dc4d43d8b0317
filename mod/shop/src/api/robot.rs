use axum::{
    Form, Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Redirect,
    routing::post,
};
use serde::Deserialize;
use tracing::info;

use robostore_core::now_stamp;

use super::{ApiError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/robots", post(create_robot).get(super::export::list_robots))
        .route("/robots/form", post(create_robot_form))
}

/// JSON API intake.
///
/// Body: `{"model": "...", "version": "...", "created": "YYYY-MM-DD HH:MM:SS"}`.
/// Distinct 400s for malformed JSON, invalid model, and invalid date;
/// 201 with a success message otherwise. Missing string fields fall
/// through to the corresponding validation error.
async fn create_robot(
    State(svc): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let Json(data) = body.map_err(|_| ApiError {
        code: 400,
        message: "Invalid JSON.".into(),
    })?;
    info!(payload = %data, "received robot intake payload");

    let model = data.get("model").and_then(|v| v.as_str()).unwrap_or_default();
    let version = data.get("version").and_then(|v| v.as_str()).unwrap_or_default();
    let created = data.get("created").and_then(|v| v.as_str()).unwrap_or_default();

    svc.create_robot(model, version, created)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "Robot created successfully."})),
    ))
}

#[derive(Deserialize)]
struct RobotForm {
    model: String,
    version: String,
    #[serde(default)]
    created: Option<String>,
}

/// Form intake. `created` is optional and defaults to now; when given
/// it must be in the wire format. Redirects to the robot list on
/// success.
async fn create_robot_form(
    State(svc): State<AppState>,
    Form(form): Form<RobotForm>,
) -> Result<Redirect, ApiError> {
    let created = match form.created.as_deref() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => now_stamp(),
    };

    svc.create_robot(&form.model, &form.version, &created)?;

    Ok(Redirect::to("/shop/v1/robots"))
}
