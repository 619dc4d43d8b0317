use axum::{
    Json, Router,
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::service::export::RobotExport;

use super::{ApiError, AppState, ok_json};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/robots/download", get(download_robots))
        .route("/robots/report", get(weekly_report))
}

/// Robots rendered inline as a JSON array. Mounted on `GET /robots`
/// next to the intake handler (see `api::robot`).
pub(super) async fn list_robots(
    State(svc): State<AppState>,
) -> Result<Json<Vec<RobotExport>>, ApiError> {
    ok_json(svc.export_robots())
}

/// Same array, served as a file download.
async fn download_robots(State(svc): State<AppState>) -> Result<Response, ApiError> {
    let items = svc.export_robots().map_err(ApiError::from)?;
    let body = serde_json::to_vec_pretty(&items).map_err(|e| ApiError {
        code: 500,
        message: e.to_string(),
    })?;

    Ok((
        [
            (CONTENT_TYPE, "application/json"),
            (CONTENT_DISPOSITION, "attachment; filename=\"robots.json\""),
        ],
        body,
    )
        .into_response())
}

/// Weekly production summary as an xlsx attachment.
async fn weekly_report(State(svc): State<AppState>) -> Result<Response, ApiError> {
    let bytes = svc.weekly_report_xlsx().map_err(ApiError::from)?;

    Ok((
        [
            (CONTENT_TYPE, XLSX_MIME),
            (CONTENT_DISPOSITION, "attachment; filename=\"robots.xlsx\""),
        ],
        bytes,
    )
        .into_response())
}
