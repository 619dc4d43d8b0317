pub mod customer;
pub mod export;
pub mod order;
pub mod robot;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use robostore_core::ServiceError;

use crate::service::ShopService;

/// Shared application state.
pub type AppState = Arc<ShopService>;

/// Build the shop API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/shop/v1", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(customer::routes())
        .merge(order::routes())
        .merge(robot::routes())
        .merge(export::routes())
}

/// Standard API error response body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(serde_json::json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));
        (status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError {
            code: err.status_code().as_u16(),
            message: err.to_string(),
        }
    }
}

/// Wrap a service result as JSON, mapping errors to ApiError.
pub(crate) fn ok_json<T: Serialize>(result: Result<T, ServiceError>) -> Result<Json<T>, ApiError> {
    result.map(Json).map_err(ApiError::from)
}

/// Wrap a service create result as `201 Created` JSON.
pub(crate) fn created_json<T: Serialize>(
    result: Result<T, ServiceError>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    result
        .map(|v| (StatusCode::CREATED, Json(v)))
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::service::testutil::test_service;

    use super::*;

    #[test]
    fn service_errors_map_to_http_codes() {
        let e = ApiError::from(ServiceError::Validation("Invalid model.".into()));
        assert_eq!(e.code, 400);
        assert_eq!(e.message, "Invalid model.");

        let e = ApiError::from(ServiceError::Conflict("dup".into()));
        assert_eq!(e.code, 409);

        let e = ApiError::from(ServiceError::Mail("down".into()));
        assert_eq!(e.code, 500);
    }

    fn test_router() -> Router {
        let (svc, _mailer) = test_service();
        router(Arc::new(svc))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn robot_intake_succeeds_with_201_and_message() {
        let app = test_router();
        let response = app
            .oneshot(post_json(
                "/shop/v1/robots",
                r#"{"model": "R2", "version": "D2", "created": "2024-01-15 09:30:00"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_text(response).await;
        assert!(body.contains("Robot created successfully."));
    }

    #[tokio::test]
    async fn malformed_json_is_a_distinct_400() {
        let app = test_router();
        let response = app
            .oneshot(post_json("/shop/v1/robots", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_text(response).await;
        assert!(body.contains("Invalid JSON."));
    }

    #[tokio::test]
    async fn invalid_model_is_a_400_with_its_own_message() {
        let app = test_router();
        let response = app
            .oneshot(post_json(
                "/shop/v1/robots",
                r#"{"model": "BadModel", "version": "v1", "created": "2024-01-15 09:30:00"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_text(response).await;
        assert!(body.contains("Invalid model."));
    }

    #[tokio::test]
    async fn json_download_sets_the_attachment_header() {
        let app = test_router();
        let response = app
            .oneshot(get("/shop/v1/robots/download"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert_eq!(disposition, "attachment; filename=\"robots.json\"");
    }

    #[tokio::test]
    async fn weekly_report_is_an_xlsx_attachment() {
        let app = test_router();
        let response = app.oneshot(get("/shop/v1/robots/report")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers().clone();
        assert_eq!(
            headers.get(header::CONTENT_DISPOSITION).and_then(|v| v.to_str().ok()),
            Some("attachment; filename=\"robots.xlsx\""),
        );
        assert_eq!(
            headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
