use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;

use robostore_core::{ListParams, ListResult};

use crate::model::{Order, OrderWithCustomer};

use super::{ApiError, AppState, created_json, ok_json};

pub fn routes() -> Router<AppState> {
    Router::new().route("/orders", post(create_order).get(list_orders))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderBody {
    customer_id: String,
    robot_serial: String,
}

async fn create_order(
    State(svc): State<AppState>,
    Json(body): Json<CreateOrderBody>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    created_json(svc.create_order(body.customer_id, body.robot_serial))
}

async fn list_orders(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<OrderWithCustomer>>, ApiError> {
    ok_json(svc.list_orders(&params))
}
