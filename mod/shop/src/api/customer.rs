use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;

use robostore_core::{ListParams, ListResult};

use crate::model::Customer;

use super::{ApiError, AppState, created_json, ok_json};

pub fn routes() -> Router<AppState> {
    Router::new().route("/customers", post(create_customer).get(list_customers))
}

#[derive(Deserialize)]
struct CreateCustomerBody {
    email: String,
}

async fn create_customer(
    State(svc): State<AppState>,
    Json(body): Json<CreateCustomerBody>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    created_json(svc.create_customer(body.email))
}

async fn list_customers(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<Customer>>, ApiError> {
    ok_json(svc.list_customers(&params))
}
