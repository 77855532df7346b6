use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::response::ApiResult;
use crate::api::AppState;
use crate::models::{CreateCustomer, Customer, UpdateCustomer};

pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Json<Vec<Customer>>> {
    Ok(Json(state.customers.list().await?))
}

pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomer>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let Json(payload) = payload?;
    let customer = state.customers.create(payload).await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn get_customer(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Customer>> {
    let Path(customer_id) = path?;
    Ok(Json(state.customers.get(customer_id).await?))
}

pub async fn update_customer(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateCustomer>, JsonRejection>,
) -> ApiResult<Json<Customer>> {
    let Path(customer_id) = path?;
    let Json(payload) = payload?;
    Ok(Json(state.customers.update(customer_id, payload).await?))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(customer_id) = path?;
    state.customers.delete(customer_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
