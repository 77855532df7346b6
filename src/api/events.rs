use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::api::response::ApiResult;
use crate::api::AppState;
use crate::models::{CreateMeeting, Event, Summary};

pub async fn create_meeting(
    State(state): State<AppState>,
    payload: Result<Json<CreateMeeting>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let Json(payload) = payload?;
    info!("Received meeting for customer {}", payload.customer_id);
    let event = state.events.create_meeting(payload).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn list_customer_events(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Vec<Event>>> {
    let Path(customer_id) = path?;
    let events = state.events.list_events_for_customer(customer_id).await?;

    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Event>> {
    let Path(event_id) = path?;
    let event = state.events.get_event(event_id).await?;

    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(event_id) = path?;
    state.events.delete_event(event_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_summary(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Summary>> {
    let Path(event_id) = path?;
    let summary = state.events.get_summary(event_id).await?;

    Ok(Json(summary))
}

pub async fn generate_summary(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Summary>> {
    let Path(event_id) = path?;
    info!("Summary requested for event {}", event_id);
    let summary = state.events.generate_summary(event_id).await?;

    Ok(Json(summary))
}

pub async fn regenerate_summary(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Summary>> {
    let Path(event_id) = path?;
    info!("Summary regeneration requested for event {}", event_id);
    let summary = state.events.regenerate_summary(event_id).await?;

    Ok(Json(summary))
}
