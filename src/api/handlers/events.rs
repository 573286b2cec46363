//! Event handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use chrono::{Datelike, Local};

use crate::aggregator::{Aggregator, CalendarItem, YearSpan};
use crate::api::error::{ApiError, Result};
use crate::api::state::AppState;
use crate::api::types::{
    CreateEventRequest, EventDetailResponse, EventRangeQuery, SuccessResponse, UpdateEventRequest,
};
use crate::calendar::{EventId, EventSummary};

/// GET /api/events/ - Stored events followed by holidays for the requested years.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventRangeQuery>,
) -> Result<Json<Vec<CalendarItem>>> {
    tracing::info!("Listing events for start={:?} end={:?}", query.start, query.end);

    let span = YearSpan::resolve(
        query.start.as_deref(),
        query.end.as_deref(),
        Local::now().year(),
    )?;

    let items = Aggregator::new(&state.store, state.holidays.as_ref())
        .with_max_years(state.max_years_per_request())
        .collect(span)
        .await?;

    Ok(Json(items))
}

/// POST /api/events/create/ - Create an event.
pub async fn create_event(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Json<EventSummary>> {
    let Json(request) = payload?;
    let new_event = request.into_new_event()?;
    if new_event.end < new_event.start {
        tracing::warn!("Event '{}' ends before it starts", new_event.title);
    }

    let event = state.store.insert_event(new_event)?;
    tracing::info!("Created event {} '{}'", event.id, event.title);

    Ok(Json(EventSummary::from(&event)))
}

/// GET /api/events/:id/ - Full detail of one event.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<EventDetailResponse>> {
    let event = state
        .store
        .load_event(id)?
        .ok_or_else(ApiError::event_not_found)?;

    Ok(Json(EventDetailResponse::from(&event)))
}

/// PUT /api/events/:id/update/ - Overwrite start, end, allDay or color.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
    payload: std::result::Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>> {
    let mut event = state
        .store
        .load_event(id)?
        .ok_or_else(ApiError::event_not_found)?;

    let Json(request) = payload?;
    request.into_patch()?.apply_to(&mut event);
    if event.ends_before_start() {
        tracing::warn!("Event {} now ends before it starts", id);
    }

    if !state.store.save_event(&event)? {
        return Err(ApiError::event_not_found());
    }
    tracing::info!("Updated event {}", id);

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/events/:id/delete/ - Remove an event.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<Json<SuccessResponse>> {
    if !state.store.delete_event(id)? {
        return Err(ApiError::event_not_found());
    }
    tracing::info!("Deleted event {}", id);

    Ok(Json(SuccessResponse::ok()))
}
