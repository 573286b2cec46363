//! Request and response bodies.

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, Result};
use crate::calendar::{
    format_timestamp, month::weekday_name, parse_timestamp, Event, EventId, EventPatch,
    MonthLayout, NewEvent,
};

/// Query string of `GET /api/events/`.
#[derive(Debug, Default, Deserialize)]
pub struct EventRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: Option<bool>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub recurrence_rule: Option<String>,
}

impl CreateEventRequest {
    pub fn into_new_event(self) -> Result<NewEvent> {
        let start = self
            .start
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("Missing required field 'start'".to_string()))
            .and_then(|value| parse_timestamp(value).map_err(ApiError::from))?;

        let mut event = NewEvent::starting_at(start)
            .with_description(self.description)
            .with_location(self.location)
            .with_recurrence_rule(self.recurrence_rule);

        if let Some(title) = self.title {
            event = event.with_title(title);
        }
        if let Some(end) = self.end.as_deref() {
            event = event.with_end(parse_timestamp(end)?);
        }
        if let Some(all_day) = self.all_day {
            event = event.with_all_day(all_day);
        }
        if let Some(color) = self.color {
            event = event.with_color(color);
        }

        Ok(event)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: Option<bool>,
    pub color: Option<String>,
}

impl UpdateEventRequest {
    pub fn into_patch(self) -> Result<EventPatch> {
        Ok(EventPatch {
            start: self.start.as_deref().map(parse_timestamp).transpose()?,
            end: self.end.as_deref().map(parse_timestamp).transpose()?,
            all_day: self.all_day,
            color: self.color,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub color: String,
    pub location: Option<String>,
    pub recurrence_rule: Option<String>,
}

impl From<&Event> for EventDetailResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            start: format_timestamp(&event.start),
            end: format_timestamp(&event.end),
            all_day: event.all_day,
            color: event.color.clone(),
            location: event.location.clone(),
            recurrence_rule: event.recurrence_rule.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardDay {
    pub day: u32,
    pub weekday: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub month_name: &'static str,
    pub year: i32,
    pub month: u32,
    pub days: Vec<DashboardDay>,
    /// Sunday-first rows; `null` marks cells outside the month.
    pub weeks: Vec<Vec<Option<u32>>>,
}

impl From<&MonthLayout> for DashboardResponse {
    fn from(layout: &MonthLayout) -> Self {
        use chrono::Datelike;

        let days = layout
            .days_in_month()
            .map(|cell| DashboardDay {
                day: cell.date.day(),
                weekday: weekday_name(cell.date.weekday()),
            })
            .collect();

        let weeks = layout
            .weeks
            .iter()
            .map(|week| {
                week.days
                    .iter()
                    .map(|cell| cell.is_current_month.then(|| cell.date.day()))
                    .collect()
            })
            .collect();

        Self {
            month_name: layout.month_name(),
            year: layout.year,
            month: layout.month,
            days,
            weeks,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
