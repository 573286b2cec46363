use chrono::NaiveDateTime;
use serde::Serialize;

use crate::calendar::timestamp::format_timestamp;

pub const DEFAULT_TITLE: &str = "Untitled Event";
pub const DEFAULT_COLOR: &str = "#4285f4";

pub type EventId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub color: String,
    pub location: Option<String>,
    pub recurrence_rule: Option<String>,
}

impl Event {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn ends_before_start(&self) -> bool {
        self.end < self.start
    }
}

/// An event that has not been assigned an id by the store yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub color: String,
    pub location: Option<String>,
    pub recurrence_rule: Option<String>,
}

impl NewEvent {
    /// All-day, untitled, zero-length event in the default color.
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: None,
            start,
            end: start,
            all_day: true,
            color: DEFAULT_COLOR.to_string(),
            location: None,
            recurrence_rule: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = end;
        self
    }

    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    pub fn with_recurrence_rule(mut self, rule: Option<String>) -> Self {
        self.recurrence_rule = rule;
        self
    }

    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            all_day: self.all_day,
            color: self.color,
            location: self.location,
            recurrence_rule: self.recurrence_rule,
        }
    }
}

/// Partial update. Only the scheduling fields and color can change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub all_day: Option<bool>,
    pub color: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.all_day.is_none() && self.color.is_none()
    }

    pub fn apply_to(self, event: &mut Event) {
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(color) = self.color {
            event.color = color;
        }
    }
}

/// Normalized wire form of a stored event, shared by the listing and
/// the create endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub color: String,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        let color = if event.color.is_empty() {
            DEFAULT_COLOR.to_string()
        } else {
            event.color.clone()
        };

        Self {
            id: event.id,
            title: event.title.clone(),
            start: format_timestamp(&event.start),
            end: format_timestamp(&event.end),
            all_day: event.all_day,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn nine_am() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap()
    }

    fn create_test_event(start: NaiveDateTime, end: NaiveDateTime) -> Event {
        NewEvent::starting_at(start)
            .with_title("Meeting")
            .with_end(end)
            .with_all_day(false)
            .into_event(1)
    }

    #[test]
    fn new_event_applies_defaults() {
        let event = NewEvent::starting_at(nine_am());

        assert_eq!(event.title, DEFAULT_TITLE);
        assert_eq!(event.end, event.start);
        assert!(event.all_day);
        assert_eq!(event.color, DEFAULT_COLOR);
        assert!(event.description.is_none());
    }

    #[test]
    fn event_duration_calculated_correctly() {
        let event = create_test_event(nine_am(), nine_am() + Duration::minutes(90));
        assert_eq!(event.duration_minutes(), 90);
    }

    #[test]
    fn detects_end_before_start() {
        let event = create_test_event(nine_am(), nine_am() - Duration::hours(1));
        assert!(event.ends_before_start());
    }

    #[test]
    fn patch_with_only_color_keeps_schedule() {
        let mut event = create_test_event(nine_am(), nine_am() + Duration::hours(1));
        let before = event.clone();

        EventPatch {
            color: Some("#34a853".to_string()),
            ..Default::default()
        }
        .apply_to(&mut event);

        assert_eq!(event.color, "#34a853");
        assert_eq!(event.start, before.start);
        assert_eq!(event.end, before.end);
        assert_eq!(event.all_day, before.all_day);
        assert_eq!(event.title, before.title);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(EventPatch::default().is_empty());
        let patch = EventPatch { all_day: Some(true), ..Default::default() };
        assert!(!patch.is_empty());
    }

    #[test]
    fn summary_uses_iso_timestamps() {
        let event = create_test_event(nine_am(), nine_am() + Duration::hours(1));
        let summary = EventSummary::from(&event);

        assert_eq!(summary.start, "2025-06-01T09:00:00");
        assert_eq!(summary.end, "2025-06-01T10:00:00");
        assert!(!summary.all_day);
    }

    #[test]
    fn summary_falls_back_to_default_color() {
        let mut event = create_test_event(nine_am(), nine_am());
        event.color = String::new();

        assert_eq!(EventSummary::from(&event).color, DEFAULT_COLOR);
    }

    #[test]
    fn summary_serializes_camel_case() {
        let event = create_test_event(nine_am(), nine_am());
        let json = serde_json::to_value(EventSummary::from(&event)).unwrap();

        assert_eq!(json["allDay"], false);
        assert_eq!(json["id"], 1);
    }
}
