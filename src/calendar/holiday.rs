use serde::Serialize;

pub const HOLIDAY_COLOR: &str = "#ff6666";
pub const HOLIDAY_FLAG: &str = "🇮🇳";

/// A public holiday as shown on the calendar. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEntry {
    pub title: String,
    pub start: String,
    pub all_day: bool,
    pub color: String,
}

impl HolidayEntry {
    pub fn new(local_name: &str, date: impl Into<String>) -> Self {
        Self {
            title: format!("{HOLIDAY_FLAG} {local_name}"),
            start: date.into(),
            all_day: true,
            color: HOLIDAY_COLOR.to_string(),
        }
    }
}
