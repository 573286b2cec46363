pub mod event;
pub mod holiday;
pub mod month;
pub mod timestamp;

pub use event::{Event, EventId, EventPatch, EventSummary, NewEvent, DEFAULT_COLOR, DEFAULT_TITLE};
pub use holiday::{HolidayEntry, HOLIDAY_COLOR};
pub use month::{calculate_layout, DayCell, MonthLayout, Week};
pub use timestamp::{format_timestamp, parse_timestamp, year_of, TimestampError};
