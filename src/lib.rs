pub mod aggregator;
pub mod api;
pub mod calendar;
pub mod holidays;
pub mod storage;

pub use aggregator::{Aggregator, CalendarItem, YearSpan};
pub use api::{create_router, serve, AppState};
pub use calendar::{Event, EventPatch, HolidayEntry, NewEvent};
pub use storage::{Config, EventStore};
