//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::holidays::HolidaySource;
use crate::storage::{Config, EventStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<EventStore>,
    pub holidays: Arc<dyn HolidaySource>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, store: EventStore, holidays: Arc<dyn HolidaySource>) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            holidays,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn max_years_per_request(&self) -> usize {
        self.config.holidays.max_years_per_request as usize
    }
}
