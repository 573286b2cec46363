//! Public holiday lookup.
//!
//! Holidays come from the Nager.Date API when it answers, and from a fixed
//! table otherwise. Callers never see a failure.

pub mod client;
pub mod fallback;

use std::sync::Arc;

use async_trait::async_trait;

use crate::calendar::HolidayEntry;
use crate::storage::config::HolidaysConfig;

pub use client::{HolidayError, NagerDateClient};
pub use fallback::{fallback_holidays, FallbackHolidays};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Holidays for `year`, in source order.
    async fn holidays_for_year(&self, year: i32) -> Vec<HolidayEntry>;
}

pub fn source_from_config(config: &HolidaysConfig) -> Result<Arc<dyn HolidaySource>, HolidayError> {
    if config.offline_mode {
        tracing::info!("Holiday API disabled, serving the built-in table");
        return Ok(Arc::new(FallbackHolidays));
    }

    let client = NagerDateClient::from_config(config)?;
    tracing::info!(
        "Holiday API at {} for country {}",
        config.base_url,
        config.country_code
    );
    Ok(Arc::new(client))
}
