//! Merges stored events with public holidays for a requested range.

use std::ops::RangeInclusive;

use serde::Serialize;
use thiserror::Error;

use crate::calendar::{year_of, EventSummary, HolidayEntry, TimestampError};
use crate::holidays::HolidaySource;
use crate::storage::{EventStore, StoreError};

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Invalid date range: {0}")]
    InvalidRange(#[from] TimestampError),
    #[error("Date range spans {requested} years, at most {limit} allowed")]
    RangeTooLarge { requested: usize, limit: usize },
    #[error("Event store error: {0}")]
    Store(#[from] StoreError),
}

/// Inclusive span of calendar years. Empty when `end < start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpan {
    pub start: i32,
    pub end: i32,
}

impl YearSpan {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Years covered by optional `start`/`end` query values. Without a
    /// start the span is `current_year` alone; without an end it is the
    /// start year alone.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        current_year: i32,
    ) -> Result<Self, TimestampError> {
        let start_year = match start {
            Some(value) => year_of(value)?,
            None => current_year,
        };
        let end_year = match end {
            Some(value) => year_of(value)?,
            None => start_year,
        };
        Ok(Self::new(start_year, end_year))
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end as i64 - self.start as i64 + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One element of the unified listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalendarItem {
    Event(EventSummary),
    Holiday(HolidayEntry),
}

pub struct Aggregator<'a> {
    store: &'a EventStore,
    holidays: &'a dyn HolidaySource,
    max_years: usize,
}

impl<'a> Aggregator<'a> {
    pub fn new(store: &'a EventStore, holidays: &'a dyn HolidaySource) -> Self {
        Self {
            store,
            holidays,
            max_years: usize::MAX,
        }
    }

    pub fn with_max_years(mut self, max_years: usize) -> Self {
        self.max_years = max_years;
        self
    }

    /// Every stored event, then the holidays of each year in `span`.
    ///
    /// Stored events are not filtered by the span.
    pub async fn collect(&self, span: YearSpan) -> Result<Vec<CalendarItem>, AggregateError> {
        if span.len() > self.max_years {
            return Err(AggregateError::RangeTooLarge {
                requested: span.len(),
                limit: self.max_years,
            });
        }

        let events = self.store.list_events()?;
        tracing::info!("Found {} stored events", events.len());

        let mut items: Vec<CalendarItem> = events
            .iter()
            .map(|event| CalendarItem::Event(EventSummary::from(event)))
            .collect();

        for year in span.years() {
            let holidays = self.holidays.holidays_for_year(year).await;
            tracing::debug!("Adding {} holidays for {}", holidays.len(), year);
            items.extend(holidays.into_iter().map(CalendarItem::Holiday));
        }

        tracing::info!("Returning {} calendar items for {}..={}", items.len(), span.start, span.end);
        Ok(items)
    }
}
