use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::calendar::NewEvent;
use crate::storage::store::{EventStore, StoreError};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

fn fixed_day(month: u32, day: u32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let date = NaiveDate::from_ymd_opt(2025, month, day)?;
    Some((date.and_hms_opt(0, 0, 0)?, date.and_hms_opt(23, 59, 0)?))
}

/// Demo events: three 2025 holidays plus work and personal entries
/// scheduled relative to `now`.
pub fn sample_events(now: NaiveDateTime) -> Vec<NewEvent> {
    let mut events = Vec::new();

    let holidays = [
        ("🇮🇳 Republic Day", 1, 26, "#ff6666", "National holiday celebrating the Constitution of India."),
        ("🎆 Diwali", 10, 21, "#fbbc04", "Festival of Lights, celebrated with family and friends."),
        ("🎄 Christmas", 12, 25, "#34a853", "Merry Christmas!"),
    ];
    for (title, month, day, color, description) in holidays {
        let Some((start, end)) = fixed_day(month, day) else { continue };
        events.push(
            NewEvent::starting_at(start)
                .with_title(title)
                .with_end(end)
                .with_all_day(true)
                .with_color(color)
                .with_description(Some(description.to_string())),
        );
    }

    let relative = [
        ("Team Meeting", 1, 9, 1, "#4285f4", "Weekly sync with project team."),
        ("Client Review Call", 2, 16, 1, "#34a853", "Quarterly project review meeting with client."),
        ("🏋️ Gym Workout", 1, 6, 1, "#a142f4", "Morning workout session."),
        ("🍽️ Dinner with Friends", 3, 20, 2, "#fbbc04", "Dinner at Olive Bistro."),
    ];
    for (title, days, hours, length, color, description) in relative {
        let start = now + Duration::days(days) + Duration::hours(hours);
        events.push(
            NewEvent::starting_at(start)
                .with_title(title)
                .with_end(start + Duration::hours(length))
                .with_all_day(false)
                .with_color(color)
                .with_description(Some(description.to_string())),
        );
    }

    events
}

/// Inserts the sample events, skipping any whose title is already stored.
pub fn seed_sample_events(store: &EventStore, now: NaiveDateTime) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();

    for event in sample_events(now) {
        if store.find_by_title(&event.title)?.is_some() {
            tracing::debug!("Seed event '{}' already present", event.title);
            report.skipped += 1;
            continue;
        }
        store.insert_event(event)?;
        report.inserted += 1;
    }

    tracing::info!("Seeded {} events ({} already present)", report.inserted, report.skipped);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap()
    }

    #[test]
    fn sample_set_has_seven_events() {
        let events = sample_events(now());

        assert_eq!(events.len(), 7);
        assert_eq!(events.iter().filter(|e| e.all_day).count(), 3);
    }

    #[test]
    fn relative_events_follow_now() {
        let events = sample_events(now());
        let meeting = events.iter().find(|e| e.title == "Team Meeting").unwrap();

        assert_eq!(meeting.start, now() + Duration::days(1) + Duration::hours(9));
        assert_eq!((meeting.end - meeting.start).num_minutes(), 60);
    }

    #[test]
    fn seeding_twice_is_idempotent() {
        let store = EventStore::open_in_memory().unwrap();

        let first = seed_sample_events(&store, now()).unwrap();
        let second = seed_sample_events(&store, now()).unwrap();

        assert_eq!(first, SeedReport { inserted: 7, skipped: 0 });
        assert_eq!(second, SeedReport { inserted: 0, skipped: 7 });
        assert_eq!(store.count_events().unwrap(), 7);
    }
}
