use async_trait::async_trait;

use crate::calendar::HolidayEntry;
use crate::holidays::HolidaySource;

/// Served whenever the holiday API cannot be used.
pub const FALLBACK_HOLIDAYS: [(&str, &str); 6] = [
    ("Republic Day", "01-26"),
    ("Holi", "03-14"),
    ("Independence Day", "08-15"),
    ("Gandhi Jayanti", "10-02"),
    ("Diwali", "10-21"),
    ("Christmas", "12-25"),
];

pub fn fallback_holidays(year: i32) -> Vec<HolidayEntry> {
    FALLBACK_HOLIDAYS
        .iter()
        .map(|(name, month_day)| HolidayEntry::new(name, format!("{year}-{month_day}")))
        .collect()
}

/// Holiday source that never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackHolidays;

#[async_trait]
impl HolidaySource for FallbackHolidays {
    async fn holidays_for_year(&self, year: i32) -> Vec<HolidayEntry> {
        fallback_holidays(year)
    }
}
