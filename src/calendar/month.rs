use chrono::{Datelike, Days, Month, NaiveDate, Weekday};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_current_month: bool,
}

impl DayCell {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_today: false,
            is_current_month: true,
        }
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_current_month(mut self, current_month: bool) -> Self {
        self.is_current_month = current_month;
        self
    }
}

impl MonthLayout {
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("")
    }

    /// Cells belonging to the laid-out month, in calendar order.
    pub fn days_in_month(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks
            .iter()
            .flat_map(|week| week.days.iter())
            .filter(|cell| cell.is_current_month)
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Lays out `month` of `year` as full weeks starting on Sunday. Leading and
/// trailing cells come from the neighbouring months.
pub fn calculate_layout(year: i32, month: u32, today: NaiveDate) -> Option<MonthLayout> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;

    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = next_month_first?.pred_opt()?;

    let days_before = first_day.weekday().num_days_from_sunday() as u64;
    let mut current_date = first_day.checked_sub_days(Days::new(days_before))?;

    let mut weeks = Vec::new();
    while current_date <= last_day {
        let mut days = Vec::with_capacity(7);
        for _ in 0..7 {
            days.push(
                DayCell::new(current_date)
                    .with_today(current_date == today)
                    .with_current_month(current_date.month() == month),
            );
            current_date = current_date.succ_opt()?;
        }
        weeks.push(Week { days });
    }

    Some(MonthLayout { year, month, weeks })
}
