use chrono::{Datelike, Duration, Local, NaiveDate};

/// A Monday-to-Sunday calendar window. Week boundaries follow the host's
/// local clock; there is no per-user timezone handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    pub fn containing(date: NaiveDate) -> Self {
        let start = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_starts_on_monday_and_ends_on_sunday() {
        // 2025-01-15 is a Wednesday
        let window = WeekWindow::containing(day(2025, 1, 15));
        assert_eq!(window.start, day(2025, 1, 13));
        assert_eq!(window.end, day(2025, 1, 19));
    }

    #[test]
    fn monday_anchors_its_own_window() {
        let monday = day(2025, 1, 13);
        let window = WeekWindow::containing(monday);
        assert_eq!(window.start, monday);
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        let window = WeekWindow::containing(day(2025, 1, 19));
        assert_eq!(window.start, day(2025, 1, 13));
    }

    #[test]
    fn window_spans_month_boundaries() {
        // 2025-03-01 is a Saturday
        let window = WeekWindow::containing(day(2025, 3, 1));
        assert_eq!(window.start, day(2025, 2, 24));
        assert_eq!(window.end, day(2025, 3, 2));
        assert!(window.contains(day(2025, 2, 28)));
        assert!(!window.contains(day(2025, 3, 3)));
    }
}
