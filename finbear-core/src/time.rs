//! Date math for due dates and billing cycles, plus the injectable clock.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Signed whole-day difference between two instants' calendar dates.
///
/// Both sides are floored to midnight before subtracting, so time-of-day
/// never leaks into the count. Negative result = `date` is in the past.
pub fn days_until(date: DateTime<Utc>, reference: DateTime<Utc>) -> i64 {
    (date.date_naive() - reference.date_naive()).num_days()
}

/// Same computation on plain calendar dates.
pub fn days_between(date: NaiveDate, reference: NaiveDate) -> i64 {
    (date - reference).num_days()
}

/// How far into a billing cycle a charge currently sits, as a percentage.
///
/// `elapsed = clamp(cycle - days_left, 0, cycle)`, so a charge due today
/// reads 100% and one a full cycle away reads 0%.
pub fn cycle_position_percent(days_left: i64, cycle_length_days: i64) -> f64 {
    let elapsed = (cycle_length_days - days_left).clamp(0, cycle_length_days);
    100.0 * elapsed as f64 / cycle_length_days as f64
}

/// Monthly cycle length used by the subscription view.
pub const MONTHLY_CYCLE_DAYS: i64 = 30;

/// Injectable time source so decisions are reproducible in tests.
pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;

    /// The current calendar day in the given timezone. This is the day the
    /// daily budget accumulates against.
    fn today(&self, tz: Tz) -> NaiveDate {
        self.now_utc().with_timezone(&tz).date_naive()
    }
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed instant, for tests and scripted replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn from_ymd_hms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Self {
        use chrono::TimeZone;
        Self(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    pub fn advance(&mut self, delta: chrono::Duration) {
        self.0 += delta;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn days_until_ignores_time_of_day() {
        let reference = Utc.with_ymd_and_hms(2026, 8, 26, 23, 50, 0).unwrap();
        let due = Utc.with_ymd_and_hms(2026, 8, 28, 0, 10, 0).unwrap();
        // Less than 27 hours apart, but two calendar days.
        assert_eq!(days_until(due, reference), 2);
    }

    #[test]
    fn days_until_zero_for_same_day() {
        let reference = Utc.with_ymd_and_hms(2026, 8, 26, 9, 0, 0).unwrap();
        let due = Utc.with_ymd_and_hms(2026, 8, 26, 21, 0, 0).unwrap();
        assert_eq!(days_until(due, reference), 0);
    }

    #[test]
    fn days_until_antisymmetric_under_swap() {
        let a = Utc.with_ymd_and_hms(2026, 8, 20, 8, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 9, 2, 17, 30, 0).unwrap();
        assert_eq!(days_until(a, b), -days_until(b, a));
        assert_eq!(days_until(a, b), -13);
    }

    #[test]
    fn cycle_position_clamps_both_ends() {
        assert_eq!(cycle_position_percent(0, MONTHLY_CYCLE_DAYS), 100.0);
        assert_eq!(cycle_position_percent(30, MONTHLY_CYCLE_DAYS), 0.0);
        // Overdue and far-future both clamp.
        assert_eq!(cycle_position_percent(-4, MONTHLY_CYCLE_DAYS), 100.0);
        assert_eq!(cycle_position_percent(45, MONTHLY_CYCLE_DAYS), 0.0);
        assert_eq!(cycle_position_percent(15, MONTHLY_CYCLE_DAYS), 50.0);
    }

    #[test]
    fn local_today_crosses_midnight_before_utc() {
        // 20:00 UTC on the 26th is already the 27th in Kolkata (+05:30).
        let clock = FixedClock::from_ymd_hms(2026, 8, 26, 20, 0, 0);
        let tz: chrono_tz::Tz = "Asia/Kolkata".parse().unwrap();
        assert_eq!(
            clock.today(tz),
            NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()
        );
        assert_eq!(
            clock.now_utc().date_naive(),
            NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
        );
    }

    #[test]
    fn fixed_clock_advances() {
        let mut clock = FixedClock::from_ymd_hms(2026, 8, 26, 10, 0, 0);
        clock.advance(Duration::seconds(6));
        assert_eq!(
            clock.now_utc(),
            Utc.with_ymd_and_hms(2026, 8, 26, 10, 0, 6).unwrap()
        );
    }
}
