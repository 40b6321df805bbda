//! Recurring-charge risk assessment: which subscriptions bill soon.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::{MONTHLY_CYCLE_DAYS, cycle_position_percent, days_between};

/// Window (in days) inside which an upcoming charge counts as due soon.
pub const DUE_SOON_WINDOW_DAYS: i64 = 5;

/// A recurring monthly charge. Externally supplied and read-only to the
/// core; the "skip month" affordance lives outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u64,
    pub name: String,
    /// Whole currency units, always positive.
    pub amount: i64,
    pub due_date: NaiveDate,
    /// Presentation hint carried through untouched.
    pub color_tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueStatus {
    /// Billing date already passed.
    Overdue,
    /// Bills within the due-soon window (0..=5 days).
    DueSoon,
    /// Further out than the window.
    Upcoming,
}

impl Subscription {
    /// Signed days until the billing date. Negative = overdue.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        days_between(self.due_date, today)
    }

    pub fn due_status(&self, today: NaiveDate) -> DueStatus {
        let days_left = self.days_left(today);
        if days_left < 0 {
            DueStatus::Overdue
        } else if days_left <= DUE_SOON_WINDOW_DAYS {
            DueStatus::DueSoon
        } else {
            DueStatus::Upcoming
        }
    }

    /// Position in the 30-day billing cycle, 0% right after billing to
    /// 100% on the billing date.
    pub fn cycle_position(&self, today: NaiveDate) -> f64 {
        cycle_position_percent(self.days_left(today), MONTHLY_CYCLE_DAYS)
    }
}

/// Outcome of a risk pass over the subscription list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Due-soon items in input order (no re-sort).
    pub due_soon: Vec<Subscription>,
    /// First due-soon item encountered, if any.
    pub most_urgent: Option<Subscription>,
    /// Already-past billing dates, surfaced separately so callers can
    /// escalate; never mixed into `due_soon`.
    pub overdue: Vec<Subscription>,
}

/// Classify every subscription against `today`. Pure: repeated calls with
/// unchanged inputs return equal results.
pub fn assess(subscriptions: &[Subscription], today: NaiveDate) -> RiskAssessment {
    let mut due_soon = Vec::new();
    let mut overdue = Vec::new();

    for sub in subscriptions {
        match sub.due_status(today) {
            DueStatus::DueSoon => due_soon.push(sub.clone()),
            DueStatus::Overdue => overdue.push(sub.clone()),
            DueStatus::Upcoming => {}
        }
    }

    RiskAssessment {
        most_urgent: due_soon.first().cloned(),
        due_soon,
        overdue,
    }
}

/// Sum of all recurring amounts, for the subscriptions footer.
pub fn total_recurring(subscriptions: &[Subscription]) -> i64 {
    subscriptions.iter().map(|s| s.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
    }

    fn sub(id: u64, name: &str, amount: i64, days_from_today: i64) -> Subscription {
        Subscription {
            id,
            name: name.to_string(),
            amount,
            due_date: today() + chrono::Duration::days(days_from_today),
            color_tag: "bg-red-500".to_string(),
        }
    }

    #[test]
    fn due_soon_window_boundaries() {
        assert_eq!(sub(1, "Netflix", 649, 0).due_status(today()), DueStatus::DueSoon);
        assert_eq!(sub(1, "Netflix", 649, 5).due_status(today()), DueStatus::DueSoon);
        assert_eq!(sub(1, "Netflix", 649, 6).due_status(today()), DueStatus::Upcoming);
        assert_eq!(sub(1, "Netflix", 649, -1).due_status(today()), DueStatus::Overdue);
    }

    #[test]
    fn assess_keeps_input_order_and_picks_first_urgent() {
        let subs = vec![
            sub(1, "Netflix", 649, 2),
            sub(2, "Spotify", 119, 15),
            sub(3, "iCloud", 75, 5),
        ];
        let result = assess(&subs, today());

        assert_eq!(result.due_soon.len(), 2);
        assert_eq!(result.due_soon[0].name, "Netflix");
        assert_eq!(result.due_soon[1].name, "iCloud");
        assert_eq!(result.most_urgent.as_ref().unwrap().name, "Netflix");
        assert!(result.overdue.is_empty());
    }

    #[test]
    fn overdue_items_are_separated_not_due_soon() {
        let subs = vec![sub(1, "Gym", 500, -3), sub(2, "Netflix", 649, 1)];
        let result = assess(&subs, today());

        assert_eq!(result.overdue.len(), 1);
        assert_eq!(result.overdue[0].name, "Gym");
        assert_eq!(result.due_soon.len(), 1);
        assert_eq!(result.most_urgent.as_ref().unwrap().name, "Netflix");
    }

    #[test]
    fn assess_is_idempotent_and_nonmutating() {
        let subs = vec![sub(1, "Netflix", 649, 2)];
        let before = subs.clone();
        let first = assess(&subs, today());
        let second = assess(&subs, today());
        assert_eq!(first, second);
        assert_eq!(subs, before);
    }

    #[test]
    fn empty_due_soon_yields_no_most_urgent() {
        let subs = vec![sub(1, "Spotify", 119, 15)];
        let result = assess(&subs, today());
        assert!(result.most_urgent.is_none());
        assert!(result.due_soon.is_empty());
    }

    #[test]
    fn cycle_position_tracks_days_left() {
        // Due in 2 days: 28 of 30 days elapsed.
        let s = sub(1, "Netflix", 649, 2);
        assert!((s.cycle_position(today()) - 100.0 * 28.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn total_recurring_sums_amounts() {
        let subs = vec![
            sub(1, "Netflix", 649, 2),
            sub(2, "Spotify", 119, 15),
            sub(3, "iCloud", 75, 5),
        ];
        assert_eq!(total_recurring(&subs), 843);
    }
}
