//! Daily budget ledger: spend recording, safe-to-spend, over-limit status.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

/// Spending categories. The closed set mirrors the app's category picker;
/// free-text labels entered against a simulated debit become `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food")]
    Food,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Entmt")]
    Entertainment,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Bills")]
    Bills,
    #[serde(rename = "Other")]
    Other,
    #[serde(untagged)]
    Custom(String),
}

impl Category {
    /// Parse a picker label; anything unrecognized becomes a custom label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Food" => Category::Food,
            "Travel" => Category::Travel,
            "Entmt" | "Entertainment" => Category::Entertainment,
            "Shopping" => Category::Shopping,
            "Bills" => Category::Bills,
            "Other" => Category::Other,
            other => Category::Custom(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Entertainment => "Entmt",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other => "Other",
            Category::Custom(s) => s,
        }
    }

    /// True for the categories the coach treats as regret spending.
    pub fn is_discretionary(&self) -> bool {
        matches!(self, Category::Entertainment | Category::Shopping)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded spend. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub title: String,
    /// Whole currency units, always positive.
    pub amount: i64,
    pub category: Category,
    pub recorded_at: DateTime<Utc>,
}

/// Holds the daily limit, the running spent-today counter, and the
/// session's transaction history (most recent first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLedger {
    daily_limit: i64,
    spent_today: i64,
    /// The local calendar day `spent_today` accumulates against.
    day: NaiveDate,
    history: Vec<Transaction>,
    next_id: u64,
}

impl BudgetLedger {
    pub fn new(daily_limit: i64, day: NaiveDate) -> Result<Self> {
        if daily_limit <= 0 {
            return Err(CoachError::InvalidConfiguration(daily_limit));
        }
        Ok(Self {
            daily_limit,
            spent_today: 0,
            day,
            history: Vec::new(),
            next_id: 1,
        })
    }

    /// Restore a ledger mid-day, e.g. the demo session's opening state.
    /// A negative opening is rejected, not clamped.
    pub fn with_opening_spend(mut self, spent_today: i64) -> Result<Self> {
        if spent_today < 0 {
            return Err(CoachError::InvalidAmount(spent_today));
        }
        self.spent_today = spent_today;
        Ok(self)
    }

    /// Record a spend for `day`, rolling the daily counter first if the
    /// ledger's day has passed. Returns the appended transaction.
    pub fn record_spend(
        &mut self,
        amount: i64,
        category: Category,
        day: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<&Transaction> {
        if amount <= 0 {
            return Err(CoachError::InvalidAmount(amount));
        }
        self.roll_day(day);

        let txn = Transaction {
            id: self.next_id,
            title: category.label().to_string(),
            amount,
            category,
            recorded_at: now,
        };
        self.next_id += 1;
        self.spent_today += amount;
        self.history.insert(0, txn);
        Ok(&self.history[0])
    }

    /// Restore a prior transaction into the history without touching the
    /// daily counter. For rebuilding a session; call oldest first.
    pub fn seed_transaction(
        &mut self,
        title: &str,
        amount: i64,
        category: Category,
        recorded_at: DateTime<Utc>,
    ) -> Result<()> {
        if amount <= 0 {
            return Err(CoachError::InvalidAmount(amount));
        }
        self.history.insert(
            0,
            Transaction {
                id: self.next_id,
                title: title.to_string(),
                amount,
                category,
                recorded_at,
            },
        );
        self.next_id += 1;
        Ok(())
    }

    /// Reset `spent_today` when the local calendar day has advanced.
    /// History is kept; only the daily counter is tied to the day.
    pub fn roll_day(&mut self, day: NaiveDate) {
        if day > self.day {
            self.day = day;
            self.spent_today = 0;
        }
    }

    /// Remaining headroom for today, floored at zero.
    pub fn safe_to_spend(&self) -> i64 {
        (self.daily_limit - self.spent_today).max(0)
    }

    pub fn is_over_limit(&self) -> bool {
        self.spent_today > self.daily_limit
    }

    /// Fraction of the daily limit consumed. The limit is positive by
    /// construction, so this never divides by zero.
    pub fn usage_ratio(&self) -> f64 {
        self.spent_today as f64 / self.daily_limit as f64
    }

    pub fn daily_limit(&self) -> i64 {
        self.daily_limit
    }

    pub fn spent_today(&self) -> i64 {
        self.spent_today
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Session history, most recent first.
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }
}
