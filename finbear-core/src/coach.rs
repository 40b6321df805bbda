//! Coach vocabulary: moods, decisions, and the advice message pools.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// The mascot's reaction to an event. Drives message selection and the
/// presentation layer's avatar choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "happy")]
    Happy,
    #[serde(rename = "concerned")]
    Concerned,
    #[serde(rename = "angry")]
    Angry,
    #[serde(rename = "excited")]
    Excited,
}

/// A (mood, message) pair emitted by the engine. Transient: only the
/// latest decision matters. `id` increases monotonically per engine and
/// keys the 5-second visibility window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachDecision {
    pub id: u64,
    pub mood: Mood,
    pub message: String,
}

/// Spend threshold above which the regret advice switches to the
/// high-spend pool.
pub const HIGH_SPEND_THRESHOLD: i64 = 500;

/// Advice for a large discretionary spend: two templates, picked 1-of-2.
pub fn high_spend_pool(amount: i64) -> [String; 2] {
    let gold_grams = amount as f64 / 6000.0;
    let sip_value = (amount as f64 * 1.6).floor() as i64;
    [
        format!("Ouch! ₹{amount}? You could have bought {gold_grams:.2}g of Gold instead!"),
        format!("Put this ₹{amount} in a SIP, and it could've been ₹{sip_value} in 5 years."),
    ]
}

/// Advice for a small discretionary spend.
pub fn low_spend_pool(amount: i64) -> [String; 2] {
    let shares = amount / 50;
    let data_days = amount / 10;
    [
        format!("Bro, that's {shares} shares of a penny stock gone. Was it worth it?"),
        format!("That's {data_days} days of mobile data you just burned."),
    ]
}

pub const PRICEY_RIDE_MESSAGE: &str = "That's a pricey ride. Could we have taken the bus?";
pub const OVER_BUDGET_MESSAGE: &str = "That's it! We are officially BROKE for today.";
pub const EXPENSE_TRACKED_MESSAGE: &str = "Expense tracked.";
pub const NO_BILLS_MESSAGE: &str = "No bills due this week! Your wallet is safe... for now.";
pub const SAVING_WELL_MESSAGE: &str = "Smooth sailing! You're saving well.";
pub const OVER_HALF_MESSAGE: &str = "Careful! We've used over half the budget.";
pub const OUT_OF_MONEY_MESSAGE: &str = "STOP! We are out of money for today!";
pub const OPENING_MESSAGE: &str = "Good job staying under budget today!";

pub fn urgent_subscription_message(name: &str) -> String {
    format!("Warning! {name} is due in a few days. Do you really need it this month?")
}

pub fn funds_saved_message(amount: i64) -> String {
    format!("WOOHOO! ₹{amount} saved! I'm so proud of us!")
}

/// Randomness seam for the engine: the 1-of-2 advice pick, the simulated
/// SMS coin flip, and the simulated amount ranges. Injectable so every
/// decision is reproducible in tests.
pub trait CoachRng {
    /// Uniform index in `0..len`.
    fn pick(&mut self, len: usize) -> usize;

    /// Fair coin for the simulated credit/debit split.
    fn coin(&mut self) -> bool;

    /// Uniform amount in `low..high`.
    fn amount_in(&mut self, low: i64, high: i64) -> i64;
}

/// `rand`-backed source. Seedable for reproducible simulations.
#[derive(Debug, Clone)]
pub struct StdCoachRng(StdRng);

impl StdCoachRng {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seed_from_u64(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl CoachRng for StdCoachRng {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    fn coin(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }

    fn amount_in(&mut self, low: i64, high: i64) -> i64 {
        self.0.gen_range(low..high)
    }
}
