//! finbear-core: the reactive coaching engine behind the finbear app.
//!
//! Financial events in (spends, simulated bank SMS, tab switches, goal
//! funding), structured decisions out (a mascot mood and an advice
//! message, plus the budget and goal arithmetic underneath). No rendering,
//! no persistence; the presentation layer is an external collaborator.

pub mod analytics;
pub mod coach;
pub mod engine;
pub mod error;
pub mod goal;
pub mod ledger;
pub mod session;
pub mod sms;
pub mod subscription;
pub mod time;

pub use coach::{CoachDecision, CoachRng, Mood, StdCoachRng};
pub use engine::{
    CoachingEngine, CreditPrompt, DebitPrompt, EngineConfig, EventOutcome, SaveOutcome, View,
};
pub use error::CoachError;
pub use goal::{FundsAdded, GoalTracker, SavingsGoal};
pub use ledger::{BudgetLedger, Category, Transaction};
pub use sms::{SimulatedSms, SmsKind, generate_sms, parse_sms};
pub use subscription::{DueStatus, RiskAssessment, Subscription, assess, total_recurring};
pub use time::{Clock, FixedClock, SystemClock, cycle_position_percent, days_until};
