//! Savings goal tracking: a single optional goal, funded incrementally.

use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

/// The active savings goal. `saved` only ever grows and may exceed the
/// target; completion percentage clamps for display, the raw value does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub name: String,
    pub target: i64,
    pub saved: i64,
}

impl SavingsGoal {
    /// Completion as a fraction, clamped to 1.0.
    pub fn completion_ratio(&self) -> f64 {
        (self.saved as f64 / self.target as f64).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.saved >= self.target
    }
}

/// Result of a funding operation, including the one-shot crossing flag
/// that drives the trophy display.
#[derive(Debug, Clone, PartialEq)]
pub struct FundsAdded {
    pub goal: SavingsGoal,
    /// True only on the call where `saved` first reached the target.
    pub reached_target: bool,
}

/// Owns the 0-or-1 active goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalTracker {
    goal: Option<SavingsGoal>,
}

impl GoalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing goal, e.g. the demo session's half-funded one.
    pub fn with_goal(goal: SavingsGoal) -> Self {
        Self { goal: Some(goal) }
    }

    /// Create a goal, replacing any existing one with `saved = 0`.
    pub fn create_goal(&mut self, name: &str, target: i64) -> Result<&SavingsGoal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoachError::InvalidGoal("name is empty".to_string()));
        }
        if target <= 0 {
            return Err(CoachError::InvalidGoal(format!(
                "target {target} must be positive"
            )));
        }
        Ok(self.goal.insert(SavingsGoal {
            name: name.to_string(),
            target,
            saved: 0,
        }))
    }

    /// Add funds to the active goal.
    pub fn add_funds(&mut self, amount: i64) -> Result<FundsAdded> {
        if amount <= 0 {
            return Err(CoachError::InvalidAmount(amount));
        }
        let goal = self.goal.as_mut().ok_or(CoachError::NoActiveGoal)?;
        let was_complete = goal.is_complete();
        goal.saved += amount;
        Ok(FundsAdded {
            reached_target: !was_complete && goal.is_complete(),
            goal: goal.clone(),
        })
    }

    pub fn active(&self) -> Option<&SavingsGoal> {
        self.goal.as_ref()
    }

    /// Discard the active goal. Idempotent.
    pub fn reset(&mut self) {
        self.goal = None;
    }
}
