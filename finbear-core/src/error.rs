//! Validation errors for the coaching core.
//!
//! Every error here is local and recoverable: the offending operation is
//! rejected and prior state is left untouched. The presentation layer is
//! responsible for surfacing these to a human; the core never logs them.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoachError {
    /// A spend or funding amount that is zero or negative.
    #[error("invalid amount: {0} (must be a positive whole amount)")]
    InvalidAmount(i64),

    /// Goal creation with an empty name or non-positive target.
    #[error("invalid goal: {0}")]
    InvalidGoal(String),

    /// Funding attempted while no goal is active.
    #[error("no active savings goal")]
    NoActiveGoal,

    /// A daily limit that is zero or negative.
    #[error("invalid configuration: daily limit {0} must be positive")]
    InvalidConfiguration(i64),

    /// Replying to a debit prompt when none is pending.
    #[error("no pending debit to categorize")]
    NoPendingDebit,
}

pub type Result<T> = std::result::Result<T, CoachError>;
