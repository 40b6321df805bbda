//! The coaching engine: consumes financial events, updates the ledger and
//! goal tracker, and emits (mood, message) decisions.
//!
//! Single-threaded and event-driven: one mutator at a time, no background
//! timers. The decision visibility window is plain data (a monotonic
//! decision id plus an expiry instant checked against the injected clock);
//! a newer decision replaces the pending expiry, last write wins.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::coach::{
    CoachDecision, CoachRng, EXPENSE_TRACKED_MESSAGE, HIGH_SPEND_THRESHOLD, Mood, NO_BILLS_MESSAGE,
    OPENING_MESSAGE, OUT_OF_MONEY_MESSAGE, OVER_BUDGET_MESSAGE, OVER_HALF_MESSAGE,
    PRICEY_RIDE_MESSAGE, SAVING_WELL_MESSAGE, funds_saved_message, high_spend_pool,
    low_spend_pool, urgent_subscription_message,
};
use crate::error::{CoachError, Result};
use crate::goal::{FundsAdded, GoalTracker, SavingsGoal};
use crate::ledger::{BudgetLedger, Category, Transaction};
use crate::sms::{SimulatedSms, SmsKind, credit_text, debit_text, generate_sms};
use crate::subscription::{RiskAssessment, Subscription, assess};
use crate::time::Clock;

/// Seconds a freshly emitted reactive decision stays on screen before the
/// passive reassessment may override it.
pub const DECISION_WINDOW_SECS: i64 = 5;

/// Trip cost above which the coach questions a travel spend.
pub const PRICEY_TRAVEL_THRESHOLD: i64 = 300;

/// Share of a simulated credit offered toward the active goal (1/10,
/// floored).
pub const CREDIT_SAVE_DIVISOR: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    #[serde(rename = "home")]
    Home,
    #[serde(rename = "subs")]
    Subscriptions,
    #[serde(rename = "analytics")]
    Analytics,
}

/// Offer raised by a simulated credit: route a slice of it into the goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditPrompt {
    pub amount: i64,
    pub suggested_save: i64,
    pub goal_name: String,
    pub text: String,
}

/// A simulated debit awaiting its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebitPrompt {
    pub amount: i64,
    pub text: String,
}

/// What a simulated event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// The event resolved to a spend and a coach decision.
    Decision(CoachDecision),
    /// A credit arrived; the caller may confirm the suggested save.
    Credit(CreditPrompt),
    /// A debit arrived; the caller must reply with a category.
    Debit(DebitPrompt),
}

/// Decision plus the one-shot trophy flag for goal funding.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub decision: CoachDecision,
    pub goal: SavingsGoal,
    /// True only on the funding call that first reached the target.
    pub reached_target: bool,
}

/// Engine configuration. The timezone anchors "today" for the daily
/// budget counter.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub daily_limit: i64,
    pub opening_spent_today: i64,
    pub timezone: Tz,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            daily_limit: 1200,
            opening_spent_today: 0,
            timezone: chrono_tz::Asia::Kolkata,
        }
    }
}

/// The decision core. Owns all mutable session state; collaborators
/// (clock, randomness) are injected so runs are reproducible.
#[derive(Debug, Clone)]
pub struct CoachingEngine<C: Clock, R: CoachRng> {
    clock: C,
    rng: R,
    timezone: Tz,
    ledger: BudgetLedger,
    goals: GoalTracker,
    subscriptions: Vec<Subscription>,
    view: View,
    decision: CoachDecision,
    window_expires_at: Option<DateTime<Utc>>,
    pending_debit: Option<DebitPrompt>,
    next_decision_id: u64,
}

impl<C: Clock, R: CoachRng> CoachingEngine<C, R> {
    pub fn new(config: EngineConfig, clock: C, rng: R) -> Result<Self> {
        let today = clock.today(config.timezone);
        let ledger = BudgetLedger::new(config.daily_limit, today)?
            .with_opening_spend(config.opening_spent_today)?;
        Ok(Self {
            clock,
            rng,
            timezone: config.timezone,
            ledger,
            goals: GoalTracker::new(),
            subscriptions: Vec::new(),
            view: View::Home,
            decision: CoachDecision {
                id: 0,
                mood: Mood::Happy,
                message: OPENING_MESSAGE.to_string(),
            },
            window_expires_at: None,
            pending_debit: None,
            next_decision_id: 1,
        })
    }

    /// Seed an existing goal (demo sessions, restored state).
    pub fn with_goal(mut self, goal: SavingsGoal) -> Self {
        self.goals = GoalTracker::with_goal(goal);
        self
    }

    /// Replace the read-only subscription list.
    pub fn set_subscriptions(&mut self, subscriptions: Vec<Subscription>) {
        self.subscriptions = subscriptions;
    }

    // --- events ---------------------------------------------------------

    /// A spend entered by hand. Records the transaction, then classifies.
    pub fn record_manual_spend(&mut self, amount: i64, category: Category) -> Result<CoachDecision> {
        self.process_spend(amount, category)
    }

    /// A simulated SMS event with a known kind and amount. A credit never
    /// takes the spend path; it yields a save prompt instead. A debit
    /// without a category becomes a pending prompt for
    /// [`reply_to_debit_prompt`](Self::reply_to_debit_prompt).
    pub fn record_simulated_event(
        &mut self,
        kind: SmsKind,
        amount: i64,
        category: Option<Category>,
    ) -> Result<EventOutcome> {
        if amount <= 0 {
            return Err(CoachError::InvalidAmount(amount));
        }
        match kind {
            SmsKind::Credit => Ok(EventOutcome::Credit(self.credit_prompt(amount, None))),
            SmsKind::Debit => match category {
                Some(category) => Ok(EventOutcome::Decision(self.process_spend(amount, category)?)),
                None => {
                    let prompt = DebitPrompt {
                        amount,
                        text: debit_text(amount),
                    };
                    self.pending_debit = Some(prompt.clone());
                    Ok(EventOutcome::Debit(prompt))
                }
            },
        }
    }

    /// Draw a random simulated SMS (fair coin, range per kind) and feed it
    /// through [`record_simulated_event`](Self::record_simulated_event).
    pub fn trigger_sms(&mut self) -> EventOutcome {
        let sms = generate_sms(&mut self.rng);
        match sms.kind {
            SmsKind::Credit => EventOutcome::Credit(self.credit_prompt(sms.amount, Some(&sms))),
            SmsKind::Debit => {
                let prompt = DebitPrompt {
                    amount: sms.amount,
                    text: sms.text,
                };
                self.pending_debit = Some(prompt.clone());
                EventOutcome::Debit(prompt)
            }
        }
    }

    /// Resolve the pending simulated debit with its category.
    pub fn reply_to_debit_prompt(&mut self, category: Category) -> Result<CoachDecision> {
        let prompt = self.pending_debit.take().ok_or(CoachError::NoPendingDebit)?;
        self.process_spend(prompt.amount, category)
    }

    /// Drop the pending debit without recording anything. Idempotent.
    pub fn dismiss_debit_prompt(&mut self) {
        self.pending_debit = None;
    }

    pub fn pending_debit(&self) -> Option<&DebitPrompt> {
        self.pending_debit.as_ref()
    }

    /// Route funds into the goal and celebrate.
    pub fn confirm_save_to_goal(&mut self, amount: i64) -> Result<SaveOutcome> {
        let added = self.goals.add_funds(amount)?;
        let decision = self.emit(Mood::Excited, funds_saved_message(amount));
        Ok(SaveOutcome {
            decision,
            goal: added.goal,
            reached_target: added.reached_target,
        })
    }

    /// Navigate. Only the subscriptions view triggers a reactive decision.
    pub fn switch_view(&mut self, view: View) -> Option<CoachDecision> {
        self.view = view;
        if view != View::Subscriptions {
            return None;
        }

        let assessment = self.assess_subscriptions();
        let decision = match assessment.most_urgent {
            Some(sub) => self.emit(Mood::Concerned, urgent_subscription_message(&sub.name)),
            None => self.emit(Mood::Happy, NO_BILLS_MESSAGE.to_string()),
        };
        Some(decision)
    }

    /// Re-evaluate the budget-usage rule. Fires only on the home view and
    /// only once the current decision's visibility window has expired, so
    /// it never clobbers a just-emitted reactive decision. Idempotent.
    pub fn passive_decision(&mut self) -> Option<CoachDecision> {
        if self.view != View::Home || self.window_active() {
            return None;
        }
        let ratio = self.ledger.usage_ratio();
        let (mood, message) = if ratio < 0.5 {
            (Mood::Happy, SAVING_WELL_MESSAGE)
        } else if ratio < 1.0 {
            (Mood::Concerned, OVER_HALF_MESSAGE)
        } else {
            (Mood::Angry, OUT_OF_MONEY_MESSAGE)
        };
        Some(self.emit_passive(mood, message.to_string()))
    }

    // --- goal pass-throughs ---------------------------------------------

    pub fn create_goal(&mut self, name: &str, target: i64) -> Result<SavingsGoal> {
        Ok(self.goals.create_goal(name, target)?.clone())
    }

    pub fn reset_goal(&mut self) {
        self.goals.reset();
    }

    /// Direct goal funding from the goal widget; no coach reaction.
    pub fn add_goal_funds(&mut self, amount: i64) -> Result<FundsAdded> {
        self.goals.add_funds(amount)
    }

    // --- snapshots ------------------------------------------------------

    pub fn ledger(&self) -> &BudgetLedger {
        &self.ledger
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut BudgetLedger {
        &mut self.ledger
    }

    pub fn goal(&self) -> Option<&SavingsGoal> {
        self.goals.active()
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn assess_subscriptions(&self) -> RiskAssessment {
        assess(&self.subscriptions, self.clock.today(self.timezone))
    }

    pub fn history(&self) -> &[Transaction] {
        self.ledger.history()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// The latest decision. Only the newest one matters.
    pub fn current_decision(&self) -> &CoachDecision {
        &self.decision
    }

    /// Whether the latest reactive decision is still inside its 5-second
    /// visibility window.
    pub fn window_active(&self) -> bool {
        self.window_expires_at
            .is_some_and(|expiry| self.clock.now_utc() < expiry)
    }

    // --- internals ------------------------------------------------------

    fn process_spend(&mut self, amount: i64, category: Category) -> Result<CoachDecision> {
        let now = self.clock.now_utc();
        let today = self.clock.today(self.timezone);
        self.ledger.record_spend(amount, category.clone(), today, now)?;

        // First match wins: regret categories, then pricey travel, then
        // the over-limit check, then the generic acknowledgement.
        let decision = if category.is_discretionary() {
            let pool = if amount > HIGH_SPEND_THRESHOLD {
                high_spend_pool(amount)
            } else {
                low_spend_pool(amount)
            };
            let pick = self.rng.pick(pool.len());
            self.emit(Mood::Angry, pool[pick].clone())
        } else if category == Category::Travel && amount > PRICEY_TRAVEL_THRESHOLD {
            self.emit(Mood::Concerned, PRICEY_RIDE_MESSAGE.to_string())
        } else if self.ledger.is_over_limit() {
            self.emit(Mood::Angry, OVER_BUDGET_MESSAGE.to_string())
        } else {
            self.emit(Mood::Happy, EXPENSE_TRACKED_MESSAGE.to_string())
        };
        Ok(decision)
    }

    fn credit_prompt(&self, amount: i64, sms: Option<&SimulatedSms>) -> CreditPrompt {
        CreditPrompt {
            amount,
            suggested_save: amount / CREDIT_SAVE_DIVISOR,
            goal_name: self
                .goals
                .active()
                .map(|g| g.name.clone())
                .unwrap_or_else(|| "future".to_string()),
            text: sms
                .map(|s| s.text.clone())
                .unwrap_or_else(|| credit_text(amount)),
        }
    }

    /// Emit a reactive decision and (re)start its visibility window.
    fn emit(&mut self, mood: Mood, message: String) -> CoachDecision {
        let decision = self.next_decision(mood, message);
        self.window_expires_at =
            Some(self.clock.now_utc() + Duration::seconds(DECISION_WINDOW_SECS));
        decision
    }

    /// Emit without opening a window; passive decisions never animate.
    fn emit_passive(&mut self, mood: Mood, message: String) -> CoachDecision {
        self.next_decision(mood, message)
    }

    fn next_decision(&mut self, mood: Mood, message: String) -> CoachDecision {
        let decision = CoachDecision {
            id: self.next_decision_id,
            mood,
            message,
        };
        self.next_decision_id += 1;
        self.decision = decision.clone();
        decision
    }
}
