//! The seeded demo session: the app's out-of-the-box state, used by the
//! CLI and by scenario tests.

use chrono::{Duration, NaiveDate};

use crate::coach::CoachRng;
use crate::engine::{CoachingEngine, EngineConfig};
use crate::error::Result;
use crate::goal::SavingsGoal;
use crate::ledger::Category;
use crate::subscription::Subscription;
use crate::time::Clock;

pub const DEMO_DAILY_LIMIT: i64 = 1200;
pub const DEMO_OPENING_SPENT: i64 = 680;

/// Netflix in 2 days, Spotify in 15, iCloud in 5.
pub fn demo_subscriptions(today: NaiveDate) -> Vec<Subscription> {
    vec![
        Subscription {
            id: 1,
            name: "Netflix".to_string(),
            amount: 649,
            due_date: today + Duration::days(2),
            color_tag: "bg-red-500".to_string(),
        },
        Subscription {
            id: 2,
            name: "Spotify".to_string(),
            amount: 119,
            due_date: today + Duration::days(15),
            color_tag: "bg-green-500".to_string(),
        },
        Subscription {
            id: 3,
            name: "iCloud".to_string(),
            amount: 75,
            due_date: today + Duration::days(5),
            color_tag: "bg-blue-500".to_string(),
        },
    ]
}

/// Build an engine preloaded with the demo state: a part-spent day, a
/// half-funded Headphones goal, the demo subscriptions, and a little
/// recent history (today's spends account for the opening counter).
pub fn demo_engine<C: Clock, R: CoachRng>(clock: C, rng: R) -> Result<CoachingEngine<C, R>> {
    let config = EngineConfig {
        daily_limit: DEMO_DAILY_LIMIT,
        opening_spent_today: DEMO_OPENING_SPENT,
        ..EngineConfig::default()
    };
    let now = clock.now_utc();
    let today = clock.today(config.timezone);

    let mut engine = CoachingEngine::new(config, clock, rng)?.with_goal(SavingsGoal {
        name: "Headphones".to_string(),
        target: 4000,
        saved: 1500,
    });
    engine.set_subscriptions(demo_subscriptions(today));

    // Oldest first: yesterday's spends, then today's 450 + 230 = 680.
    let ledger = engine.ledger_mut();
    ledger.seed_transaction("Swiggy", 120, Category::Food, now - Duration::hours(26))?;
    ledger.seed_transaction("PVR Cinemas", 300, Category::Entertainment, now - Duration::hours(22))?;
    ledger.seed_transaction("Uber", 230, Category::Travel, now - Duration::hours(5))?;
    ledger.seed_transaction("Zomato", 450, Category::Food, now - Duration::hours(1))?;

    Ok(engine)
}
