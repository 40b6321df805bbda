use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use finbear_core::engine::{EventOutcome, View};
use finbear_core::session::{demo_engine, demo_subscriptions};
use finbear_core::subscription::{assess, total_recurring};
use finbear_core::time::{Clock, SystemClock};
use finbear_core::{Category, CoachDecision, Mood, StdCoachRng};

#[derive(Parser, Debug)]
#[command(name = "finbear", version, about = "Fin the Bear's coaching engine, on the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted day against the demo session and print each decision
    Demo {
        /// RNG seed for the advice pools (default: 7)
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },

    /// Generate simulated bank SMS events and let Fin react
    Simulate {
        /// RNG seed; same seed, same run
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Number of SMS events to generate
        #[arg(long, default_value_t = 6)]
        events: usize,
    },

    /// Risk-assess the demo subscriptions against a date
    Assess {
        /// Date the subscriptions were seeded on (default: today)
        #[arg(long)]
        base: Option<NaiveDate>,

        /// Assessment date (default: the base date)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Emit the assessment as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Demo { seed } => run_demo(seed)?,
        Command::Simulate { seed, events } => run_simulate(seed, events)?,
        Command::Assess { base, today, json } => run_assess(base, today, json)?,
    }

    Ok(())
}

fn mood_tag(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "happy",
        Mood::Concerned => "concerned",
        Mood::Angry => "angry",
        Mood::Excited => "excited",
    }
}

fn print_decision(label: &str, decision: &CoachDecision) {
    println!("{label:<28} [{:>9}] {}", mood_tag(decision.mood), decision.message);
}

fn run_demo(seed: u64) -> Result<()> {
    let mut engine = demo_engine(SystemClock, StdCoachRng::seed_from_u64(seed))
        .context("building demo session")?;

    println!("# A day with Fin\n");
    println!(
        "Daily limit ₹{}, spent ₹{}, safe to spend ₹{}\n",
        engine.ledger().daily_limit(),
        engine.ledger().spent_today(),
        engine.ledger().safe_to_spend()
    );

    let d = engine.record_manual_spend(450, Category::Food)?;
    print_decision("spend ₹450 Food", &d);

    let d = engine.record_manual_spend(600, Category::Shopping)?;
    print_decision("spend ₹600 Shopping", &d);

    if let Some(d) = engine.switch_view(View::Subscriptions) {
        print_decision("open Subscriptions", &d);
    }
    engine.switch_view(View::Home);

    let outcome = engine.confirm_save_to_goal(500)?;
    print_decision("save ₹500 to goal", &outcome.decision);
    if outcome.reached_target {
        println!("{:<28} 🏆 Goal reached: {}", "", outcome.goal.name);
    }

    println!(
        "\nEnd of day: spent ₹{}, safe to spend ₹{}, goal {} at ₹{}/{}",
        engine.ledger().spent_today(),
        engine.ledger().safe_to_spend(),
        outcome.goal.name,
        outcome.goal.saved,
        outcome.goal.target
    );
    Ok(())
}

fn run_simulate(seed: u64, events: usize) -> Result<()> {
    let mut engine = demo_engine(SystemClock, StdCoachRng::seed_from_u64(seed))
        .context("building demo session")?;

    // Debits get categorized round-robin, the way a user might reply.
    let categories = [
        Category::Food,
        Category::Travel,
        Category::Entertainment,
        Category::Shopping,
    ];
    let mut next_category = 0usize;

    println!("# Simulating {events} SMS events (seed {seed})\n");
    for i in 1..=events {
        match engine.trigger_sms() {
            EventOutcome::Credit(prompt) => {
                println!("[{i}] {}", prompt.text);
                let outcome = engine.confirm_save_to_goal(prompt.suggested_save)?;
                print_decision("    save to goal", &outcome.decision);
                if outcome.reached_target {
                    println!("    🏆 Goal reached: {}", outcome.goal.name);
                }
            }
            EventOutcome::Debit(prompt) => {
                println!("[{i}] {}", prompt.text);
                let category = categories[next_category % categories.len()].clone();
                next_category += 1;
                let d = engine.reply_to_debit_prompt(category.clone())?;
                print_decision(&format!("    categorize as {category}"), &d);
            }
            EventOutcome::Decision(d) => print_decision("    decision", &d),
        }
    }

    println!(
        "\nSpent today ₹{} of ₹{} ({}%)",
        engine.ledger().spent_today(),
        engine.ledger().daily_limit(),
        (engine.ledger().usage_ratio() * 100.0).round() as i64
    );
    Ok(())
}

fn run_assess(base: Option<NaiveDate>, today: Option<NaiveDate>, json: bool) -> Result<()> {
    let base = base.unwrap_or_else(|| SystemClock.today(chrono_tz::Asia::Kolkata));
    let today = today.unwrap_or(base);

    let subs = demo_subscriptions(base);
    let assessment = assess(&subs, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    println!("# Subscriptions as of {today}\n");
    for sub in &subs {
        let days_left = sub.days_left(today);
        let status = if days_left < 0 {
            format!("Overdue {}d", days_left.abs())
        } else {
            format!("Due in {days_left} days")
        };
        println!(
            "{:<10} ₹{:<5} {:<16} cycle {:.0}%",
            sub.name,
            sub.amount,
            status,
            sub.cycle_position(today)
        );
    }
    println!("\nTotal recurring: ₹{}", total_recurring(&subs));

    match assessment.most_urgent {
        Some(sub) => println!("Most urgent: {} (₹{})", sub.name, sub.amount),
        None => println!("Nothing due this week."),
    }
    if !assessment.overdue.is_empty() {
        println!(
            "Overdue: {}",
            assessment
                .overdue
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}
