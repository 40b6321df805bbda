//! Spending analytics over the session history: category split, daily
//! average, and the coach's top-category insight.

use serde::{Deserialize, Serialize};

use crate::ledger::{Category, Transaction};

/// Days covered by the rolling average on the analytics view.
pub const AVERAGE_WINDOW_DAYS: i64 = 7;

/// One slice of the category split, as a share of total spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: Category,
    pub amount: i64,
    pub percent: f64,
}

/// Transfers into the savings goal are not spending.
fn is_spending(txn: &Transaction) -> bool {
    !matches!(&txn.category, Category::Custom(label) if label == "Savings")
}

/// Total spent across the history.
pub fn total_spent(transactions: &[Transaction]) -> i64 {
    transactions
        .iter()
        .filter(|t| is_spending(t))
        .map(|t| t.amount)
        .sum()
}

/// Average spend per day over the rolling window, rounded to the nearest
/// whole unit.
pub fn average_daily(transactions: &[Transaction]) -> i64 {
    (total_spent(transactions) as f64 / AVERAGE_WINDOW_DAYS as f64).round() as i64
}

/// Per-category totals and percentages, largest first.
pub fn category_split(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let mut totals: Vec<(Category, i64)> = Vec::new();
    for txn in transactions.iter().filter(|t| is_spending(t)) {
        match totals.iter_mut().find(|(c, _)| *c == txn.category) {
            Some((_, amount)) => *amount += txn.amount,
            None => totals.push((txn.category.clone(), txn.amount)),
        }
    }

    let total: i64 = totals.iter().map(|(_, a)| a).sum();
    let mut slices: Vec<CategorySlice> = totals
        .into_iter()
        .map(|(category, amount)| CategorySlice {
            category,
            amount,
            percent: if total > 0 {
                100.0 * amount as f64 / total as f64
            } else {
                0.0
            },
        })
        .collect();

    slices.sort_by(|a, b| b.amount.cmp(&a.amount));
    slices
}

/// The coach's nudge about the single biggest category, if any spending
/// exists at all.
pub fn top_category_insight(transactions: &[Transaction]) -> Option<String> {
    let split = category_split(transactions);
    let top = split.first()?;
    Some(format!(
        "Whoa! {} is eating up {}% of your budget. Try cutting that by 10% next week?",
        top.category,
        top.percent.round() as i64
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn txn(id: u64, amount: i64, category: Category) -> Transaction {
        Transaction {
            id,
            title: category.label().to_string(),
            amount,
            category,
            recorded_at: Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(1, 450, Category::Food),
            txn(2, 230, Category::Travel),
            txn(3, 300, Category::Entertainment),
            txn(4, 120, Category::Food),
        ]
    }

    #[test]
    fn split_orders_by_amount_and_sums_percentages() {
        let split = category_split(&sample());
        assert_eq!(split.len(), 3);
        assert_eq!(split[0].category, Category::Food);
        assert_eq!(split[0].amount, 570);
        assert_eq!(split[1].category, Category::Entertainment);
        assert_eq!(split[2].category, Category::Travel);

        let pct_sum: f64 = split.iter().map(|s| s.percent).sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn totals_and_average_match_the_window() {
        let txns = sample();
        assert_eq!(total_spent(&txns), 1100);
        assert_eq!(average_daily(&txns), 157); // 1100 / 7 rounded
    }

    #[test]
    fn savings_transfers_are_excluded() {
        let mut txns = sample();
        txns.push(txn(5, 500, Category::Custom("Savings".to_string())));
        assert_eq!(total_spent(&txns), 1100);
        assert!(
            category_split(&txns)
                .iter()
                .all(|s| s.category != Category::Custom("Savings".to_string()))
        );
    }

    #[test]
    fn insight_names_the_top_category() {
        let msg = top_category_insight(&sample()).unwrap();
        assert!(msg.starts_with("Whoa! Food is eating up 52%"));
        assert!(top_category_insight(&[]).is_none());
    }
}
