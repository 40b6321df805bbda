//! Simulated bank-SMS events: generation from the injected randomness
//! source, and parsing of the notification text back into an event.

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::coach::CoachRng;

/// Account label baked into every simulated notification.
pub const ACCOUNT_LABEL: &str = "XX1234";

/// Simulated credit amounts fall in `1200..6200`, debits in `50..550`.
pub const CREDIT_AMOUNT_RANGE: (i64, i64) = (1200, 6200);
pub const DEBIT_AMOUNT_RANGE: (i64, i64) = (50, 550);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmsKind {
    Credit,
    Debit,
}

/// A generated bank notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedSms {
    pub kind: SmsKind,
    pub amount: i64,
    pub text: String,
}

pub fn credit_text(amount: i64) -> String {
    format!("Credited INR {amount} to A/C {ACCOUNT_LABEL}")
}

pub fn debit_text(amount: i64) -> String {
    format!("Debited INR {amount} from A/C {ACCOUNT_LABEL}")
}

/// Flip a coin for credit vs debit and draw an amount from the matching
/// range, producing the notification text the app displays.
pub fn generate_sms(rng: &mut dyn CoachRng) -> SimulatedSms {
    if rng.coin() {
        let amount = rng.amount_in(CREDIT_AMOUNT_RANGE.0, CREDIT_AMOUNT_RANGE.1);
        SimulatedSms {
            kind: SmsKind::Credit,
            amount,
            text: credit_text(amount),
        }
    } else {
        let amount = rng.amount_in(DEBIT_AMOUNT_RANGE.0, DEBIT_AMOUNT_RANGE.1);
        SimulatedSms {
            kind: SmsKind::Debit,
            amount,
            text: debit_text(amount),
        }
    }
}

/// Recover kind and amount from a notification text.
pub fn parse_sms(text: &str) -> Result<SimulatedSms> {
    let re = Regex::new(r"^\s*(?P<kind>Credited|Debited)\s+INR\s+(?P<amount>\d+)\b")?;

    let caps = match re.captures(text) {
        Some(caps) => caps,
        None => bail!("unrecognized SMS text: {text:?}"),
    };

    let amount: i64 = caps["amount"]
        .parse()
        .with_context(|| format!("amount in {text:?}"))?;
    if amount <= 0 {
        bail!("non-positive amount in {text:?}");
    }

    let kind = match &caps["kind"] {
        "Credited" => SmsKind::Credit,
        _ => SmsKind::Debit,
    };

    Ok(SimulatedSms {
        kind,
        amount,
        text: text.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::StdCoachRng;

    /// Scripted source: fixed coin results, midpoint amounts.
    struct Scripted {
        coins: Vec<bool>,
    }

    impl CoachRng for Scripted {
        fn pick(&mut self, _len: usize) -> usize {
            0
        }
        fn coin(&mut self) -> bool {
            self.coins.remove(0)
        }
        fn amount_in(&mut self, low: i64, high: i64) -> i64 {
            (low + high) / 2
        }
    }

    #[test]
    fn credit_and_debit_texts_match_the_notification_format() {
        let mut rng = Scripted { coins: vec![true, false] };

        let credit = generate_sms(&mut rng);
        assert_eq!(credit.kind, SmsKind::Credit);
        assert_eq!(credit.text, format!("Credited INR {} to A/C XX1234", credit.amount));
        assert!(credit.amount >= 1200 && credit.amount < 6200);

        let debit = generate_sms(&mut rng);
        assert_eq!(debit.kind, SmsKind::Debit);
        assert_eq!(debit.text, format!("Debited INR {} from A/C XX1234", debit.amount));
        assert!(debit.amount >= 50 && debit.amount < 550);
    }

    #[test]
    fn parse_round_trips_generated_text() {
        let mut rng = StdCoachRng::seed_from_u64(42);
        for _ in 0..10 {
            let sms = generate_sms(&mut rng);
            let parsed = parse_sms(&sms.text).unwrap();
            assert_eq!(parsed.kind, sms.kind);
            assert_eq!(parsed.amount, sms.amount);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_sms("OTP is 4821, do not share").is_err());
        assert!(parse_sms("Debited USD 50 from A/C XX1234").is_err());
    }
}
