//! Synthetic transaction history: a plausible two-year, monthly-bucketed
//! ledger with category constraints and a best-effort non-negative balance.

use chrono::{Datelike, Duration, Local, NaiveDate};
use rand::Rng;
use tracing::debug;

use crate::table::{CanonicalTable, TransactionRow};

/// How often a category fires within one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Exactly this many occurrences, every month.
    Fixed(u32),
    /// Occurrence count sampled uniformly from this inclusive range each month.
    Range(u32, u32),
}

/// A named transaction class with amount bounds and a frequency rule.
///
/// Bounds are an unordered pair: expense categories are written
/// negative-first, so `min` may sit numerically above `max`. Sampling always
/// spans the full interval between the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub frequency: Frequency,
    /// Income categories bypass the non-negative balance check.
    pub income: bool,
}

impl CategorySpec {
    /// Bounds in ascending order.
    pub fn bounds(&self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}

const CATALOG: &[CategorySpec] = &[
    CategorySpec { name: "Card Payment", min: -500.0, max: -10.0, frequency: Frequency::Range(5, 10), income: false },
    CategorySpec { name: "Mortgage", min: -1500.0, max: -3000.0, frequency: Frequency::Fixed(1), income: false },
    CategorySpec { name: "Paycheck", min: 2000.0, max: 4000.0, frequency: Frequency::Range(2, 4), income: true },
    CategorySpec { name: "Shopping", min: -200.0, max: -20.0, frequency: Frequency::Range(3, 7), income: false },
    CategorySpec { name: "Streaming", min: -15.0, max: -5.0, frequency: Frequency::Range(1, 3), income: false },
    CategorySpec { name: "Gift", min: -500.0, max: 500.0, frequency: Frequency::Range(1, 3), income: false },
    CategorySpec { name: "Utility Bill", min: -200.0, max: -50.0, frequency: Frequency::Range(1, 3), income: false },
    CategorySpec { name: "Commission", min: 500.0, max: 2000.0, frequency: Frequency::Range(1, 2), income: true },
    CategorySpec { name: "Travel", min: -1000.0, max: -200.0, frequency: Frequency::Range(0, 2), income: false },
    CategorySpec { name: "Repair", min: -500.0, max: -50.0, frequency: Frequency::Range(0, 3), income: false },
];

/// The fixed category catalog.
pub fn catalog() -> &'static [CategorySpec] {
    CATALOG
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Month-end dates falling within `[start, end]`, ascending.
fn month_ends(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut year = start.year();
    let mut month = start.month();
    loop {
        let Some(last) = last_day_of_month(year, month) else { break };
        if last > end {
            break;
        }
        if last >= start {
            out.push(last);
        }
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }
    out
}

fn sample_amount<R: Rng + ?Sized>(spec: &CategorySpec, rng: &mut R) -> f64 {
    let (lo, hi) = spec.bounds();
    let amount: f64 = rng.random_range(lo..=hi);
    (amount * 100.0).round() / 100.0
}

/// Generates a trailing two-year transaction history from the category
/// catalog, independently of the derivation pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticGenerator {
    pub start_balance: f64,
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self { start_balance: 10_000.0 }
    }

    /// Generate with a fresh thread rng over the trailing two years.
    pub fn generate(&self) -> CanonicalTable {
        self.generate_with(&mut rand::rng())
    }

    /// Deterministic variant for callers holding their own rng.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> CanonicalTable {
        let end = Local::now().date_naive();
        let start = end - Duration::days(365 * 2);
        self.generate_window(rng, start, end)
    }

    fn generate_window<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CanonicalTable {
        let mut rows: Vec<TransactionRow> = Vec::new();
        let mut running = self.start_balance;

        for month_end in month_ends(start, end) {
            for spec in CATALOG {
                match spec.frequency {
                    Frequency::Fixed(count) => {
                        // Recurring bills post unconditionally and stay out
                        // of the balance bookkeeping.
                        for _ in 0..count {
                            rows.push(TransactionRow {
                                date: month_end,
                                amount: sample_amount(spec, rng),
                                description: spec.name.to_string(),
                                balance: None,
                            });
                        }
                    }
                    Frequency::Range(lo, hi) => {
                        let count = rng.random_range(lo..=hi);
                        for _ in 0..count {
                            let amount = sample_amount(spec, rng);
                            // Soft constraint: drop, don't retry.
                            if !spec.income && running + amount < 0.0 {
                                debug!(category = spec.name, amount, "skipping overdrawing occurrence");
                                continue;
                            }
                            rows.push(TransactionRow {
                                date: month_end,
                                amount,
                                description: spec.name.to_string(),
                                balance: None,
                            });
                            running += amount;
                        }
                    }
                }
            }
        }

        // Newest first; the running balance then accumulates over that same
        // descending order, so the balance trend reads backwards relative to
        // real chronology. Matches the upstream behavior on purpose.
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        let mut cumulative = self.start_balance;
        for row in &mut rows {
            cumulative += row.amount;
            row.balance = Some(cumulative);
        }
        rows
    }
}
