//! Derived indicators over aggregation output
//!
//! Everything here is recomputed from the inputs on every call.

use std::cmp::Ordering;

use crate::aggregate::{CategoryLookup, Window};
use crate::config::is_essential_name;
use crate::models::{ExpenseSplit, MonthBucket, SavingEntry, Transaction};

/// Default length of the top expense categories list
pub const DEFAULT_TOP_CATEGORIES: usize = 10;

/// Category buckets ranked by total, largest first, truncated to `n`.
///
/// The sort is stable: equal totals keep their input order, so ties go to
/// the category that was seen first. No alphabetical tie-break.
pub fn top_expense_categories(by_category: &[MonthBucket], n: usize) -> Vec<MonthBucket> {
    let mut ranked = by_category.to_vec();
    ranked.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    ranked.truncate(n);
    ranked
}

/// Split expense spending inside `window` into essential and discretionary.
///
/// A transaction is essential when its category resolves and the category
/// name is in `essential` (exact, case-sensitive). Unresolved categories
/// are always discretionary.
pub fn essential_vs_discretionary(
    transactions: &[Transaction],
    categories: &CategoryLookup<'_>,
    window: &Window,
    essential: &[String],
) -> ExpenseSplit {
    let mut total = 0.0;
    let mut essential_total = 0.0;

    for tx in transactions
        .iter()
        .filter(|tx| tx.is_expense() && window.contains(tx.date))
    {
        total += tx.amount;
        let is_essential = categories
            .get(&tx.category_id)
            .is_some_and(|c| is_essential_name(essential, &c.name));
        if is_essential {
            essential_total += tx.amount;
        }
    }

    ExpenseSplit {
        essential: essential_total,
        discretionary: total - essential_total,
    }
}

/// Deposits recorded for months that fall inside `window`
pub fn total_saved(entries: &[SavingEntry], window: &Window) -> f64 {
    entries
        .iter()
        .filter(|e| window.overlaps_month(e.month_key))
        .map(|e| e.deposited_amount)
        .sum()
}

/// Saved amount as a percentage of income; 0 when there is no income
pub fn savings_rate(total_saved: f64, total_income: f64) -> f64 {
    if total_income == 0.0 {
        0.0
    } else {
        total_saved / total_income * 100.0
    }
}

/// The month bucket with the largest total; the earliest one wins ties
pub fn peak_month(by_month: &[MonthBucket]) -> Option<&MonthBucket> {
    let mut peak: Option<&MonthBucket> = None;
    for bucket in by_month {
        match peak {
            Some(current) if bucket.total <= current.total => {}
            _ => peak = Some(bucket),
        }
    }
    peak
}
