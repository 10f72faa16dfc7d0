//! Transaction aggregation
//!
//! Groups transactions by calendar month and by category name inside a
//! window. Month buckets come out in chronological order for charting;
//! category buckets keep the order in which each category was first seen
//! and are ranked later by [`crate::metrics`].
//!
//! The transaction list view wants the opposite ordering (newest first);
//! that is [`sort_newest_first`], kept separate from the bucket ordering.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Category, MonthBucket, MonthlyBalance, Totals, Transaction, TransactionType};
use crate::month::MonthKey;

/// Date range a computation is restricted to (bounds inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Every transaction
    All,
    /// One calendar year
    Year(i32),
    /// One calendar month
    Month(MonthKey),
    /// Arbitrary inclusive date range
    Range { from: NaiveDate, to: NaiveDate },
}

impl Window {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Year(year) => date.year() == *year,
            Self::Month(month) => month.contains(date),
            Self::Range { from, to } => *from <= date && date <= *to,
        }
    }

    /// Whether any day of `month` falls inside the window
    pub fn overlaps_month(&self, month: MonthKey) -> bool {
        match self {
            Self::All => true,
            Self::Year(year) => month.year() == *year,
            Self::Month(m) => *m == month,
            Self::Range { from, to } => month.first_day() <= *to && *from <= month.last_day(),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all time"),
            Self::Year(year) => write!(f, "{}", year),
            Self::Month(month) => write!(f, "{}", month),
            Self::Range { from, to } => write!(f, "{} to {}", from, to),
        }
    }
}

/// Which transaction types participate in a sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl TypeFilter {
    pub const INCOME: Self = Self::Only(TransactionType::Income);
    pub const EXPENSE: Self = Self::Only(TransactionType::Expense);

    pub fn matches(&self, tx_type: TransactionType) -> bool {
        match self {
            Self::All => true,
            Self::Only(t) => *t == tx_type,
        }
    }
}

/// Category id → name resolution with a fallback label
pub struct CategoryLookup<'a> {
    by_id: HashMap<&'a str, &'a Category>,
    fallback: &'a str,
}

impl<'a> CategoryLookup<'a> {
    pub fn new(categories: &'a [Category], fallback: &'a str) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());
        for category in categories {
            // First definition of an id wins
            by_id.entry(category.id.as_str()).or_insert(category);
        }
        Self { by_id, fallback }
    }

    pub fn get(&self, id: &str) -> Option<&'a Category> {
        self.by_id.get(id).copied()
    }

    /// Resolved category name, or the fallback label
    pub fn name(&self, id: &str) -> &'a str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or(self.fallback)
    }
}

/// Month and category buckets for one window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    /// Ascending by month key
    pub by_month: Vec<MonthBucket>,
    /// First-seen order
    pub by_category: Vec<MonthBucket>,
}

impl Aggregation {
    pub fn month_total(&self) -> f64 {
        self.by_month.iter().map(|b| b.total).sum()
    }

    pub fn category_total(&self) -> f64 {
        self.by_category.iter().map(|b| b.total).sum()
    }
}

/// Group the transactions inside `window` that pass `filter`
pub fn aggregate(
    transactions: &[Transaction],
    categories: &CategoryLookup<'_>,
    window: &Window,
    filter: TypeFilter,
) -> Aggregation {
    let mut months: BTreeMap<MonthKey, f64> = BTreeMap::new();
    let mut category_order: Vec<MonthBucket> = Vec::new();
    let mut category_index: HashMap<&str, usize> = HashMap::new();

    for tx in transactions
        .iter()
        .filter(|tx| window.contains(tx.date) && filter.matches(tx.tx_type))
    {
        *months.entry(tx.month_key()).or_insert(0.0) += tx.amount;

        let name = categories.name(&tx.category_id);
        match category_index.get(name) {
            Some(&i) => category_order[i].total += tx.amount,
            None => {
                category_index.insert(name, category_order.len());
                category_order.push(MonthBucket::new(name, tx.amount));
            }
        }
    }

    debug!(
        "Aggregated {} window: {} months, {} categories",
        window,
        months.len(),
        category_order.len()
    );

    Aggregation {
        by_month: months
            .into_iter()
            .map(|(key, total)| MonthBucket::new(key.to_string(), total))
            .collect(),
        by_category: category_order,
    }
}

/// Income, expense and balance inside a window
pub fn totals(transactions: &[Transaction], window: &Window) -> Totals {
    let mut totals = Totals::default();
    for tx in transactions.iter().filter(|tx| window.contains(tx.date)) {
        match tx.tx_type {
            TransactionType::Income => totals.income += tx.amount,
            TransactionType::Expense => totals.expense += tx.amount,
        }
    }
    totals.balance = totals.income - totals.expense;
    totals
}

/// Per-month income/expense/balance for the given months, in the order given.
///
/// Months with no transactions report zeros.
pub fn monthly_balance(transactions: &[Transaction], months: &[MonthKey]) -> Vec<MonthlyBalance> {
    let mut sums: HashMap<MonthKey, (f64, f64)> = HashMap::new();
    for tx in transactions {
        let slot = sums.entry(tx.month_key()).or_insert((0.0, 0.0));
        match tx.tx_type {
            TransactionType::Income => slot.0 += tx.amount,
            TransactionType::Expense => slot.1 += tx.amount,
        }
    }

    months
        .iter()
        .map(|&month_key| {
            let (income, expense) = sums.get(&month_key).copied().unwrap_or((0.0, 0.0));
            MonthlyBalance {
                month_key,
                income,
                expense,
                balance: income - expense,
            }
        })
        .collect()
}

/// The `count` calendar months ending at `end`, oldest first.
///
/// Months before 0000-01 are left out.
pub fn trailing_months(end: MonthKey, count: u32) -> Vec<MonthKey> {
    (0..count)
        .rev()
        .filter_map(|back| end.checked_add_months(-i32::try_from(back).ok()?))
        .collect()
}

/// Distinct transaction years, newest first
pub fn available_years(transactions: &[Transaction]) -> Vec<i32> {
    let years: BTreeSet<i32> = transactions.iter().map(|tx| tx.date.year()).collect();
    years.into_iter().rev().collect()
}

/// Copy of the transactions ordered by date, newest first.
///
/// Transactions on the same date keep their input order.
pub fn sort_newest_first(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Filters for the transaction list view
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Start date (inclusive)
    pub from: Option<NaiveDate>,
    /// End date (inclusive)
    pub to: Option<NaiveDate>,
    pub tx_type: Option<TransactionType>,
    pub category_id: Option<String>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.from.is_some_and(|from| tx.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| tx.date > to) {
            return false;
        }
        if self.tx_type.is_some_and(|t| t != tx.tx_type) {
            return false;
        }
        if let Some(ref category_id) = self.category_id {
            if &tx.category_id != category_id {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !needle.is_empty() && !tx.description.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Apply a filter and order the result newest first
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    let matching: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| filter.matches(tx))
        .cloned()
        .collect();
    sort_newest_first(&matching)
}
