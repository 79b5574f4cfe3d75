//! Aggregations over a period's transactions.
//!
//! Both aggregations take transactions in the order returned by the store
//! (most recent first) and never fail: an empty input yields the `Empty`
//! variant instead of a zeroed summary.

use std::collections::HashMap;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::{Transaction, TransactionKind};

/// Number of expense categories listed in [`CategoryStatistics`].
pub const TOP_CATEGORIES: usize = 5;

/// Default number of lines shown in a [`PeriodReport`].
pub const DEFAULT_REPORT_LIMIT: usize = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Totals {
    pub expense: f64,
    pub income: f64,
    /// Always `income - expense`.
    pub balance: f64,
}

impl Totals {
    pub fn of(transactions: &[Transaction]) -> Self {
        let (expense, income) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(expense, income), tx| match tx.kind {
                    TransactionKind::Expense => (expense + tx.amount, income),
                    TransactionKind::Income => (expense, income + tx.amount),
                });
        Self {
            expense,
            income,
            balance: income - expense,
        }
    }
}

/// Chronological listing of a period.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeriodReport {
    Empty,
    Entries {
        /// The first `cap` transactions, in input order.
        shown: Vec<Transaction>,
        /// How many transactions did not fit.
        hidden: usize,
        /// Totals over the whole period, hidden entries included.
        totals: Totals,
    },
}

impl PeriodReport {
    pub fn build(transactions: &[Transaction], cap: usize) -> Self {
        if transactions.is_empty() {
            return Self::Empty;
        }
        let shown = transactions.iter().take(cap).cloned().collect::<Vec<_>>();
        Self::Entries {
            hidden: transactions.len() - shown.len(),
            shown,
            totals: Totals::of(transactions),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Share of the period's total expense, in percent.
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryStatistics {
    Empty,
    Summary {
        count: usize,
        totals: Totals,
        /// Largest expense categories, descending, at most [`TOP_CATEGORIES`].
        top_expenses: Vec<CategoryShare>,
    },
}

impl CategoryStatistics {
    pub fn build(transactions: &[Transaction]) -> Self {
        if transactions.is_empty() {
            return Self::Empty;
        }

        let totals = Totals::of(transactions);

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut subtotals: Vec<(String, f64)> = Vec::new();
        for tx in transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Expense)
        {
            let key = category_key(&tx.category);
            match index.get(&key) {
                Some(&slot) => subtotals[slot].1 += tx.amount,
                None => {
                    index.insert(key, subtotals.len());
                    subtotals.push((tx.category.trim().to_string(), tx.amount));
                }
            }
        }

        subtotals.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let top_expenses = subtotals
            .into_iter()
            .take(TOP_CATEGORIES)
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                percentage: percentage_of(amount, totals.expense),
            })
            .collect();

        Self::Summary {
            count: transactions.len(),
            totals,
            top_expenses,
        }
    }
}

fn category_key(category: &str) -> String {
    category.trim().nfc().collect()
}

fn percentage_of(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        amount / total * 100.0
    } else {
        0.0
    }
}
