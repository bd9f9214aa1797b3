use std::collections::BTreeMap;

use models::{CategoryAverage, MonthlyAggregate, Transaction};

use crate::filter::TransactionFilter;

#[derive(Debug, Default)]
struct MonthBucket {
    income: Vec<f64>,
    expense: Vec<f64>,
}

/// Sum in a fixed (sorted) order so any permutation of the input gives the same total.
fn stable_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}

/// One aggregate per (year, month) present in the filtered set, ascending.
///
/// `income` sums the non-negative amounts, `expense` is the absolute value of the
/// sum of the negative ones and `net` is `income - expense`.
pub fn monthly_rollup(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<MonthlyAggregate> {
    let mut buckets: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();
    for txn in filter.apply(transactions) {
        let bucket = buckets.entry(txn.month_key()).or_default();
        if txn.is_income() {
            bucket.income.push(txn.amount);
        } else {
            bucket.expense.push(txn.amount);
        }
    }

    buckets
        .into_iter()
        .map(|((year, month), bucket)| {
            let income = stable_sum(bucket.income);
            let expense = stable_sum(bucket.expense).abs();
            MonthlyAggregate {
                year,
                month,
                income,
                expense,
                net: income - expense,
                label: format!("{}-{:02}", year, month),
            }
        })
        .collect()
}

/// Mean signed amount per category, sorted by category name.
pub fn category_averages(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<CategoryAverage> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for txn in filter.apply(transactions) {
        groups.entry(txn.category.as_str()).or_default().push(txn.amount);
    }

    groups
        .into_iter()
        .map(|(category, amounts)| {
            let count = amounts.len() as f64;
            CategoryAverage {
                category: category.to_string(),
                average: stable_sum(amounts) / count,
            }
        })
        .collect()
}
