use models::{CreditStatus, MonthlyAggregate, ScoreResult, Transaction};

use crate::aggregation::monthly_rollup;
use crate::filter::TransactionFilter;

pub const PREMIUM_BALANCE: f64 = 1_000_000.0;
pub const PREMIUM_MAX_DEBT_RATIO: f64 = 0.30;
pub const STANDARD_BALANCE: f64 = 500_000.0;
pub const STANDARD_MAX_DEBT_RATIO: f64 = 0.50;

pub const PREMIUM_SCORE: f64 = 9.0;
pub const STANDARD_SCORE: f64 = 7.0;
pub const BASE_SCORE: f64 = 5.5;

const PREMIUM_STATUS_MIN_SCORE: f64 = 8.0;
const WARNING_STATUS_MIN_SCORE: f64 = 6.5;

/// Score a client from its stated balance and full transaction history.
pub fn score_client(balance: f64, transactions: &[Transaction]) -> ScoreResult {
    let rollup = monthly_rollup(transactions, &TransactionFilter::default());
    score_from_monthly(balance, &rollup)
}

/// Score from already computed monthly aggregates.
///
/// Months without any transaction do not count; a client without history
/// counts as one month so the averages stay defined.
pub fn score_from_monthly(balance: f64, months: &[MonthlyAggregate]) -> ScoreResult {
    let month_count = months.len().max(1);
    let income_total: f64 = months.iter().map(|m| m.income).sum();
    let expense_total: f64 = months.iter().map(|m| m.expense).sum();

    let avg_monthly_income = (income_total / month_count as f64).max(0.0);
    let avg_monthly_expense = (expense_total / month_count as f64).max(0.0);
    let debt_ratio = debt_ratio(avg_monthly_income, avg_monthly_expense, balance);
    let credit_score = credit_score(balance, debt_ratio);
    let status = classify(credit_score, debt_ratio);

    ScoreResult {
        month_count,
        avg_monthly_income,
        avg_monthly_expense,
        debt_ratio,
        credit_score,
        status,
        status_label: status.label().to_string(),
    }
}

/// Share of the monthly capacity (income plus a twelfth of the balance) eaten by expenses.
pub fn debt_ratio(avg_income: f64, avg_expense: f64, balance: f64) -> f64 {
    let capacity = avg_income + balance / 12.0 + 1.0;
    let ratio = if capacity > 0.0 {
        avg_expense / capacity
    } else if avg_expense > 0.0 {
        1.0
    } else {
        0.0
    };
    ratio.clamp(0.0, 1.0)
}

pub fn credit_score(balance: f64, debt_ratio: f64) -> f64 {
    if balance > PREMIUM_BALANCE && debt_ratio <= PREMIUM_MAX_DEBT_RATIO {
        PREMIUM_SCORE
    } else if balance > STANDARD_BALANCE && debt_ratio <= STANDARD_MAX_DEBT_RATIO {
        STANDARD_SCORE
    } else {
        BASE_SCORE
    }
}

pub fn classify(credit_score: f64, debt_ratio: f64) -> CreditStatus {
    if credit_score >= PREMIUM_STATUS_MIN_SCORE && debt_ratio <= PREMIUM_MAX_DEBT_RATIO {
        CreditStatus::Premium
    } else if credit_score >= WARNING_STATUS_MIN_SCORE && debt_ratio <= STANDARD_MAX_DEBT_RATIO {
        CreditStatus::Warning
    } else {
        CreditStatus::Danger
    }
}
