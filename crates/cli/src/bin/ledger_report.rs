use anyhow::{Result, anyhow};
use clap::Parser;
use ledger_engine::{TransactionFilter, category_averages, monthly_rollup, score_client};
use models::{CategoryAverage, Client, LedgerDatabase, MonthlyAggregate, ScoreResult};
use serde_json::json;
use std::path::PathBuf;
use utils::read_database;

#[derive(Parser, Debug)]
#[command(name = "ledger-report", about = "Print monthly totals, category averages and the credit score of a client.")]
struct Args {
    #[arg(long)]
    client_id: i64,

    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,

    /// Database file or directory
    #[arg(short, long, default_value = "database/database.json")]
    database: PathBuf,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

struct ClientReport<'a> {
    client: &'a Client,
    monthly: Vec<MonthlyAggregate>,
    categories: Vec<CategoryAverage>,
    score: ScoreResult,
}

/// The date range narrows the rollups only; the score always covers the full history.
fn build_report<'a>(db: &'a LedgerDatabase, filter: &TransactionFilter) -> Result<ClientReport<'a>> {
    let client_id = filter
        .client_id
        .ok_or_else(|| anyhow!("a client id is required"))?;
    let client = db
        .clients
        .iter()
        .find(|c| c.id == client_id)
        .ok_or_else(|| anyhow!("client {} not found", client_id))?;

    let history: Vec<_> = db
        .transactions
        .iter()
        .filter(|t| t.client_id == client_id)
        .cloned()
        .collect();

    Ok(ClientReport {
        client,
        monthly: monthly_rollup(&db.transactions, filter),
        categories: category_averages(&db.transactions, filter),
        score: score_client(client.initial_balance, &history),
    })
}

fn print_text(report: &ClientReport) {
    println!("{} (client {})", report.client.full_name(), report.client.id);
    println!("Balance: {:.2}", report.client.initial_balance);
    println!();

    println!("{:<8} {:>14} {:>14} {:>14}", "Month", "Income", "Expense", "Net");
    for m in &report.monthly {
        println!("{:<8} {:>14.2} {:>14.2} {:>14.2}", m.label, m.income, m.expense, m.net);
    }
    println!();

    println!("{:<36} {:>14}", "Category", "Average");
    for c in &report.categories {
        println!("{:<36} {:>14.2}", c.category, c.average);
    }
    println!();

    let s = &report.score;
    println!("Months scored:       {}", s.month_count);
    println!("Avg monthly income:  {:.2}", s.avg_monthly_income);
    println!("Avg monthly expense: {:.2}", s.avg_monthly_expense);
    println!("Debt ratio:          {:.3}", s.debt_ratio);
    println!("Credit score:        {:.1} ({})", s.credit_score, s.status_label);
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = TransactionFilter::from_params(args.start.as_deref(), args.end.as_deref(), None)?
        .for_client(args.client_id);

    let db = read_database(&args.database)?;
    let report = build_report(&db, &filter)?;

    if args.json {
        let out = json!({
            "client_id": report.client.id,
            "name": report.client.full_name(),
            "monthly": report.monthly,
            "category_averages": report.categories,
            "score": report.score,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::CreditStatus;
    use utils::demo_database;

    #[test]
    fn test_range_narrows_rollups_but_not_score() {
        let db = demo_database();
        let filter = TransactionFilter::from_params(Some("2025-03-01"), None, Some("3")).unwrap();
        let report = build_report(&db, &filter).unwrap();

        assert_eq!(report.monthly.len(), 1);
        assert_eq!(report.monthly[0].label, "2025-03");
        assert_eq!(report.score.month_count, 2);
        assert_eq!(report.score.status, CreditStatus::Danger);
    }

    #[test]
    fn test_unknown_client_fails() {
        let db = demo_database();
        let filter = TransactionFilter::default().for_client(42);
        assert!(build_report(&db, &filter).is_err());
    }
}
