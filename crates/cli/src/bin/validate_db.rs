use anyhow::{Context, Result, anyhow};
use clap::Parser;
use models::LedgerDatabase;
use regex::Regex;
use std::{fs, path::PathBuf};
use utils::{find_dangling_client_references, find_duplicate_ids, resolve_database_path};

#[derive(Parser, Debug)]
#[command(name = "validate-db", about = "Check the ledger database for broken records.")]
struct Args {
    /// Database file or directory
    #[arg(short, long, default_value = "database/database.json")]
    database: PathBuf,
}

#[derive(Default)]
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Report {
    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }
    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
    fn print(&self, file: &str) {
        for w in &self.warnings {
            println!("[WARN] {}: {}", file, w);
        }
        for e in &self.errors {
            println!("[ERROR] {}: {}", file, e);
        }
    }
    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

struct Patterns {
    email: Regex,
    password_hash: Regex,
}

impl Patterns {
    fn new() -> Result<Self> {
        Ok(Self {
            email: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?,
            password_hash: Regex::new(r"^[0-9a-fA-F]{64}$")?,
        })
    }
}

fn check_duplicates(rep: &mut Report, record: &str, ids: impl IntoIterator<Item = i64>) {
    for id in find_duplicate_ids(ids) {
        rep.error(format!("duplicate {} id {}", record, id));
    }
}

fn validate_database(db: &LedgerDatabase, patterns: &Patterns) -> Report {
    let mut rep = Report::default();

    check_duplicates(&mut rep, "administrator", db.administrators.iter().map(|a| a.id));
    check_duplicates(&mut rep, "client", db.clients.iter().map(|c| c.id));
    check_duplicates(&mut rep, "client_login", db.client_logins.iter().map(|l| l.id));
    check_duplicates(&mut rep, "transaction", db.transactions.iter().map(|t| t.id));

    for dangling in find_dangling_client_references(db) {
        rep.error(format!(
            "{} {} references unknown client {}",
            dangling.record, dangling.record_id, dangling.client_id
        ));
    }

    for admin in &db.administrators {
        if !patterns.email.is_match(&admin.email) {
            rep.error(format!("administrator {} has malformed email '{}'", admin.id, admin.email));
        }
        if !patterns.password_hash.is_match(&admin.password_hash) {
            rep.error(format!("administrator {} password_hash is not a SHA-256 hex digest", admin.id));
        }
    }

    for login in &db.client_logins {
        if !patterns.email.is_match(&login.email) {
            rep.error(format!("client_login {} has malformed email '{}'", login.id, login.email));
        }
        if !patterns.password_hash.is_match(&login.password_hash) {
            rep.error(format!("client_login {} password_hash is not a SHA-256 hex digest", login.id));
        }
    }

    for client in &db.clients {
        if !patterns.email.is_match(&client.email) {
            rep.warn(format!("client {} has malformed email '{}'", client.id, client.email));
        }
        if client.initial_balance < 0.0 {
            rep.warn(format!("client {} has negative initial balance {}", client.id, client.initial_balance));
        }
    }

    for txn in &db.transactions {
        if txn.category.trim().is_empty() {
            rep.warn(format!("transaction {} has an empty category", txn.id));
        }
        if !txn.amount.is_finite() {
            rep.error(format!("transaction {} amount is not a finite number", txn.id));
        }
    }

    rep
}

fn main() -> Result<()> {
    let args = Args::parse();
    let path = resolve_database_path(&args.database);
    if !path.exists() {
        return Err(anyhow!("database file not found: {}", path.display()));
    }

    let txt = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let db: LedgerDatabase =
        serde_json::from_str(&txt).with_context(|| format!("parsing {}", path.display()))?;

    let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("database.json");
    let report = validate_database(&db, &Patterns::new()?);
    report.print(file_name);

    if report.has_errors() {
        Err(anyhow!("Validation failed"))
    } else {
        println!(
            "{} passed validation ({} clients, {} transactions).",
            file_name,
            db.clients.len(),
            db.transactions.len()
        );
        Ok(())
    }
}
