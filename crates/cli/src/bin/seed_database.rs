use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::{Path, PathBuf};
use utils::{demo_database, read_database, resolve_database_path, write_database};

#[derive(Parser, Debug)]
#[command(name = "seed-database", about = "Reset the ledger database to the demo dataset.")]
struct Args {
    /// Database file or directory (e.g., database/database.json)
    #[arg(short, long, default_value = "database/database.json")]
    output: PathBuf,

    /// Overwrite a database that already holds records
    #[arg(long)]
    force: bool,
}

/// Refuses to replace a database that holds records, or that cannot be read, unless forced.
fn check_overwrite(path: &Path, force: bool) -> Result<()> {
    if force || !path.exists() {
        return Ok(());
    }

    // An unreadable file may still hold data, so it needs --force as well
    let existing = read_database(path).with_context(|| {
        format!("{} could not be read; pass --force to overwrite it", path.display())
    })?;
    let records = existing.clients.len() + existing.transactions.len();
    if records > 0 {
        return Err(anyhow!(
            "{} already holds {} records; pass --force to overwrite",
            path.display(),
            records
        ));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let path = resolve_database_path(&args.output);
    check_overwrite(&path, args.force)?;

    let database = demo_database();
    let written = write_database(&path, &database)?;

    println!("Seeded {}", written.display());
    println!("  administrators: {}", database.administrators.len());
    println!("  clients:        {}", database.clients.len());
    println!("  client logins:  {}", database.client_logins.len());
    println!("  transactions:   {}", database.transactions.len());
    Ok(())
}
