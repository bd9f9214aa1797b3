use backend_api::{run_server, AppState, FileLedgerRepository};
use settings_loader::{apply_env_overrides, load_settings_with_fallback};
use std::sync::Arc;
use std::{env, path::PathBuf};
use utils::ensure_database_exists;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine, values then come from the real environment
    dotenvy::dotenv().ok();

    let settings_path = env::var("SETTINGS_PATH").ok().map(PathBuf::from);
    let settings = load_settings_with_fallback(settings_path.as_ref())?.unwrap_or_default();
    let settings = apply_env_overrides(settings)?;

    // Resolve paths: if absolute keep them, else try the workspace root then the current directory.
    let crate_root = env::current_dir()?;
    let workspace_root = find_workspace_root().unwrap_or_else(|| crate_root.clone());
    let bases = [&workspace_root, &crate_root];

    let database_path = resolve_with_fallback(&settings.database_path, &bases);
    let static_dir = resolve_with_fallback(&settings.static_dir, &bases);

    println!("Bank Ledger API Server");
    println!("======================");
    println!("Workspace root: {}", workspace_root.display());
    println!("Database path (resolved): {}", database_path.display());
    println!("Static dir (resolved): {}", static_dir.display());
    println!("Listening on: {}:{}", settings.server.host, settings.server.port);
    println!();

    // Pre-flight checks
    let database_path = ensure_database_exists(&database_path)?;
    let static_dir = if static_dir.is_dir() {
        Some(static_dir)
    } else {
        eprintln!("[WARN] static directory not found at: {}", static_dir.display());
        eprintln!("       Continuing; only the JSON API will be served.");
        None
    };

    let repo = Arc::new(FileLedgerRepository::new(database_path));
    let state = AppState::new(repo);

    // Start the server
    run_server(state, &settings, static_dir).await?;

    Ok(())
}

/// Find the Cargo workspace root by traversing up until a Cargo.toml that contains a [workspace] section.
fn find_workspace_root() -> Option<PathBuf> {
    let mut dir = env::current_dir().ok()?;
    for _ in 0..10 {
        let candidate = dir.join("Cargo.toml");
        if let Ok(content) = std::fs::read_to_string(&candidate) {
            if content.contains("[workspace]") {
                return Some(dir);
            }
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Resolve a raw path string against a list of base directories, returning the first existing match, or the path under the first base.
fn resolve_with_fallback(raw: &str, bases: &[&PathBuf]) -> PathBuf {
    let input = PathBuf::from(raw);
    if input.is_absolute() {
        return input;
    }
    for base in bases {
        let candidate = base.join(&input);
        if candidate.exists() {
            return candidate;
        }
    }
    match bases.first() {
        Some(base) => base.join(input),
        None => input,
    }
}
