use anyhow::{Context, Result};
use models::LedgerDatabase;
use std::{
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

/// Resolve a directory to the `database.json` inside it; file paths are kept.
pub fn resolve_database_path<P: AsRef<Path>>(database_path: P) -> PathBuf {
    let path = database_path.as_ref();
    if path.is_dir() || (!path.exists() && !path.to_string_lossy().ends_with(".json")) {
        path.join("database.json")
    } else {
        path.to_path_buf()
    }
}

/// Ensures that database.json exists at the specified path.
/// A missing file is initialized from template.json in the same directory.
/// An existing file is never rewritten: if it does not hold a valid ledger
/// an error is returned and the file is left as it is.
///
/// # Arguments
/// * `database_path` - Path to the database.json file (can be a file path or directory)
///
/// # Returns
/// * `Result<PathBuf>` - The resolved path to the database.json file
///
/// # Example
/// ```no_run
/// use utils::ensure_database_exists;
///
/// let db_path = ensure_database_exists("database").unwrap();
/// println!("Database ready at: {:?}", db_path);
/// ```
pub fn ensure_database_exists<P: AsRef<Path>>(database_path: P) -> Result<PathBuf> {
    let db_path = resolve_database_path(database_path);

    if db_path.exists() {
        read_database(&db_path)?;
    } else {
        initialize_from_template(&db_path)?;
    }

    Ok(db_path)
}

/// Initializes database.json from template.json, or from an empty ledger
/// when no template sits next to it.
fn initialize_from_template(db_path: &Path) -> Result<()> {
    let template_path = db_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine parent directory of {:?}", db_path))?
        .join("template.json");

    let database = if template_path.exists() {
        let mut template_file = File::open(&template_path)
            .with_context(|| format!("Cannot open template file at {:?}", template_path))?;
        let mut template_contents = String::new();
        template_file.read_to_string(&mut template_contents)?;

        let template: LedgerDatabase = serde_json::from_str(&template_contents)
            .with_context(|| format!("template.json at {:?} is not a valid ledger", template_path))?;
        // Only the shape is taken from the template, never its records
        LedgerDatabase {
            engine_version: template.engine_version,
            ..LedgerDatabase::default()
        }
    } else {
        LedgerDatabase {
            engine_version: "0.1".to_string(),
            ..LedgerDatabase::default()
        }
    };

    write_database(db_path, &database)?;
    println!("Initialized empty ledger database at {:?}", db_path);

    Ok(())
}

/// Reads database.json into a typed ledger. The file must already exist.
pub fn read_database<P: AsRef<Path>>(database_path: P) -> Result<LedgerDatabase> {
    let db_path = resolve_database_path(database_path);

    let mut file =
        File::open(&db_path).with_context(|| format!("Cannot open database at {:?}", db_path))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Database at {:?} is not a valid ledger", db_path))
}

/// Writes the ledger to database.json, creating parent directories as needed.
pub fn write_database<P: AsRef<Path>>(database_path: P, database: &LedgerDatabase) -> Result<PathBuf> {
    let db_path = resolve_database_path(database_path);

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(&db_path)
        .with_context(|| format!("Cannot create database file at {:?}", db_path))?;

    let formatted = serde_json::to_string_pretty(database)?;
    file.write_all(formatted.as_bytes())?;

    Ok(db_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_database;

    #[test]
    fn test_directory_resolves_to_database_json() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_database_path(dir.path()), dir.path().join("database.json"));

        let file = dir.path().join("ledger.json");
        assert_eq!(resolve_database_path(&file), file);
    }

    #[test]
    fn test_missing_database_is_initialized_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = ensure_database_exists(dir.path()).unwrap();
        let db = read_database(&path).unwrap();

        assert!(db.clients.is_empty());
        assert!(db.transactions.is_empty());
        assert_eq!(path, dir.path().join("database.json"));
    }

    #[test]
    fn test_template_records_are_not_copied() {
        let dir = tempfile::tempdir().unwrap();
        let mut template = demo_database();
        template.engine_version = "0.7".to_string();
        std::fs::write(
            dir.path().join("template.json"),
            serde_json::to_string(&template).unwrap(),
        )
        .unwrap();

        let path = ensure_database_exists(dir.path().join("database.json")).unwrap();
        let db = read_database(path).unwrap();
        assert_eq!(db.engine_version, "0.7");
        assert!(db.administrators.is_empty());
    }

    #[test]
    fn test_read_missing_database_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");

        assert!(read_database(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_json_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(ensure_database_exists(&path).is_err());
        assert!(read_database(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_schema_mismatch_is_an_error_and_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");

        let mut value = serde_json::to_value(demo_database()).unwrap();
        value["clients"][0].as_object_mut().unwrap().remove("card_cvv");
        let before = serde_json::to_string_pretty(&value).unwrap();
        std::fs::write(&path, &before).unwrap();

        let err = ensure_database_exists(&path).unwrap_err();
        assert!(err.to_string().contains("is not a valid ledger"));
        assert!(read_database(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_write_then_read_keeps_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("database.json");

        write_database(&path, &demo_database()).unwrap();
        assert_eq!(read_database(&path).unwrap(), demo_database());
    }
}
