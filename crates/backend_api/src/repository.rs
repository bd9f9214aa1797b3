use async_trait::async_trait;
use ledger_engine::TransactionFilter;
use models::{Administrator, Client, ClientLogin, LedgerDatabase, Transaction};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;

/// Read access to the ledger and credential records.
/// This abstraction allows swapping between file-based and in-memory implementations
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Transactions matching the filter, in storage order.
    async fn fetch_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;
    async fn fetch_clients(&self) -> Result<Vec<Client>>;
    async fn fetch_client(&self, client_id: i64) -> Result<Option<Client>>;
    /// Email lookup is case-insensitive and ignores surrounding whitespace.
    async fn find_client_login(&self, email: &str) -> Result<Option<ClientLogin>>;
    async fn find_administrator(&self, email: &str) -> Result<Option<Administrator>>;
}

fn same_email(stored: &str, requested: &str) -> bool {
    stored.trim().eq_ignore_ascii_case(requested.trim())
}

fn select_transactions(database: &LedgerDatabase, filter: &TransactionFilter) -> Vec<Transaction> {
    filter.apply(&database.transactions).cloned().collect()
}

fn select_client(database: &LedgerDatabase, client_id: i64) -> Option<Client> {
    database.clients.iter().find(|c| c.id == client_id).cloned()
}

fn select_client_login(database: &LedgerDatabase, email: &str) -> Option<ClientLogin> {
    database
        .client_logins
        .iter()
        .find(|l| same_email(&l.email, email))
        .cloned()
}

fn select_administrator(database: &LedgerDatabase, email: &str) -> Option<Administrator> {
    database
        .administrators
        .iter()
        .find(|a| same_email(&a.email, email))
        .cloned()
}

/// File-based implementation that reads from database.json on every call
pub struct FileLedgerRepository {
    database_path: PathBuf,
}

impl FileLedgerRepository {
    pub fn new<P: AsRef<Path>>(database_path: P) -> Self {
        Self {
            database_path: database_path.as_ref().to_path_buf(),
        }
    }

    async fn load_database(&self) -> Result<LedgerDatabase> {
        let content = tokio::fs::read_to_string(&self.database_path).await?;
        let database: LedgerDatabase = serde_json::from_str(&content)?;
        Ok(database)
    }
}

#[async_trait]
impl LedgerRepository for FileLedgerRepository {
    async fn fetch_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let database = self.load_database().await?;
        Ok(select_transactions(&database, filter))
    }

    async fn fetch_clients(&self) -> Result<Vec<Client>> {
        Ok(self.load_database().await?.clients)
    }

    async fn fetch_client(&self, client_id: i64) -> Result<Option<Client>> {
        let database = self.load_database().await?;
        Ok(select_client(&database, client_id))
    }

    async fn find_client_login(&self, email: &str) -> Result<Option<ClientLogin>> {
        let database = self.load_database().await?;
        Ok(select_client_login(&database, email))
    }

    async fn find_administrator(&self, email: &str) -> Result<Option<Administrator>> {
        let database = self.load_database().await?;
        Ok(select_administrator(&database, email))
    }
}

/// Ledger held in memory, used by tests and demos.
#[derive(Clone, Default)]
pub struct InMemoryLedgerRepository {
    database: Arc<RwLock<LedgerDatabase>>,
}

impl InMemoryLedgerRepository {
    pub fn new(database: LedgerDatabase) -> Self {
        Self {
            database: Arc::new(RwLock::new(database)),
        }
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn fetch_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        Ok(select_transactions(&*self.database.read().await, filter))
    }

    async fn fetch_clients(&self) -> Result<Vec<Client>> {
        Ok(self.database.read().await.clients.clone())
    }

    async fn fetch_client(&self, client_id: i64) -> Result<Option<Client>> {
        Ok(select_client(&*self.database.read().await, client_id))
    }

    async fn find_client_login(&self, email: &str) -> Result<Option<ClientLogin>> {
        Ok(select_client_login(&*self.database.read().await, email))
    }

    async fn find_administrator(&self, email: &str) -> Result<Option<Administrator>> {
        Ok(select_administrator(&*self.database.read().await, email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use utils::{demo_database, write_database};

    #[tokio::test]
    async fn test_file_repository_filters_transactions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_database(dir.path().join("database.json"), &demo_database()).unwrap();
        let repo = FileLedgerRepository::new(&path);

        let filter = TransactionFilter::from_params(Some("2025-02-01"), None, Some("2")).unwrap();
        let txns = repo.fetch_transactions(&filter).await.unwrap();

        assert_eq!(txns.len(), 5);
        assert!(txns.iter().all(|t| t.client_id == 2 && t.month_key() == (2025, 2)));
    }

    #[tokio::test]
    async fn test_file_repository_reads_fresh_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        write_database(&path, &demo_database()).unwrap();
        let repo = FileLedgerRepository::new(&path);
        assert_eq!(repo.fetch_clients().await.unwrap().len(), 3);

        let mut db = demo_database();
        db.clients.truncate(1);
        write_database(&path, &db).unwrap();
        assert_eq!(repo.fetch_clients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_repository_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLedgerRepository::new(dir.path().join("absent.json"));
        let err = repo.fetch_clients().await.unwrap_err();
        assert!(matches!(err, ApiError::IoError(_)));
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let repo = InMemoryLedgerRepository::new(demo_database());

        let login = repo.find_client_login(" Paul.Ngono@example.com ").await.unwrap();
        assert_eq!(login.map(|l| l.client_id), Some(1));

        let admin = repo.find_administrator("ADMIN2@bankapp.com").await.unwrap();
        assert_eq!(admin.map(|a| a.id), Some(2));

        assert!(repo.find_client_login("nobody@example.com").await.unwrap().is_none());
    }
}
