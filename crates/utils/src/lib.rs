pub mod credentials;
pub mod database;
pub mod integrity;
pub mod seed;

// Re-export commonly used items
pub use crate::credentials::{hash_password, verify_password};
pub use crate::database::{ensure_database_exists, read_database, resolve_database_path, write_database};
pub use crate::integrity::{find_dangling_client_references, find_duplicate_ids, DanglingReference};
pub use crate::seed::demo_database;
