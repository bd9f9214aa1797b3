pub mod admin_handlers;
pub mod auth_handlers;
pub mod client_handlers;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod repository;
pub mod router;
pub mod server;
pub mod session;
pub mod state;

pub use error::{ApiError, Result};
pub use repository::{FileLedgerRepository, InMemoryLedgerRepository, LedgerRepository};
pub use router::create_router;
pub use server::run_server;
pub use session::{Identity, SessionStore};
pub use state::AppState;
