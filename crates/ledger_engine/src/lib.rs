//! Pure computations over a ledger snapshot: monthly rollups, category
//! averages and the credit-scoring heuristic.

pub mod aggregation;
pub mod error;
pub mod filter;
pub mod scoring;

pub use aggregation::{category_averages, monthly_rollup};
pub use error::{EngineError, Result};
pub use filter::{parse_date_param, TransactionFilter, DATE_FORMAT};
pub use scoring::{score_client, score_from_monthly};
