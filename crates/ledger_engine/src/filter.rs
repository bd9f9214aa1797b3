use chrono::NaiveDate;
use models::Transaction;

use crate::error::{EngineError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Optional inclusive date range plus optional client restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub client_id: Option<i64>,
}

impl TransactionFilter {
    /// Build a filter from raw query-string values.
    ///
    /// Missing or empty values mean "no restriction", and so does a `client_id` of 0.
    /// Dates must be `YYYY-MM-DD`.
    pub fn from_params(
        start: Option<&str>,
        end: Option<&str>,
        client_id: Option<&str>,
    ) -> Result<Self> {
        let start = parse_date_param("start", start)?;
        let end = parse_date_param("end", end)?;
        let client_id = parse_client_id(client_id)?;

        Ok(Self {
            start,
            end,
            client_id,
        })
    }

    pub fn for_client(mut self, client_id: i64) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start)
            && self.end.map_or(true, |end| date <= end)
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.client_id.map_or(true, |id| txn.client_id == id) && self.contains_date(txn.date)
    }

    pub fn apply<'a>(
        &self,
        transactions: &'a [Transaction],
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        let filter = *self;
        transactions.iter().filter(move |txn| filter.matches(txn))
    }
}

/// Parse a `YYYY-MM-DD` query parameter. Empty input is treated as absent.
pub fn parse_date_param(param: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| EngineError::InvalidDate {
                param,
                value: value.to_string(),
            }),
    }
}

fn parse_client_id(raw: Option<&str>) -> Result<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(|id| (id != 0).then_some(id))
            .map_err(|_| EngineError::InvalidClientId(value.to_string())),
    }
}
