use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// Settings models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 3000,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub database_path: String,
	pub static_dir: String,
	pub log_filter: Option<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings::default(),
			database_path: "database/database.json".to_string(),
			static_dir: "static".to_string(),
			log_filter: None,
		}
	}
}

// Ledger records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
	pub id: i64,
	pub client_id: i64,
	pub name: String,
	pub date: NaiveDate,
	#[serde(rename = "type")]
	pub kind: String,
	pub category: String,
	/// Signed amount: non-negative is income-like, negative is expense-like.
	pub amount: f64,
}

impl Transaction {
	/// The (year, month) bucket this transaction falls into.
	pub fn month_key(&self) -> (i32, u32) {
		(self.date.year(), self.date.month())
	}

	pub fn is_income(&self) -> bool {
		self.amount >= 0.0
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
	pub id: i64,
	pub last_name: String,
	pub first_name: String,
	pub birth_date: NaiveDate,
	pub email: String,
	pub phone: String,
	pub address: String,
	pub profession: String,
	#[serde(default)]
	pub initial_balance: f64,
	pub iban: String,
	pub rib: String,
	pub account_number: String,
	pub card_number: String,
	pub card_expiry: String,
	pub card_cvv: String,
}

impl Client {
	pub fn full_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
	}

	/// Card number with every digit but the last four replaced by `*`.
	pub fn masked_card_number(&self) -> String {
		let digits = self.card_number.chars().filter(|c| c.is_ascii_digit()).count();
		let mut seen = 0;
		self.card_number
			.chars()
			.map(|c| {
				if c.is_ascii_digit() {
					seen += 1;
					if seen <= digits.saturating_sub(4) { '*' } else { c }
				} else {
					c
				}
			})
			.collect()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientLogin {
	pub id: i64,
	pub client_id: i64,
	pub email: String,
	pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Administrator {
	pub id: i64,
	pub name: String,
	pub email: String,
	pub password_hash: String,
	pub role: String,
}

/// Whole persisted document: credentials, clients and their ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDatabase {
	#[serde(default = "default_engine_version")]
	pub engine_version: String,
	#[serde(default)]
	pub administrators: Vec<Administrator>,
	#[serde(default)]
	pub clients: Vec<Client>,
	#[serde(default)]
	pub client_logins: Vec<ClientLogin>,
	#[serde(default)]
	pub transactions: Vec<Transaction>,
}

fn default_engine_version() -> String {
	"0.1".to_string()
}

// Output models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
	pub year: i32,
	pub month: u32,
	pub income: f64,
	/// Absolute value of the negative sum.
	pub expense: f64,
	pub net: f64,
	pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverage {
	pub category: String,
	pub average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
	Premium,
	Warning,
	Danger,
}

impl CreditStatus {
	/// Display text shown next to the score.
	pub fn label(&self) -> &'static str {
		match self {
			CreditStatus::Premium => "Premium client - excellent repayment capacity",
			CreditStatus::Warning => "Under watch - moderate debt level",
			CreditStatus::Danger => "High risk - expenses exceed capacity",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
	pub month_count: usize,
	pub avg_monthly_income: f64,
	pub avg_monthly_expense: f64,
	pub debt_ratio: f64,
	pub credit_score: f64,
	pub status: CreditStatus,
	pub status_label: String,
}
