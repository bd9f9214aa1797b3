pub mod assistant;
pub mod rules;

// Re export the important bits
pub use assistant::{AssistantReply, CannedAssistant};
pub use rules::{default_rules, KeywordRule};
