use serde::{Deserialize, Serialize};

use crate::rules::{default_rules, KeywordRule, FALLBACK_REPLY, FALLBACK_TOPIC};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub topic: String,
    pub reply: String,
}

/// Keyword-matched canned responses. No state, no model.
#[derive(Debug, Clone)]
pub struct CannedAssistant {
    rules: Vec<KeywordRule>,
}

impl Default for CannedAssistant {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl CannedAssistant {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    pub fn reply(&self, message: &str) -> AssistantReply {
        let tokens = tokenize(message);
        if tokens.is_empty() {
            return self.reply_for_topic("help");
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(&tokens))
            .map(|rule| AssistantReply {
                topic: rule.topic.to_string(),
                reply: rule.reply.to_string(),
            })
            .unwrap_or_else(fallback)
    }

    fn reply_for_topic(&self, topic: &str) -> AssistantReply {
        self.rules
            .iter()
            .find(|rule| rule.topic == topic)
            .map(|rule| AssistantReply {
                topic: rule.topic.to_string(),
                reply: rule.reply.to_string(),
            })
            .unwrap_or_else(fallback)
    }
}

fn fallback() -> AssistantReply {
    AssistantReply {
        topic: FALLBACK_TOPIC.to_string(),
        reply: FALLBACK_REPLY.to_string(),
    }
}

/// Lowercased words with French accents folded, split on anything that is not alphanumeric.
fn tokenize(message: &str) -> Vec<String> {
    message
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .collect::<String>()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}
