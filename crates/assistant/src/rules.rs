/// A topic answered with a fixed reply when any of its keywords appears.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

impl KeywordRule {
    pub fn matches(&self, tokens: &[String]) -> bool {
        tokens
            .iter()
            .any(|token| self.keywords.iter().any(|kw| token == kw))
    }
}

pub const FALLBACK_TOPIC: &str = "fallback";
pub const FALLBACK_REPLY: &str = "Sorry, I did not understand your request. You can ask about your balance, \
     your expenses, your income, your credit score or your card.";

/// Checked in order; the first rule with a matching keyword answers.
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule {
            topic: "balance",
            keywords: &["balance", "solde", "account", "compte"],
            reply: "Your current balance and account details are shown on your profile page.",
        },
        KeywordRule {
            topic: "expenses",
            keywords: &["expense", "expenses", "spending", "spent", "depense", "depenses", "depenser"],
            reply: "Your monthly expenses are summarised in the monthly comparison chart. \
                    Negative transactions count as expenses.",
        },
        KeywordRule {
            topic: "income",
            keywords: &["income", "salary", "salaire", "revenu", "revenus"],
            reply: "Your monthly income is the sum of your incoming transactions, \
                    shown next to your expenses in the monthly comparison chart.",
        },
        KeywordRule {
            topic: "credit_score",
            keywords: &["score", "credit", "loan", "loans", "pret", "emprunt", "dette", "debt"],
            reply: "Your credit score is computed from your balance and your debt ratio. \
                    Keep your expenses under 30% of your monthly capacity to reach premium status.",
        },
        KeywordRule {
            topic: "card",
            keywords: &["card", "carte", "cvv", "bloquer", "block", "lost", "perdue"],
            reply: "For any card issue, contact your advisor or call the bank. \
                    Never share your card number or security code.",
        },
        KeywordRule {
            topic: "help",
            keywords: &["help", "aide", "assistance", "support"],
            reply: "I can answer questions about your balance, expenses, income, credit score and card.",
        },
        KeywordRule {
            topic: "greeting",
            keywords: &["hello", "hi", "hey", "bonjour", "salut", "bonsoir"],
            reply: "Hello! How can I help you with your account today?",
        },
    ]
}
