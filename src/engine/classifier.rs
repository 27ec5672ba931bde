// file: src/engine/classifier.rs
// description: ordered keyword rules mapping a question to a theme
// reference: first-match-wins rule table

use crate::config::{MatchMode, ThemeRule};
use crate::knowledge::tokenizer;
use crate::models::Theme;

pub struct ThemeClassifier {
    rules: Vec<ThemeRule>,
}

impl ThemeClassifier {
    /// Keywords are lowercased here; rules keep their order.
    pub fn new(rules: Vec<ThemeRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| ThemeRule {
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .collect(),
                ..rule
            })
            .collect();

        Self { rules }
    }

    /// Theme of the first rule with a matching keyword, or `None`.
    pub fn classify(&self, question: &str) -> Option<Theme> {
        let tokens = tokenizer::raw_tokens(question);
        if tokens.is_empty() {
            return None;
        }

        self.rules
            .iter()
            .find(|rule| Self::rule_matches(rule, &tokens))
            .map(|rule| rule.theme)
    }

    fn rule_matches(rule: &ThemeRule, tokens: &[String]) -> bool {
        rule.keywords.iter().any(|keyword| {
            tokens.iter().any(|token| match rule.match_mode {
                MatchMode::Prefix => token.starts_with(keyword.as_str()),
                MatchMode::Exact => token == keyword,
            })
        })
    }

    pub fn rules(&self) -> &[ThemeRule] {
        &self.rules
    }
}

impl Default for ThemeClassifier {
    fn default() -> Self {
        Self::new(crate::config::ClassifierConfig::default_rules())
    }
}
