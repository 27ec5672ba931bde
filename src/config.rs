// file: src/config.rs
// description: engine configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{EngineError, Result};
use crate::models::Theme;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FALLBACK_ANSWER: &str = "The answer eludes me today.";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KnowledgeConfig {
    /// Verse dataset on disk; the bundled dataset is used when unset.
    #[serde(default)]
    pub verses_path: Option<PathBuf>,
    #[serde(default)]
    pub documents_path: Option<PathBuf>,
    #[serde(default)]
    pub documents_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Evaluated in order; the first matching rule wins.
    #[serde(default = "ClassifierConfig::default_rules")]
    pub rules: Vec<ThemeRule>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ThemeRule {
    pub theme: Theme,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// A question token starts with the keyword.
    #[default]
    Prefix,
    /// A question token equals the keyword.
    Exact,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SynthesisConfig {
    #[serde(default = "SynthesisConfig::default_fallback")]
    pub fallback_answer: String,
    #[serde(default)]
    pub selection: SelectionPolicy,
    #[serde(default = "SynthesisConfig::default_normalize_documents")]
    pub normalize_documents: bool,
    #[serde(default = "SynthesisConfig::default_term_map")]
    pub term_map: Vec<TermSubstitution>,
}

/// Which verse of a matched theme bucket is tried first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    #[default]
    First,
    /// SHA-256 of the lowercased, trimmed question modulo the bucket size.
    QuestionHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TermSubstitution {
    pub from: String,
    pub to: String,
}

impl TermSubstitution {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl ClassifierConfig {
    pub fn default_rules() -> Vec<ThemeRule> {
        fn rule(theme: Theme, match_mode: MatchMode, keywords: &[&str]) -> ThemeRule {
            ThemeRule {
                theme,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
                match_mode,
            }
        }

        vec![
            rule(Theme::Creation, MatchMode::Prefix, &["creat", "shape"]),
            rule(Theme::Creation, MatchMode::Exact, &["made", "maker"]),
            rule(
                Theme::Hell,
                MatchMode::Exact,
                &["hell", "hellfire", "fire", "fires", "punish", "punished", "punishment"],
            ),
            rule(Theme::Love, MatchMode::Prefix, &["love", "spouse", "wife"]),
            rule(
                Theme::Mercy,
                MatchMode::Prefix,
                &["mercy", "merci", "forgiv", "compassion"],
            ),
        ]
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rules: Self::default_rules(),
        }
    }
}

impl SynthesisConfig {
    fn default_fallback() -> String {
        DEFAULT_FALLBACK_ANSWER.to_string()
    }

    fn default_normalize_documents() -> bool {
        true
    }

    pub fn default_term_map() -> Vec<TermSubstitution> {
        vec![
            TermSubstitution::new("Allah", "God"),
            TermSubstitution::new("Thou", "You"),
            TermSubstitution::new("thou", "you"),
            TermSubstitution::new("Thee", "You"),
            TermSubstitution::new("thee", "you"),
            TermSubstitution::new("Thy", "Your"),
            TermSubstitution::new("thy", "your"),
            TermSubstitution::new("hath", "has"),
            TermSubstitution::new("unto", "to"),
        ]
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            fallback_answer: Self::default_fallback(),
            selection: SelectionPolicy::default(),
            normalize_documents: Self::default_normalize_documents(),
            term_map: Self::default_term_map(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ADAMAI")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| EngineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| EngineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            knowledge: KnowledgeConfig {
                verses_path: None,
                documents_path: Some(PathBuf::from("data/documents.json")),
                documents_dir: None,
            },
            classifier: ClassifierConfig::default(),
            synthesis: SynthesisConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        self.synthesis.validate()
    }
}

impl ClassifierConfig {
    /// A blank keyword would match every question, so it is rejected.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.rules {
            if rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(EngineError::Config(format!(
                    "classifier rule for '{}' needs non-empty keywords",
                    rule.theme
                )));
            }
        }
        Ok(())
    }
}

impl SynthesisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fallback_answer.trim().is_empty() {
            return Err(EngineError::Config(
                "fallback_answer must not be empty".to_string(),
            ));
        }

        if self.term_map.iter().any(|s| s.from.trim().is_empty()) {
            return Err(EngineError::Config(
                "term_map entries need a non-empty 'from'".to_string(),
            ));
        }

        Ok(())
    }
}
