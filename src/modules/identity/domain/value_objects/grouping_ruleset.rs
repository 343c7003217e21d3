use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

/// Literal text substitution applied to names before color stripping.
///
/// Used to unify known typos and dimension spellings within a data source
/// (e.g. Cyrillic `х` between dimensions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextReplacement {
    pub from: String,
    pub to: String,
}

impl TextReplacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

fn default_near_miss_threshold() -> f64 {
    GroupingRuleset::DEFAULT_NEAR_MISS_THRESHOLD
}

/// Per-batch configuration for the series grouper, curated per data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingRuleset {
    /// Ruleset revision, bumped whenever the phrase list is edited
    pub version: u32,

    /// Leading part of every minted series token
    #[serde(default)]
    pub collection_prefix: String,

    /// Color/variant phrases to strip, applied in order
    #[serde(default)]
    pub phrases: Vec<String>,

    /// Brand and collection words removed from the slug
    #[serde(default)]
    pub slug_exclusions: Vec<String>,

    /// Pre-stripping substitutions, applied in order
    #[serde(default)]
    pub replacements: Vec<TextReplacement>,

    /// Minimum Jaro-Winkler similarity for reporting a singleton as a near miss
    #[serde(default = "default_near_miss_threshold")]
    pub near_miss_threshold: f64,
}

impl GroupingRuleset {
    pub const DEFAULT_NEAR_MISS_THRESHOLD: f64 = 0.92;

    pub fn new(collection_prefix: impl Into<String>) -> Self {
        Self {
            version: 1,
            collection_prefix: collection_prefix.into(),
            phrases: Vec::new(),
            slug_exclusions: Vec::new(),
            replacements: Vec::new(),
            near_miss_threshold: Self::DEFAULT_NEAR_MISS_THRESHOLD,
        }
    }

    /// Label used in logs, e.g. `everest@v3`
    pub fn label(&self) -> String {
        if self.collection_prefix.is_empty() {
            format!("unnamed@v{}", self.version)
        } else {
            format!("{}@v{}", self.collection_prefix, self.version)
        }
    }

    /// Parse a ruleset from JSON and validate it
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let ruleset: Self = serde_json::from_str(json)?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Validates the ruleset
    pub fn validate(&self) -> AppResult<()> {
        if self.version == 0 {
            return Err(AppError::ValidationError(
                "Ruleset version must be > 0".to_string(),
            ));
        }

        if self.collection_prefix.chars().any(char::is_whitespace) {
            return Err(AppError::ValidationError(format!(
                "Collection prefix '{}' must not contain whitespace",
                self.collection_prefix
            )));
        }

        if let Some(position) = self.phrases.iter().position(|p| p.trim().is_empty()) {
            return Err(AppError::ValidationError(format!(
                "Phrase #{} is blank",
                position + 1
            )));
        }

        if let Some(position) = self.replacements.iter().position(|r| r.from.is_empty()) {
            return Err(AppError::ValidationError(format!(
                "Replacement #{} has an empty 'from' pattern",
                position + 1
            )));
        }

        if !(0.0..=1.0).contains(&self.near_miss_threshold) {
            return Err(AppError::ValidationError(format!(
                "Near-miss threshold must be in [0, 1], got {}",
                self.near_miss_threshold
            )));
        }

        for warning in self.ordering_warnings() {
            log::warn!("Ruleset {}: {}", self.label(), warning);
        }

        Ok(())
    }

    /// Phrases shadowed by an earlier, shorter phrase contained in them.
    ///
    /// The shorter match runs first and leaves fragments of the longer phrase
    /// behind, so such lists almost always want reordering.
    pub fn ordering_warnings(&self) -> Vec<String> {
        let lowered: Vec<String> = self.phrases.iter().map(|p| p.to_lowercase()).collect();
        let mut warnings = Vec::new();

        for (i, shorter) in lowered.iter().enumerate() {
            for (j, longer) in lowered.iter().enumerate().skip(i + 1) {
                if longer.len() > shorter.len() && longer.contains(shorter.as_str()) {
                    warnings.push(format!(
                        "phrase '{}' precedes longer phrase '{}' that contains it",
                        self.phrases[i], self.phrases[j]
                    ));
                }
            }
        }

        warnings
    }
}

impl Default for GroupingRuleset {
    fn default() -> Self {
        Self::new("")
    }
}

/// Builder for GroupingRuleset to make batch setup easier
#[derive(Default)]
pub struct GroupingRulesetBuilder {
    ruleset: GroupingRuleset,
}

impl GroupingRulesetBuilder {
    pub fn new(collection_prefix: impl Into<String>) -> Self {
        Self {
            ruleset: GroupingRuleset::new(collection_prefix),
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.ruleset.version = version;
        self
    }

    pub fn phrase(mut self, phrase: impl Into<String>) -> Self {
        self.ruleset.phrases.push(phrase.into());
        self
    }

    pub fn phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ruleset.phrases.extend(phrases.into_iter().map(Into::into));
        self
    }

    pub fn slug_exclusions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ruleset
            .slug_exclusions
            .extend(words.into_iter().map(Into::into));
        self
    }

    pub fn replacement(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.ruleset.replacements.push(TextReplacement::new(from, to));
        self
    }

    pub fn near_miss_threshold(mut self, threshold: f64) -> Self {
        self.ruleset.near_miss_threshold = threshold;
        self
    }

    pub fn build(self) -> AppResult<GroupingRuleset> {
        self.ruleset.validate()?;
        Ok(self.ruleset)
    }
}
