use regex::{Regex, RegexBuilder};

use crate::shared::errors::AppResult;

/// Removes curated color/variant phrases from product names to expose the base name.
///
/// Best effort: a color phrase missing from the list leaks into the base name.
#[derive(Debug, Clone)]
pub struct ColorPhraseStripper {
    patterns: Vec<Regex>,
}

impl ColorPhraseStripper {
    /// Compile phrases once, keeping their order. Blank phrases are skipped.
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> AppResult<Self> {
        let mut patterns = Vec::with_capacity(phrases.len());

        for phrase in phrases {
            if let Some(pattern) = Self::phrase_pattern(phrase.as_ref()) {
                patterns.push(RegexBuilder::new(&pattern).case_insensitive(true).build()?);
            }
        }

        Ok(Self { patterns })
    }

    /// Escaped, case-insensitive whole-phrase pattern; inner whitespace runs
    /// match any whitespace run in the name.
    fn phrase_pattern(phrase: &str) -> Option<String> {
        let parts: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(r"\s+"))
        }
    }

    pub fn phrase_count(&self) -> usize {
        self.patterns.len()
    }

    /// Base name left after removing every known phrase.
    ///
    /// A name no phrase matched comes back trimmed but otherwise unchanged.
    pub fn strip(&self, name: &str) -> String {
        let mut result = name.to_string();
        let mut substituted = false;

        for pattern in &self.patterns {
            if pattern.is_match(&result) {
                result = pattern.replace_all(&result, "").into_owned();
                substituted = true;
            }
        }

        if !substituted {
            return name.trim().to_string();
        }

        let result = collapse_whitespace(&result);

        // Separator left dangling by a removed "Сонома + Білий"-style tail
        match result.strip_suffix(|c: char| c == '+' || c == '-') {
            Some(stripped) => stripped.trim_end().to_string(),
            None => result,
        }
    }
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// One-shot stripping; a phrase list that fails to compile leaves the name
/// trimmed only.
pub fn strip_known_colors<S: AsRef<str>>(name: &str, phrases: &[S]) -> String {
    match ColorPhraseStripper::new(phrases) {
        Ok(stripper) => stripper.strip(name),
        Err(err) => {
            log::warn!("Color phrases rejected, keeping '{}' unstripped: {}", name, err);
            name.trim().to_string()
        }
    }
}
