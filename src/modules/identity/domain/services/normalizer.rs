use std::sync::LazyLock;

/// Latin letters that look like Cyrillic ones, folded Latin -> Cyrillic only.
///
/// Letters without a visual twin (`n`, `d`, `r`...) stay Latin.
pub const HOMOGLYPHS: [(char, char); 13] = [
    ('a', 'а'),
    ('c', 'с'),
    ('e', 'е'),
    ('i', 'і'),
    ('o', 'о'),
    ('p', 'р'),
    ('x', 'х'),
    ('y', 'у'),
    ('h', 'н'),
    ('k', 'к'),
    ('b', 'в'),
    ('m', 'м'),
    ('t', 'т'),
];

/// Replace a lowercase Latin homoglyph with its Cyrillic twin
pub fn fold_homoglyph(c: char) -> char {
    HOMOGLYPHS
        .iter()
        .find(|(latin, _)| *latin == c)
        .map(|(_, cyrillic)| *cyrillic)
        .unwrap_or(c)
}

fn is_lowercase_cyrillic(c: char) -> bool {
    // а..я, ѐ..џ (ё, є, і, ї, ў...) and ґ
    ('\u{0430}'..='\u{045F}').contains(&c) || c == '\u{0491}'
}

/// Characters allowed in a comparison key
pub fn is_key_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || is_lowercase_cyrillic(c)
}

/// Single step of the key normalization pipeline
pub trait KeyTransformation: Send + Sync {
    fn transform(&self, input: &str) -> String;
    fn name(&self) -> &'static str;
}

/// Script-aware lowercase (Latin and Cyrillic alike)
#[derive(Debug, Clone)]
pub struct CaseFoldTransform;

impl KeyTransformation for CaseFoldTransform {
    fn transform(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "CaseFold"
    }
}

/// Folds Latin lookalikes onto Cyrillic using [`HOMOGLYPHS`]
#[derive(Debug, Clone)]
pub struct HomoglyphFoldTransform;

impl KeyTransformation for HomoglyphFoldTransform {
    fn transform(&self, input: &str) -> String {
        input.chars().map(fold_homoglyph).collect()
    }

    fn name(&self) -> &'static str {
        "HomoglyphFold"
    }
}

/// Drops everything except lowercase Latin, lowercase Cyrillic and digits
#[derive(Debug, Clone)]
pub struct StripNonKeyCharsTransform;

impl KeyTransformation for StripNonKeyCharsTransform {
    fn transform(&self, input: &str) -> String {
        input.chars().filter(|c| is_key_char(*c)).collect()
    }

    fn name(&self) -> &'static str {
        "StripNonKeyChars"
    }
}

/// Ordered pipeline turning a raw string into a comparison key
pub struct KeyNormalizer {
    transformations: Vec<Box<dyn KeyTransformation>>,
}

impl KeyNormalizer {
    /// Create a new empty normalizer
    pub fn new() -> Self {
        Self {
            transformations: Vec::new(),
        }
    }

    /// Case fold, then homoglyph fold, then strip. Order matters: folding
    /// before stripping keeps Latin lookalikes as Cyrillic letters.
    pub fn standard() -> Self {
        Self::new()
            .with_case_fold()
            .with_homoglyph_fold()
            .with_strip_non_key_chars()
    }

    pub fn with_case_fold(mut self) -> Self {
        self.transformations.push(Box::new(CaseFoldTransform));
        self
    }

    pub fn with_homoglyph_fold(mut self) -> Self {
        self.transformations.push(Box::new(HomoglyphFoldTransform));
        self
    }

    pub fn with_strip_non_key_chars(mut self) -> Self {
        self.transformations.push(Box::new(StripNonKeyCharsTransform));
        self
    }

    pub fn normalize(&self, input: &str) -> String {
        let mut result = input.to_string();

        for transformation in &self.transformations {
            result = transformation.transform(&result);
            log::trace!("After {}: '{}'", transformation.name(), result);
        }

        result
    }

    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }
}

impl Default for KeyNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

static STANDARD: LazyLock<KeyNormalizer> = LazyLock::new(KeyNormalizer::standard);

/// Canonical comparison key: lowercase, homoglyph-folded, punctuation-free.
///
/// Total and idempotent.
pub fn normalize(input: &str) -> String {
    STANDARD.normalize(input)
}
