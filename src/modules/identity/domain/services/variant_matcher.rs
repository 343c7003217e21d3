use std::sync::Arc;

use serde::Serialize;

use super::normalizer::normalize;
use super::synonym_table::SynonymTable;
use crate::modules::identity::domain::entities::{ColorVariant, ProductId, ProductRecord};

/// Separators a variant label is split on for per-token matching
fn is_label_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '+'
}

/// A color option resolved against the product's siblings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantLink {
    pub variant: ColorVariant,
    pub product_id: Option<ProductId>,
}

/// Decides whether a color/variant label plausibly appears in a product name.
///
/// Pure and stateless apart from the shared synonym table, so one instance can
/// serve any number of concurrent readers.
#[derive(Debug, Clone)]
pub struct VariantMatcher {
    synonyms: Arc<SynonymTable>,
}

impl VariantMatcher {
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self { synonyms }
    }

    /// Matcher backed by the embedded Ukrainian/Russian vocabulary
    pub fn standard() -> Self {
        Self::new(SynonymTable::standard())
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// True if the whole label, or else every one of its tokens, is found in the name.
    ///
    /// A label with no non-empty tokens matches anything.
    pub fn matches(&self, product_name: &str, variant_label: &str) -> bool {
        let subject = normalize(product_name);
        let target = normalize(variant_label);

        if subject.contains(&target) {
            return true;
        }

        variant_label
            .split(is_label_separator)
            .filter(|token| !token.is_empty())
            .all(|token| self.token_matches(&subject, token))
    }

    fn token_matches(&self, subject: &str, token: &str) -> bool {
        if subject.contains(&normalize(token)) {
            return true;
        }

        self.synonyms
            .translations(&token.to_lowercase())
            .iter()
            .any(|translation| subject.contains(&normalize(translation)))
    }

    /// First candidate, in input order, whose name matches the label
    pub fn find_sibling<'a>(
        &self,
        variant_label: &str,
        candidates: &'a [ProductRecord],
    ) -> Option<&'a ProductRecord> {
        candidates
            .iter()
            .find(|candidate| self.matches(&candidate.name, variant_label))
    }

    /// Resolve every color option of `product` to the sibling carrying it
    pub fn link_color_variants(
        &self,
        product: &ProductRecord,
        siblings: &[ProductRecord],
    ) -> Vec<VariantLink> {
        product
            .color_variants
            .iter()
            .map(|variant| VariantLink {
                variant: variant.clone(),
                product_id: self
                    .find_sibling(&variant.name, siblings)
                    .map(|sibling| sibling.id.clone()),
            })
            .collect()
    }
}

impl Default for VariantMatcher {
    fn default() -> Self {
        Self::standard()
    }
}

/// [`VariantMatcher::matches`] with the embedded synonym table
pub fn matches(product_name: &str, variant_label: &str) -> bool {
    VariantMatcher::standard().matches(product_name, variant_label)
}
