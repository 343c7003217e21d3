//! Ukrainian <-> Russian spelling variants of color and material terms.
//!
//! Entries are plain lowercase word forms, not normalized keys: the matcher
//! looks tokens up before normalizing the translated form.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::shared::errors::{AppError, AppResult};

/// Ukrainian/Russian pairs for the furniture color vocabulary.
/// Reflexive pairs are kept so shared spellings are explicit.
pub static STANDARD_PAIRS: &[(&str, &str)] = &[
    // Whites and neutrals
    ("білий", "белый"),
    ("біла", "белая"),
    ("біле", "белое"),
    ("білі", "белые"),
    ("чорний", "черный"),
    ("чорна", "черная"),
    ("сірий", "серый"),
    ("сіра", "серая"),
    ("графіт", "графит"),
    ("антрацит", "антрацит"),
    ("бежевий", "бежевый"),
    ("кремовий", "кремовый"),
    ("молочний", "молочный"),
    ("кашемір", "кашемир"),
    ("капучіно", "капучино"),
    // Tones
    ("світлий", "светлый"),
    ("світла", "светлая"),
    ("темний", "темный"),
    ("темна", "темная"),
    ("золотий", "золотой"),
    ("срібний", "серебряный"),
    ("сріблястий", "серебристый"),
    ("коричневий", "коричневый"),
    ("зелений", "зеленый"),
    ("синій", "синий"),
    ("блакитний", "голубой"),
    ("червоний", "красный"),
    ("жовтий", "желтый"),
    ("рожевий", "розовый"),
    ("помаранчевий", "оранжевый"),
    ("фіолетовий", "фиолетовый"),
    ("бордовий", "бордовый"),
    // Wood species and decors
    ("дуб", "дуб"),
    ("сонома", "сонома"),
    ("крафт", "крафт"),
    ("венге", "венге"),
    ("горіх", "орех"),
    ("вільха", "ольха"),
    ("ясен", "ясень"),
    ("бук", "бук"),
    ("вишня", "вишня"),
    ("яблуня", "яблоня"),
    ("сосна", "сосна"),
    ("береза", "береза"),
    ("клен", "клен"),
    ("трюфель", "трюфель"),
    ("німфея", "нимфея"),
    ("альба", "альба"),
    ("артисан", "артисан"),
    ("дошка", "доска"),
    // Materials and finishes
    ("мармур", "мрамор"),
    ("бетон", "бетон"),
    ("камінь", "камень"),
    ("глянець", "глянец"),
    ("глянцевий", "глянцевый"),
    ("матовий", "матовый"),
    ("дзеркало", "зеркало"),
    ("скло", "стекло"),
    ("шкіра", "кожа"),
    ("тканина", "ткань"),
    ("метал", "металл"),
    ("велюр", "велюр"),
];

/// Bidirectional, multi-valued lookup of spelling variants.
///
/// Lookup is O(1) by exact lowercase token; unknown tokens have no entry.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from pairs, inserting both directions
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut table = Self::new();
        for (a, b) in pairs {
            table.insert_pair(a.as_ref(), b.as_ref());
        }
        table
    }

    /// Load pairs from a JSON array of two-element arrays: `[["білий", "белый"], ...]`
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let pairs: Vec<Vec<String>> = serde_json::from_str(json)?;
        let mut table = Self::new();

        for (index, pair) in pairs.iter().enumerate() {
            match pair.as_slice() {
                [a, b] if !a.trim().is_empty() && !b.trim().is_empty() => table.insert_pair(a, b),
                _ => {
                    return Err(AppError::InvalidInput(format!(
                        "Synonym entry #{} must be a pair of non-empty words",
                        index + 1
                    )))
                }
            }
        }

        Ok(table)
    }

    /// Shared handle to the embedded Ukrainian/Russian vocabulary
    pub fn standard() -> Arc<SynonymTable> {
        static STANDARD: LazyLock<Arc<SynonymTable>> =
            LazyLock::new(|| Arc::new(SynonymTable::from_pairs(STANDARD_PAIRS.iter().copied())));
        Arc::clone(&STANDARD)
    }

    pub fn insert_pair(&mut self, a: &str, b: &str) {
        let a = a.trim().to_lowercase();
        let b = b.trim().to_lowercase();
        self.insert_one_way(&a, &b);
        self.insert_one_way(&b, &a);
    }

    fn insert_one_way(&mut self, from: &str, to: &str) {
        let translations = self.entries.entry(from.to_string()).or_default();
        if !translations.iter().any(|t| t == to) {
            translations.push(to.to_string());
        }
    }

    /// All translations of an exact lowercase token
    pub fn translations(&self, token: &str) -> &[String] {
        self.entries
            .get(token)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Number of distinct words with at least one translation
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every (word, translation) pair, both directions included
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(word, translations)| {
            translations
                .iter()
                .map(move |translation| (word.as_str(), translation.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_bidirectional() {
        let table = SynonymTable::standard();
        assert_eq!(table.translations("белый"), ["білий".to_string()]);
        assert_eq!(table.translations("білий"), ["белый".to_string()]);
        assert_eq!(table.translations("графит"), ["графіт".to_string()]);
    }

    #[test]
    fn test_reflexive_pair_maps_to_itself() {
        let table = SynonymTable::standard();
        assert_eq!(table.translations("сонома"), ["сонома".to_string()]);
    }

    #[test]
    fn test_unknown_token_has_no_entry() {
        let table = SynonymTable::standard();
        assert!(table.translations("зебрано").is_empty());
        assert!(!table.contains("зебрано"));
    }

    #[test]
    fn test_lookup_is_exact_lowercase() {
        let table = SynonymTable::standard();
        assert!(table.translations("Белый").is_empty());
    }

    #[test]
    fn test_multi_valued_entries_do_not_duplicate() {
        let table = SynonymTable::from_pairs([
            ("сірий", "серый"),
            ("сірий", "серый"),
            ("сірий", "сивый"),
        ]);

        assert_eq!(
            table.translations("сірий"),
            ["серый".to_string(), "сивый".to_string()]
        );
        assert_eq!(table.translations("сивый"), ["сірий".to_string()]);
    }

    #[test]
    fn test_insert_lowercases_and_trims() {
        let table = SynonymTable::from_pairs([(" Горіх ", "ОРЕХ")]);
        assert_eq!(table.translations("орех"), ["горіх".to_string()]);
    }

    #[test]
    fn test_from_json_loads_pairs() {
        let table = SynonymTable::from_json_str(r#"[["вільха", "ольха"], ["ясен", "ясень"]]"#)
            .unwrap();

        assert_eq!(table.len(), 4);
        assert!(table.contains("ольха"));
    }

    #[test]
    fn test_from_json_rejects_malformed_entry() {
        let result = SynonymTable::from_json_str(r#"[["вільха"]]"#);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));

        let result = SynonymTable::from_json_str(r#"[["вільха", " "]]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_pairs_iterates_both_directions() {
        let table = SynonymTable::from_pairs([("біла", "белая")]);
        let mut pairs: Vec<(&str, &str)> = table.pairs().collect();
        pairs.sort();

        assert_eq!(pairs, vec![("белая", "біла"), ("біла", "белая")]);
    }
}
