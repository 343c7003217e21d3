/// Test data factories using builder pattern
///
/// Provides convenient methods to create catalog batches with sensible defaults
use mebli_lib::modules::identity::domain::{
    GroupingRuleset, GroupingRulesetBuilder, ProductRecord, SeriesToken,
};

pub struct ProductFactory {
    id: String,
    name: String,
    collection: Option<String>,
    series: Option<SeriesToken>,
    color_variants: Vec<String>,
}

impl ProductFactory {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collection: Some("everest".to_string()),
            series: None,
            color_variants: Vec::new(),
        }
    }

    pub fn collection(mut self, collection: &str) -> Self {
        self.collection = Some(collection.to_string());
        self
    }

    pub fn series(mut self, series: &str) -> Self {
        self.series = Some(SeriesToken::new(series));
        self
    }

    pub fn color_variants(mut self, variants: &[&str]) -> Self {
        self.color_variants = variants.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn build(self) -> ProductRecord {
        let mut record = ProductRecord::new(self.id, self.name)
            .with_color_variants(self.color_variants);
        record.collection = self.collection;
        record.series = self.series;
        record
    }
}

/// Ruleset for the EVEREST wardrobe line used across integration tests
pub fn everest_ruleset() -> GroupingRuleset {
    GroupingRulesetBuilder::new("everest")
        .version(2)
        .phrases([
            "Дуб крафт золотий + Графіт",
            "Дуб крафт золотий + Білий",
            "Сонома + Білий",
            "Сонома + Графіт",
        ])
        .slug_exclusions(["EVEREST"])
        .replacement("EVERST", "EVEREST")
        .build()
        .expect("everest ruleset is valid")
}

/// Mixed batch: a chest of drawers in three colors, a wardrobe in two,
/// a lone pencil case and one record from another collection
pub fn everest_batch() -> Vec<ProductRecord> {
    let colors = ["Сонома + Білий", "Сонома + Графіт"];
    vec![
        ProductFactory::new("k1", "Комод EVEREST 1600 Сонома + Білий")
            .color_variants(&colors)
            .build(),
        ProductFactory::new("k2", "Комод EVEREST 1600 Сонома + Графіт")
            .color_variants(&colors)
            .build(),
        ProductFactory::new("k3", "Комод EVERST 1600 Дуб крафт золотий + Білий").build(),
        ProductFactory::new("w1", "Шафа EVEREST Соната 800 Сонома + Білий").build(),
        ProductFactory::new("w2", "Шафа EVEREST Соната 800 Сонома + Графіт").build(),
        ProductFactory::new("p1", "Пенал EVEREST 500 Сонома + Білий").build(),
        ProductFactory::new("v1", "Комод EVEREST 1600 Сонома + Білий")
            .collection("vika")
            .build(),
    ]
}
