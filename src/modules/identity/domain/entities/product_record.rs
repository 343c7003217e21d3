use serde::{Deserialize, Serialize};

use crate::modules::identity::domain::value_objects::SeriesToken;

/// Opaque, stable product identifier assigned by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One enumerated color option of a product or its series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorVariant {
    pub name: String,
}

impl ColorVariant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Catalog product as seen by the identity engine.
///
/// `name` is the source of truth for matching. `series` is written only by the
/// series grouper; `None` means the record is standalone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub series: Option<SeriesToken>,
    #[serde(default)]
    pub color_variants: Vec<ColorVariant>,
    /// Source collection label, used only to select batches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl ProductRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            series: None,
            color_variants: Vec::new(),
            collection: None,
        }
    }

    pub fn with_series(mut self, series: SeriesToken) -> Self {
        self.series = Some(series);
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn with_color_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color_variants = variants.into_iter().map(ColorVariant::new).collect();
        self
    }

    pub fn is_grouped(&self) -> bool {
        self.series.is_some()
    }

    /// Assign a series token, returning true if the stored value changed
    pub fn assign_series(&mut self, series: SeriesToken) -> bool {
        if self.series.as_ref() == Some(&series) {
            false
        } else {
            self.series = Some(series);
            true
        }
    }
}
