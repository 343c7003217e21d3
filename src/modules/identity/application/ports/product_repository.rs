use async_trait::async_trait;

use crate::modules::identity::domain::{ProductId, ProductRecord, SeriesToken};
use crate::shared::errors::AppResult;

/// Port (interface) for the catalog's product storage following Hexagonal Architecture.
/// The identity engine only reads batches and writes `(id, series)` pairs back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Records matching the filter, in storage order
    async fn find_by_filter(&self, filter: &ProductFilter) -> AppResult<Vec<ProductRecord>>;

    /// Find a product by ID
    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<ProductRecord>>;

    /// All records carrying the given series token
    async fn find_by_series(&self, series: &SeriesToken) -> AppResult<Vec<ProductRecord>>;

    /// Persist a series assignment for one record
    async fn save_series(&self, id: &ProductId, series: &SeriesToken) -> AppResult<()>;
}

/// Batch selection criteria; empty filter selects everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub collection: Option<String>,
    pub name_contains: Option<String>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: Some(collection.into()),
            name_contains: None,
        }
    }

    pub fn with_name_containing(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }

    /// In-process evaluation, for adapters that cannot push the filter down
    pub fn accepts(&self, record: &ProductRecord) -> bool {
        let collection_ok = match &self.collection {
            Some(wanted) => record.collection.as_deref() == Some(wanted.as_str()),
            None => true,
        };

        let name_ok = match &self.name_contains {
            Some(fragment) => record
                .name
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
            None => true,
        };

        collection_ok && name_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_accepts_everything() {
        let record = ProductRecord::new("1", "Комод 1600");
        assert!(ProductFilter::all().accepts(&record));
    }

    #[test]
    fn test_collection_filter() {
        let record = ProductRecord::new("1", "Комод 1600").with_collection("everest");

        assert!(ProductFilter::collection("everest").accepts(&record));
        assert!(!ProductFilter::collection("vika").accepts(&record));
        assert!(!ProductFilter::collection("everest").accepts(&ProductRecord::new("2", "Комод")));
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let record = ProductRecord::new("1", "Шафа Соната 800");
        let filter = ProductFilter::all().with_name_containing("СОНАТА");
        assert!(filter.accepts(&record));
    }
}
