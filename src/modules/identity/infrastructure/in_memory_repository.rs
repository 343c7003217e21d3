use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::modules::identity::application::ports::{ProductFilter, ProductRepository};
use crate::modules::identity::domain::{ProductId, ProductRecord, SeriesToken};
use crate::shared::errors::{AppError, AppResult};

/// Product storage held in memory, used by batch jobs working off JSON exports
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    records: Arc<DashMap<ProductId, ProductRecord>>,
    // Load order, so batches come back the way they were exported
    order: Arc<DashMap<ProductId, usize>>,
    next_position: Arc<AtomicUsize>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        let repository = Self::new();
        for record in records {
            repository.insert(record);
        }
        info!("In-memory repository loaded with {} products", repository.len());
        repository
    }

    /// Insert or replace a record; replacing keeps its original position
    pub fn insert(&self, record: ProductRecord) {
        // Position is drawn under the entry guard, only for unseen ids
        self.order
            .entry(record.id.clone())
            .or_insert_with(|| self.next_position.fetch_add(1, Ordering::Relaxed));
        self.records.insert(record.id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record in load order
    pub fn snapshot(&self) -> Vec<ProductRecord> {
        self.collect_sorted(|_| true)
    }

    fn collect_sorted(&self, keep: impl Fn(&ProductRecord) -> bool) -> Vec<ProductRecord> {
        let mut selected: Vec<(usize, ProductRecord)> = self
            .records
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| {
                let position = self.order.get(entry.key()).map(|p| *p).unwrap_or(usize::MAX);
                (position, entry.value().clone())
            })
            .collect();

        selected.sort_by_key(|(position, _)| *position);
        selected.into_iter().map(|(_, record)| record).collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_filter(&self, filter: &ProductFilter) -> AppResult<Vec<ProductRecord>> {
        let records = self.collect_sorted(|record| filter.accepts(record));
        debug!("find_by_filter {:?} -> {} records", filter, records.len());
        Ok(records)
    }

    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<ProductRecord>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_series(&self, series: &SeriesToken) -> AppResult<Vec<ProductRecord>> {
        Ok(self.collect_sorted(|record| record.series.as_ref() == Some(series)))
    }

    async fn save_series(&self, id: &ProductId, series: &SeriesToken) -> AppResult<()> {
        let mut entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))?;

        entry.assign_series(series.clone());
        debug!("Series of {} set to {}", id, series);
        Ok(())
    }
}
