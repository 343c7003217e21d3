use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::try_join_all;

use super::ports::product_repository::{ProductFilter, ProductRepository};
use crate::modules::identity::domain::services::{
    GroupingOutcome, SeriesGrouper, SuffixGenerator, TimeSeededSuffix, VariantLink, VariantMatcher,
};
use crate::modules::identity::domain::{GroupingRuleset, ProductId, ProductRecord, SeriesToken};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_debug, log_info, log_warn};

/// Whether a grouping pass persists its assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentMode {
    DryRun,
    Apply,
}

/// Runs grouping passes against the catalog and answers variant lookups
pub struct SeriesAssignmentService {
    repository: Arc<dyn ProductRepository>,
    matcher: VariantMatcher,
    suffixes: Arc<dyn SuffixGenerator>,
}

impl SeriesAssignmentService {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        matcher: VariantMatcher,
        suffixes: Arc<dyn SuffixGenerator>,
    ) -> Self {
        Self {
            repository,
            matcher,
            suffixes,
        }
    }

    /// Standard synonym table and time-seeded suffixes
    pub fn with_defaults(repository: Arc<dyn ProductRepository>) -> Self {
        Self::new(
            repository,
            VariantMatcher::standard(),
            Arc::new(TimeSeededSuffix::new()),
        )
    }

    /// Group one batch and, in `Apply` mode, persist the changed assignments.
    ///
    /// The whole batch is read before any token is decided; writes go out
    /// concurrently since members of one group all receive the same token.
    pub async fn assign_series(
        &self,
        filter: &ProductFilter,
        ruleset: &GroupingRuleset,
        mode: AssignmentMode,
    ) -> AppResult<GroupingOutcome> {
        let timer = TimedOperation::new(&format!("series assignment {}", ruleset.label()));
        let grouper = SeriesGrouper::new(ruleset.clone(), Arc::clone(&self.suffixes))?;

        LogContext::repository_operation("find_by_filter", &ruleset.label(), None);
        let records = self.repository.find_by_filter(filter).await?;

        let external_holders = self.external_holders(&records).await?;
        let outcome = grouper.group_with_external_holders(&records, &external_holders);
        LogContext::grouping_pass(
            &outcome.report.ruleset,
            outcome.report.input_count,
            outcome.report.group_count,
            outcome.report.singleton_count,
        );
        log_debug!("{}", outcome.report.summary());
        for miss in &outcome.report.near_misses {
            log_warn!(
                "{} '{}' stayed alone but resembles series '{}' ({:.3}), check the phrase list",
                miss.product_id,
                miss.base_name,
                miss.closest_base_name,
                miss.similarity
            );
        }

        if mode == AssignmentMode::Apply && !outcome.pending_writes.is_empty() {
            let writes = outcome
                .pending_writes
                .iter()
                .map(|write| self.repository.save_series(&write.product_id, &write.series));
            if let Err(err) = try_join_all(writes).await {
                LogContext::error_with_context(&err, "Persisting series assignments failed");
                return Err(err);
            }

            LogContext::repository_operation(
                "save_series",
                &ruleset.label(),
                Some(outcome.pending_writes.len()),
            );
        } else if mode == AssignmentMode::DryRun {
            log_info!(
                "Dry run: {} series writes not persisted",
                outcome.pending_writes.len()
            );
        }

        timer.finish_with_info(&format!("{} records", outcome.report.input_count));
        Ok(outcome)
    }

    /// The product or series sibling whose name carries the requested color
    pub async fn resolve_variant(
        &self,
        product_id: &ProductId,
        label: &str,
    ) -> AppResult<Option<ProductRecord>> {
        let product = self.load_product(product_id).await?;
        let candidates = self.siblings_of(product).await?;

        let found = self.matcher.find_sibling(label, &candidates).cloned();
        LogContext::variant_lookup(
            label,
            candidates.len(),
            found.as_ref().map(|p| p.id.as_str()),
        );

        Ok(found)
    }

    /// Every enumerated color of the product linked to the sibling carrying it
    pub async fn variant_links(&self, product_id: &ProductId) -> AppResult<Vec<VariantLink>> {
        let product = self.load_product(product_id).await?;
        let candidates = self.siblings_of(product).await?;

        // siblings_of always puts the product first
        Ok(self
            .matcher
            .link_color_variants(&candidates[0], &candidates))
    }

    /// Per token carried in the batch, how many records outside the batch
    /// also carry it. Tokens held only inside the batch are left out.
    async fn external_holders(
        &self,
        records: &[ProductRecord],
    ) -> AppResult<HashMap<SeriesToken, usize>> {
        let batch_ids: HashSet<&ProductId> = records.iter().map(|record| &record.id).collect();

        let mut tokens: Vec<&SeriesToken> = Vec::new();
        for series in records.iter().filter_map(|record| record.series.as_ref()) {
            if !tokens.contains(&series) {
                tokens.push(series);
            }
        }

        let lookups = tokens
            .iter()
            .map(|token| self.repository.find_by_series(token));
        let holders = try_join_all(lookups).await?;

        Ok(tokens
            .into_iter()
            .zip(holders)
            .filter_map(|(token, holders)| {
                let outside = holders
                    .iter()
                    .filter(|record| !batch_ids.contains(&record.id))
                    .count();
                (outside > 0).then(|| (token.clone(), outside))
            })
            .collect())
    }

    async fn load_product(&self, product_id: &ProductId) -> AppResult<ProductRecord> {
        self.repository
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", product_id)))
    }

    /// The product followed by the other members of its series
    async fn siblings_of(&self, product: ProductRecord) -> AppResult<Vec<ProductRecord>> {
        let others = match &product.series {
            Some(series) => self.repository.find_by_series(series).await?,
            None => Vec::new(),
        };

        let mut candidates = Vec::with_capacity(others.len() + 1);
        let own_id = product.id.clone();
        candidates.push(product);
        candidates.extend(others.into_iter().filter(|record| record.id != own_id));

        Ok(candidates)
    }
}
