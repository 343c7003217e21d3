use serde::Serialize;
use strsim::jaro_winkler;

use super::normalizer::normalize;
use crate::modules::identity::domain::entities::ProductId;

/// A singleton whose base name is suspiciously close to a grouped one.
///
/// Usually a color phrase missing from the curated list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearMiss {
    pub product_id: ProductId,
    pub base_name: String,
    pub closest_base_name: String,
    pub similarity: f64,
}

/// Diagnostics for one grouping pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingReport {
    pub ruleset: String,
    pub input_count: usize,
    pub group_count: usize,
    pub grouped_record_count: usize,
    pub singleton_count: usize,
    pub unresolved_count: usize,
    pub reused_token_count: usize,
    pub minted_token_count: usize,
    pub pending_write_count: usize,
    pub near_misses: Vec<NearMiss>,
}

impl GroupingReport {
    /// Share of the batch that ended up in a series, in percent
    pub fn grouping_rate(&self) -> f32 {
        if self.input_count == 0 {
            return 0.0;
        }

        (self.grouped_record_count as f32 / self.input_count as f32) * 100.0
    }

    /// Generate a human-readable report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("=== Grouping Report ({}) ===", self.ruleset),
            format!("Input records: {}", self.input_count),
            format!(
                "Series: {} ({} records, {:.1}%)",
                self.group_count,
                self.grouped_record_count,
                self.grouping_rate()
            ),
            format!("Singletons: {}", self.singleton_count),
            format!("Unresolved (empty base name): {}", self.unresolved_count),
            format!(
                "Tokens: {} reused, {} minted",
                self.reused_token_count, self.minted_token_count
            ),
            format!("Pending writes: {}", self.pending_write_count),
        ];

        if !self.near_misses.is_empty() {
            lines.push(format!("Near misses: {}", self.near_misses.len()));
            for miss in &self.near_misses {
                lines.push(format!(
                    "  {} '{}' ~ '{}' ({:.3})",
                    miss.product_id, miss.base_name, miss.closest_base_name, miss.similarity
                ));
            }
        }

        lines.join("\n")
    }
}

/// For each singleton, the closest grouped base name at or above `threshold`.
///
/// Compared on normalized keys with Jaro-Winkler, so spacing, case and
/// homoglyph differences count as identical.
pub fn find_near_misses(
    singletons: &[(ProductId, String)],
    group_base_names: &[String],
    threshold: f64,
) -> Vec<NearMiss> {
    let group_keys: Vec<(String, &String)> = group_base_names
        .iter()
        .map(|base| (normalize(base), base))
        .collect();

    singletons
        .iter()
        .filter_map(|(product_id, base_name)| {
            let key = normalize(base_name);
            group_keys
                .iter()
                .map(|(group_key, group_base)| (jaro_winkler(&key, group_key), *group_base))
                .filter(|(similarity, _)| *similarity >= threshold)
                .max_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(similarity, closest)| NearMiss {
                    product_id: product_id.clone(),
                    base_name: base_name.clone(),
                    closest_base_name: closest.clone(),
                    similarity,
                })
        })
        .collect()
}
