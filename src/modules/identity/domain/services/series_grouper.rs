use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use super::color_phrase_stripper::ColorPhraseStripper;
use super::grouping_report::{find_near_misses, GroupingReport};
use super::uniqueness_suffix::{SuffixGenerator, TimeSeededSuffix};
use crate::modules::identity::domain::entities::{ProductId, ProductRecord};
use crate::modules::identity::domain::value_objects::{GroupingRuleset, SeriesToken};
use crate::shared::errors::AppResult;

/// Groups smaller than this stay ungrouped
pub const MIN_SERIES_SIZE: usize = 2;

const MAX_MINT_ATTEMPTS: usize = 32;

/// One multi-member series found in the batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesGroup {
    pub series: SeriesToken,
    pub base_name: String,
    pub member_ids: Vec<ProductId>,
    /// True when the token was already carried by members of the group
    pub reused: bool,
}

/// A `(id, series)` pair to persist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesAssignment {
    pub product_id: ProductId,
    pub series: SeriesToken,
}

/// Result of one grouping pass. Nothing is written until the caller applies it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingOutcome {
    pub groups: Vec<SeriesGroup>,
    pub singletons: Vec<ProductId>,
    pub unresolved: Vec<ProductId>,
    pub pending_writes: Vec<SeriesAssignment>,
    pub report: GroupingReport,
}

impl GroupingOutcome {
    /// Series token -> member ids
    pub fn series_map(&self) -> BTreeMap<SeriesToken, Vec<ProductId>> {
        self.groups
            .iter()
            .map(|group| (group.series.clone(), group.member_ids.clone()))
            .collect()
    }

    pub fn series_of(&self, product_id: &ProductId) -> Option<&SeriesToken> {
        self.groups
            .iter()
            .find(|group| group.member_ids.contains(product_id))
            .map(|group| &group.series)
    }

    /// Write assigned tokens into `records`, returning how many changed
    pub fn apply_to(&self, records: &mut [ProductRecord]) -> usize {
        let assigned: HashMap<&ProductId, &SeriesToken> = self
            .groups
            .iter()
            .flat_map(|group| group.member_ids.iter().map(move |id| (id, &group.series)))
            .collect();

        records
            .iter_mut()
            .filter_map(|record| {
                let series = assigned.get(&record.id)?;
                Some(record.assign_series((*series).clone()))
            })
            .filter(|changed| *changed)
            .count()
    }
}

/// Clusters product records by base name and assigns series tokens.
///
/// Batch, not streaming: membership is decided over the whole input before
/// any token is chosen.
pub struct SeriesGrouper {
    ruleset: GroupingRuleset,
    stripper: ColorPhraseStripper,
    slug_exclusions: Vec<Vec<String>>,
    suffixes: Arc<dyn SuffixGenerator>,
}

impl SeriesGrouper {
    pub fn new(ruleset: GroupingRuleset, suffixes: Arc<dyn SuffixGenerator>) -> AppResult<Self> {
        ruleset.validate()?;

        let stripper = ColorPhraseStripper::new(&ruleset.phrases)?;
        let slug_exclusions = ruleset
            .slug_exclusions
            .iter()
            .map(|word| slug_words(word))
            .filter(|words| !words.is_empty())
            .collect();

        Ok(Self {
            ruleset,
            stripper,
            slug_exclusions,
            suffixes,
        })
    }

    /// Grouper minting time-seeded suffixes
    pub fn with_default_suffixes(ruleset: GroupingRuleset) -> AppResult<Self> {
        Self::new(ruleset, Arc::new(TimeSeededSuffix::new()))
    }

    pub fn ruleset(&self) -> &GroupingRuleset {
        &self.ruleset
    }

    /// Name after the ruleset's replacements and color stripping
    pub fn base_name(&self, name: &str) -> String {
        let unified = self
            .ruleset
            .replacements
            .iter()
            .fold(name.to_string(), |acc, rule| acc.replace(&rule.from, &rule.to));

        self.stripper.strip(&unified)
    }

    /// Lowercase, exclusion words removed, non-alphanumeric runs as single hyphens
    pub fn slug(&self, base_name: &str) -> String {
        let words = slug_words(base_name);
        let mut kept: Vec<&str> = Vec::with_capacity(words.len());
        let mut i = 0;

        'outer: while i < words.len() {
            for exclusion in &self.slug_exclusions {
                let end = i + exclusion.len();
                if end <= words.len() && words[i..end] == exclusion[..] {
                    i = end;
                    continue 'outer;
                }
            }
            kept.push(&words[i]);
            i += 1;
        }

        kept.join("-")
    }

    pub fn group(&self, records: &[ProductRecord]) -> GroupingOutcome {
        self.group_with_external_holders(records, &HashMap::new())
    }

    /// Group a batch that is a slice of a larger catalog.
    ///
    /// `external_holders` counts, per token, the records outside `records`
    /// that carry it. Such tokens are never reused and never minted.
    pub fn group_with_external_holders(
        &self,
        records: &[ProductRecord],
        external_holders: &HashMap<SeriesToken, usize>,
    ) -> GroupingOutcome {
        let mut order: Vec<(String, Vec<usize>)> = Vec::new();
        let mut index_by_base: HashMap<String, usize> = HashMap::new();
        let mut unresolved = Vec::new();

        for (position, record) in records.iter().enumerate() {
            let base = self.base_name(&record.name);
            if base.is_empty() {
                log::debug!("'{}' ({}) has no base name left", record.name, record.id);
                unresolved.push(record.id.clone());
                continue;
            }

            match index_by_base.get(&base) {
                Some(&slot) => order[slot].1.push(position),
                None => {
                    index_by_base.insert(base.clone(), order.len());
                    order.push((base, vec![position]));
                }
            }
        }

        let mut holders: HashMap<&SeriesToken, usize> = HashMap::new();
        for series in records.iter().filter_map(|r| r.series.as_ref()) {
            *holders.entry(series).or_default() += 1;
        }
        let taken = TakenTokens {
            in_batch: &holders,
            outside: external_holders,
        };

        let mut claimed: HashSet<SeriesToken> = HashSet::new();
        let mut groups = Vec::new();
        let mut singletons = Vec::new();
        let mut singleton_bases = Vec::new();
        let mut pending_writes = Vec::new();

        for (base, members) in &order {
            if members.len() < MIN_SERIES_SIZE {
                for &position in members {
                    singletons.push(records[position].id.clone());
                    singleton_bases.push((records[position].id.clone(), base.clone()));
                }
                continue;
            }

            let (series, reused) = match self.reusable_token(records, members, &taken, &claimed) {
                Some(existing) => (existing, true),
                None => (self.mint_token(base, &taken, &claimed), false),
            };
            claimed.insert(series.clone());

            for &position in members {
                let record = &records[position];
                if record.series.as_ref() != Some(&series) {
                    pending_writes.push(SeriesAssignment {
                        product_id: record.id.clone(),
                        series: series.clone(),
                    });
                }
            }

            groups.push(SeriesGroup {
                series,
                base_name: base.clone(),
                member_ids: members.iter().map(|&p| records[p].id.clone()).collect(),
                reused,
            });
        }

        let group_bases: Vec<String> = groups.iter().map(|g| g.base_name.clone()).collect();
        let near_misses = find_near_misses(
            &singleton_bases,
            &group_bases,
            self.ruleset.near_miss_threshold,
        );

        let report = GroupingReport {
            ruleset: self.ruleset.label(),
            input_count: records.len(),
            group_count: groups.len(),
            grouped_record_count: groups.iter().map(|g| g.member_ids.len()).sum(),
            singleton_count: singletons.len(),
            unresolved_count: unresolved.len(),
            reused_token_count: groups.iter().filter(|g| g.reused).count(),
            minted_token_count: groups.iter().filter(|g| !g.reused).count(),
            pending_write_count: pending_writes.len(),
            near_misses,
        };

        GroupingOutcome {
            groups,
            singletons,
            unresolved,
            pending_writes,
            report,
        }
    }

    /// Most common token among the members, ties going to the earliest seen.
    ///
    /// Only tokens held exclusively by this group's members qualify, and a
    /// token already claimed earlier in the run is skipped.
    fn reusable_token(
        &self,
        records: &[ProductRecord],
        members: &[usize],
        taken: &TakenTokens<'_>,
        claimed: &HashSet<SeriesToken>,
    ) -> Option<SeriesToken> {
        let mut counts: Vec<(&SeriesToken, usize)> = Vec::new();
        for series in members.iter().filter_map(|&p| records[p].series.as_ref()) {
            match counts.iter_mut().find(|(token, _)| *token == series) {
                Some((_, count)) => *count += 1,
                None => counts.push((series, 1)),
            }
        }

        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        counts
            .into_iter()
            .find(|(token, count)| {
                let exclusive = taken.in_batch.get(token).copied() == Some(*count)
                    && !taken.held_outside(token);
                if !exclusive {
                    log::debug!("Series token '{}' is shared outside the group", token);
                }
                exclusive && !claimed.contains(*token)
            })
            .map(|(token, _)| token.clone())
    }

    fn mint_token(
        &self,
        base_name: &str,
        taken: &TakenTokens<'_>,
        claimed: &HashSet<SeriesToken>,
    ) -> SeriesToken {
        let slug = self.slug(base_name);
        let collides = |token: &SeriesToken| taken.contains(token) || claimed.contains(token);

        let mut token = SeriesToken::compose(
            &self.ruleset.collection_prefix,
            &slug,
            &self.suffixes.next_suffix(),
        );

        for _ in 1..MAX_MINT_ATTEMPTS {
            if !collides(&token) {
                return token;
            }
            log::debug!("Series token '{}' already taken, drawing a new suffix", token);
            token = SeriesToken::compose(
                &self.ruleset.collection_prefix,
                &slug,
                &self.suffixes.next_suffix(),
            );
        }

        if collides(&token) {
            log::warn!(
                "{} suffix generator kept colliding after {} attempts, '{}' may merge series",
                self.suffixes.name(),
                MAX_MINT_ATTEMPTS,
                token
            );
        }

        token
    }
}

/// Tokens already carried by records, inside the batch and beyond it
struct TakenTokens<'a> {
    in_batch: &'a HashMap<&'a SeriesToken, usize>,
    outside: &'a HashMap<SeriesToken, usize>,
}

impl TakenTokens<'_> {
    fn held_outside(&self, token: &SeriesToken) -> bool {
        self.outside.get(token).is_some_and(|count| *count > 0)
    }

    fn contains(&self, token: &SeriesToken) -> bool {
        self.in_batch.contains_key(token) || self.held_outside(token)
    }
}

fn slug_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// One-shot grouping with time-seeded token suffixes
pub fn group_series(records: &[ProductRecord], ruleset: &GroupingRuleset) -> AppResult<GroupingOutcome> {
    let grouper = SeriesGrouper::with_default_suffixes(ruleset.clone())?;
    Ok(grouper.group(records))
}
