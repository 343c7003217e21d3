pub mod color_phrase_stripper;
pub mod grouping_report;
pub mod normalizer;
pub mod series_grouper;
pub mod synonym_table;
pub mod uniqueness_suffix;
pub mod variant_matcher;

pub use color_phrase_stripper::{strip_known_colors, ColorPhraseStripper};
pub use grouping_report::{GroupingReport, NearMiss};
pub use normalizer::{fold_homoglyph, normalize, KeyNormalizer};
pub use series_grouper::{
    group_series, GroupingOutcome, SeriesAssignment, SeriesGroup, SeriesGrouper, MIN_SERIES_SIZE,
};
pub use synonym_table::SynonymTable;
pub use uniqueness_suffix::{RandomSuffix, SequenceSuffix, SuffixGenerator, TimeSeededSuffix};
pub use variant_matcher::{matches, VariantLink, VariantMatcher};
