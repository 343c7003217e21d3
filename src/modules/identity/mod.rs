pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{AssignmentMode, ProductFilter, ProductRepository, SeriesAssignmentService};
pub use domain::services::{
    group_series, matches, normalize, strip_known_colors, ColorPhraseStripper, GroupingOutcome,
    GroupingReport, SeriesGrouper, SynonymTable, VariantMatcher,
};
pub use domain::{GroupingRuleset, ProductId, ProductRecord, SeriesToken};
pub use infrastructure::{InMemoryProductRepository, JsonSource};
