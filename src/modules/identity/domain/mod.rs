pub mod entities;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{ColorVariant, ProductId, ProductRecord};
pub use value_objects::{GroupingRuleset, GroupingRulesetBuilder, SeriesToken, TextReplacement};
