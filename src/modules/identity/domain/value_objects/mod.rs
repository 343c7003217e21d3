pub mod grouping_ruleset;
pub mod series_token;

pub use grouping_ruleset::{GroupingRuleset, GroupingRulesetBuilder, TextReplacement};
pub use series_token::SeriesToken;
