//! Product identity resolution for the furniture catalog.
//!
//! Normalizes scraped product names, matches color labels against them across
//! Cyrillic/Latin confusion and Ukrainian/Russian spellings, and groups color
//! variants of one item into series.

pub mod modules;
pub mod shared;

pub use modules::identity::{group_series, matches, normalize, strip_known_colors};
