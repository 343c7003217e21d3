use serde::{Deserialize, Serialize};

/// Opaque grouping key shared verbatim by every member of a series.
///
/// Not a foreign key: two unrelated groups carrying the same token are merged,
/// so tokens are built from a specific base-name slug plus a uniqueness suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesToken(String);

impl SeriesToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Build `{prefix}-{slug}-{suffix}`, skipping empty parts
    pub fn compose(prefix: &str, slug: &str, suffix: &str) -> Self {
        let token = [prefix, slug, suffix]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<&str>>()
            .join("-");
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
