use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::modules::identity::domain::services::SynonymTable;
use crate::modules::identity::domain::{GroupingRuleset, ProductRecord};
use crate::shared::errors::{AppError, AppResult};

/// Loads batch inputs (records, rulesets, synonym pairs) from JSON files
pub struct JsonSource;

impl JsonSource {
    pub fn load_records(path: &Path) -> AppResult<Vec<ProductRecord>> {
        let raw = Self::read(path)?;
        let records: Vec<ProductRecord> = serde_json::from_str(&raw)?;
        debug!("Loaded {} records from {}", records.len(), path.display());

        let blank = records.iter().filter(|r| r.name.trim().is_empty()).count();
        if blank > 0 {
            warn!("{} records in {} have a blank name", blank, path.display());
        }

        Ok(records)
    }

    pub fn save_records(path: &Path, records: &[ProductRecord]) -> AppResult<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(path, json)?;
        debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    pub fn load_ruleset(path: &Path) -> AppResult<GroupingRuleset> {
        let raw = Self::read(path)?;
        GroupingRuleset::from_json_str(&raw).map_err(|err| match err {
            AppError::ValidationError(message) => AppError::ConfigError(format!(
                "Ruleset {} is invalid: {}",
                path.display(),
                message
            )),
            other => other,
        })
    }

    pub fn load_synonyms(path: &Path) -> AppResult<SynonymTable> {
        let raw = Self::read(path)?;
        let table = SynonymTable::from_json_str(&raw)?;
        debug!("Loaded {} synonym entries from {}", table.len(), path.display());
        Ok(table)
    }

    fn read(path: &Path) -> AppResult<String> {
        fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::NotFound(format!("Input file {} does not exist", path.display()))
            }
            _ => AppError::from(err),
        })
    }
}
