use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mebli_lib::modules::identity::domain::services::{TimeSeededSuffix, VariantMatcher};
use mebli_lib::modules::identity::{
    AssignmentMode, ColorPhraseStripper, InMemoryProductRepository, JsonSource, ProductFilter,
    SeriesAssignmentService,
};
use mebli_lib::shared::utils::init_logger;

#[derive(Parser, Debug)]
#[command(name = "mebli", about = "Product identity tools for the furniture catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical comparison key of a string
    Normalize { text: String },

    /// Check whether a color label appears in a product name
    Match {
        #[arg(long)]
        name: String,
        #[arg(long)]
        label: String,
        /// JSON file with [["uk", "ru"], ...] pairs replacing the embedded table
        #[arg(long)]
        synonyms: Option<PathBuf>,
    },

    /// Print the base name left after stripping the ruleset's color phrases
    Strip {
        #[arg(long)]
        name: String,
        #[arg(long)]
        ruleset: PathBuf,
    },

    /// Group a JSON export of product records into series
    Group {
        #[arg(long)]
        records: PathBuf,
        #[arg(long)]
        ruleset: PathBuf,
        /// Only records from this collection
        #[arg(long)]
        collection: Option<String>,
        /// Persist assignments (default is a dry run)
        #[arg(long)]
        apply: bool,
        /// Where to write updated records; defaults to the input file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Command::Normalize { text } => {
            println!("{}", mebli_lib::normalize(&text));
        }
        Command::Match {
            name,
            label,
            synonyms,
        } => {
            let matcher = match synonyms {
                Some(path) => VariantMatcher::new(Arc::new(
                    JsonSource::load_synonyms(&path)
                        .with_context(|| format!("loading synonyms from {}", path.display()))?,
                )),
                None => VariantMatcher::standard(),
            };
            println!("{}", matcher.matches(&name, &label));
        }
        Command::Strip { name, ruleset } => {
            let ruleset = JsonSource::load_ruleset(&ruleset).context("loading ruleset")?;
            let stripper =
                ColorPhraseStripper::new(&ruleset.phrases).context("compiling color phrases")?;
            println!("{}", stripper.strip(&name));
        }
        Command::Group {
            records,
            ruleset,
            collection,
            apply,
            output,
        } => {
            let ruleset_config = JsonSource::load_ruleset(&ruleset).context("loading ruleset")?;
            let batch = JsonSource::load_records(&records)
                .with_context(|| format!("loading records from {}", records.display()))?;

            let repository = Arc::new(InMemoryProductRepository::from_records(batch));
            let service = SeriesAssignmentService::new(
                repository.clone(),
                VariantMatcher::standard(),
                Arc::new(TimeSeededSuffix::new()),
            );

            let filter = ProductFilter {
                collection,
                name_contains: None,
            };
            let mode = if apply {
                AssignmentMode::Apply
            } else {
                AssignmentMode::DryRun
            };

            let outcome = service
                .assign_series(&filter, &ruleset_config, mode)
                .await
                .context("grouping pass failed")?;

            eprintln!("{}", outcome.report.summary());
            println!("{}", serde_json::to_string_pretty(&outcome)?);

            if apply {
                let target = output.unwrap_or(records);
                JsonSource::save_records(&target, &repository.snapshot())
                    .with_context(|| format!("writing records to {}", target.display()))?;
                log::info!("Updated records written to {}", target.display());
            }
        }
    }

    Ok(())
}
