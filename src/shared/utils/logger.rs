use log::{debug, error, info, warn};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("mebli_lib", log::LevelFilter::Debug) // More verbose for our crate
            .filter_module("mebli", log::LevelFilter::Debug)
            .parse_default_env() // RUST_LOG wins over the defaults above
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        info!("Logging system initialized");
    });
}

/// Macro for structured logging with context
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log repository operations
    pub fn repository_operation(operation: &str, target: &str, affected: Option<usize>) {
        match affected {
            Some(count) => info!("Repo: {} on {} affected {} records", operation, target, count),
            None => debug!("Repo: Starting {} on {}", operation, target),
        }
    }

    /// Log a finished grouping pass
    pub fn grouping_pass(ruleset: &str, input: usize, groups: usize, singletons: usize) {
        info!(
            "Grouping: ruleset '{}' partitioned {} records into {} series ({} singletons)",
            ruleset, input, groups, singletons
        );
        if input > 0 && singletons * 2 > input {
            warn!(
                "Grouping: more than half of the batch stayed ungrouped, check the phrase list for '{}'",
                ruleset
            );
        }
    }

    /// Log variant lookups
    pub fn variant_lookup(label: &str, candidates: usize, matched: Option<&str>) {
        match matched {
            Some(id) => debug!("Variant: '{}' resolved to {} among {} candidates", label, id, candidates),
            None => debug!("Variant: '{}' matched none of {} candidates", label, candidates),
        }
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.start.elapsed().as_millis() as u64;
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}
