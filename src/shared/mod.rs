// Shared kernel: cross-module error and logging plumbing

pub mod errors; // Shared error types
pub mod utils; // Logging helpers

// Re-exports for convenience
pub use errors::{AppError, AppResult};
