pub mod ports;
pub mod service;

pub use ports::{ProductFilter, ProductRepository};
pub use service::{AssignmentMode, SeriesAssignmentService};
