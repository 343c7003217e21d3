pub mod in_memory_repository;
pub mod json_source;

pub use in_memory_repository::InMemoryProductRepository;
pub use json_source::JsonSource;
