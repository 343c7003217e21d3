pub mod product_record;

pub use product_record::{ColorVariant, ProductId, ProductRecord};
