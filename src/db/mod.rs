pub mod catalog;
pub mod decode;
pub mod memory;
pub mod postgres;

pub use catalog::{fetch_data, CatalogSource};
pub use memory::InMemoryCatalog;
pub use postgres::{create_pool, PgCatalog};
