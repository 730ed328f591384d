pub mod store;
pub use store::CatalogStore;
pub mod pg_store;
pub use pg_store::PgCatalogStore;

#[cfg(test)]
pub mod mem_store;
