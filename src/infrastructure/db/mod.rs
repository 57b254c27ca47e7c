mod location_store;
#[cfg(test)]
pub mod memory;
pub mod sqlite;

pub use location_store::LocationStore;
pub use sqlite::SqliteLocationStore;
