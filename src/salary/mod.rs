pub mod aggregator;
#[cfg(test)]
pub mod memory;
pub mod mysql;
pub mod period;
pub mod store;
pub mod summary;
