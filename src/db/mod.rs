pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod repo;
pub mod snapshots;

pub use pool::DbPool;
pub use repo::SqliteStore;
