/*
 * Responsibility
 * - store の trait と実装 (Postgres / in-memory) をまとめる
 */
pub mod error;
pub mod food_repo;
pub mod memory;
pub mod order_repo;
pub mod pg;
pub mod store;

pub use memory::MemoryStore;
pub use pg::PgStore;
pub use store::Store;
