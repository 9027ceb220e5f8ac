/**
 * Responsibility
 *  - PublicId<T> (core) と PublicFoodId (types) をまとめて公開する
 */
mod core;
mod types;

pub use self::core::PublicId;
pub use types::*;
