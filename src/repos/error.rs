/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - 「見つからない」「在庫不足」などは Outcome 型で返し、ここには障害だけを置く
 */
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
}
