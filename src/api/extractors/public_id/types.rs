/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - decode ロジックや extractor 実装は core.rs 側
 */
use super::core::PublicId;

// foods
pub enum FoodTag {}
pub type PublicFoodId = PublicId<FoodTag>;
