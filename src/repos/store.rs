//! Store interface used by the handlers (foods + orders).
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::repos::error::RepoResult;

/// Number of foods on the home page.
pub const TOP_FOODS_LIMIT: i64 = 6;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FoodRow {
    #[sqlx(rename = "foodId")]
    pub food_id: i64,

    pub name: String,
    pub image: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    pub origin: String,
    pub description: String,

    #[sqlx(rename = "addByName")]
    pub add_by_name: String,
    #[sqlx(rename = "addByEmail")]
    pub add_by_email: String,

    // how many orders were placed against this food
    #[sqlx(rename = "purchaseCount")]
    pub purchase_count: i64,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of a food. `add_by_email` is the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub name: String,
    pub image: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    pub origin: String,
    pub description: String,
    pub add_by_name: String,
    pub add_by_email: String,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OrderRow {
    #[sqlx(rename = "orderId")]
    pub order_id: i64,
    #[sqlx(rename = "foodId")]
    pub food_id: i64,
    #[sqlx(rename = "foodName")]
    pub food_name: String,
    #[sqlx(rename = "foodImage")]
    pub food_image: String,
    pub price: f64,
    #[sqlx(rename = "orderedQuantity")]
    pub ordered_quantity: i64,
    pub email: String,
    #[sqlx(rename = "buyerName")]
    pub buyer_name: String,
    #[sqlx(rename = "orderedAt")]
    pub ordered_at: DateTime<Utc>,
}

/// An order as requested by the buyer. Name/image/price are copied from the food.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub food_id: i64,
    pub ordered_quantity: i64,
    pub email: String,
    pub buyer_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Updated,
    Inserted(i64),
    // the id exists but belongs to another owner
    NotOwned,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOrderOutcome {
    Placed(OrderRow),
    FoodNotFound,
    InsufficientQuantity { available: i64 },
}

/// Persistence for foods and orders.
///
/// Implementations must be safe to share across requests (`Arc<dyn Store>`).
/// Every method is a single logical store operation; `place_order` is atomic
/// (stock decrement + order insert).
#[async_trait]
pub trait Store: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn insert_food(&self, food: &NewFood) -> RepoResult<i64>;

    async fn get_food(&self, food_id: i64) -> RepoResult<Option<FoodRow>>;

    // Most ordered first.
    async fn top_foods(&self, limit: i64) -> RepoResult<Vec<FoodRow>>;

    // Case-insensitive substring match on name. `None` lists everything.
    async fn search_foods(&self, search: Option<&str>) -> RepoResult<Vec<FoodRow>>;

    async fn foods_by_owner(&self, email: &str) -> RepoResult<Vec<FoodRow>>;

    // Update the food if `food.add_by_email` owns it, insert it under `food_id` if the id is unknown.
    async fn upsert_food(&self, food_id: i64, food: &NewFood) -> RepoResult<UpsertOutcome>;

    // `quantity -= ordered_quantity`, `purchase_count += 1`, insert the order.
    async fn place_order(&self, order: &NewOrder) -> RepoResult<PlaceOrderOutcome>;

    async fn orders_by_email(&self, email: &str) -> RepoResult<Vec<OrderRow>>;

    // Returns the number of deleted orders (0 or 1).
    async fn delete_order(&self, order_id: i64, email: &str) -> RepoResult<u64>;
}
