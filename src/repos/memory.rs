//! In-memory implementation of the store.
//!
//! Used by tests and as the fallback when `DATABASE_URL` is not configured.
//! - **Not durable**: all state is lost on process restart.
//! - Reads share a read lock; every mutation takes the write lock, so
//!   `place_order` is atomic within the process.
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::repos::error::RepoResult;
use crate::repos::store::{
    FoodRow, NewFood, NewOrder, OrderRow, PlaceOrderOutcome, Store, UpsertOutcome,
};

#[derive(Debug, Default)]
struct Inner {
    foods: BTreeMap<i64, FoodRow>,
    orders: BTreeMap<i64, OrderRow>,
    last_food_id: i64,
    last_order_id: i64,
}

impl Inner {
    fn insert_food(&mut self, food: &NewFood) -> i64 {
        let food_id = self.last_food_id + 1;
        self.insert_food_at(food_id, food);
        food_id
    }

    // Upsert inserts under the addressed id; later ids continue after it.
    fn insert_food_at(&mut self, food_id: i64, food: &NewFood) {
        self.last_food_id = self.last_food_id.max(food_id);
        let now = Utc::now();

        self.foods.insert(
            food_id,
            FoodRow {
                food_id,
                name: food.name.clone(),
                image: food.image.clone(),
                category: food.category.clone(),
                quantity: food.quantity,
                price: food.price,
                origin: food.origin.clone(),
                description: food.description.clone(),
                add_by_name: food.add_by_name.clone(),
                add_by_email: food.add_by_email.clone(),
                purchase_count: 0,
                created_at: now,
                updated_at: now,
            },
        );
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert_food(&self, food: &NewFood) -> RepoResult<i64> {
        Ok(self.inner.write().await.insert_food(food))
    }

    async fn get_food(&self, food_id: i64) -> RepoResult<Option<FoodRow>> {
        Ok(self.inner.read().await.foods.get(&food_id).cloned())
    }

    async fn top_foods(&self, limit: i64) -> RepoResult<Vec<FoodRow>> {
        let inner = self.inner.read().await;
        let mut rows: Vec<FoodRow> = inner.foods.values().cloned().collect();
        // stable sort keeps id order among equal counts
        rows.sort_by(|a, b| b.purchase_count.cmp(&a.purchase_count));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn search_foods(&self, search: Option<&str>) -> RepoResult<Vec<FoodRow>> {
        let needle = search.map(str::to_lowercase);
        let inner = self.inner.read().await;
        let rows = inner
            .foods
            .values()
            .filter(|f| match &needle {
                Some(n) => f.name.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn foods_by_owner(&self, email: &str) -> RepoResult<Vec<FoodRow>> {
        let inner = self.inner.read().await;
        Ok(inner
            .foods
            .values()
            .filter(|f| f.add_by_email == email)
            .cloned()
            .collect())
    }

    async fn upsert_food(&self, food_id: i64, food: &NewFood) -> RepoResult<UpsertOutcome> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        match inner.foods.get_mut(&food_id) {
            Some(row) if row.add_by_email == food.add_by_email => {
                row.name = food.name.clone();
                row.image = food.image.clone();
                row.category = food.category.clone();
                row.quantity = food.quantity;
                row.price = food.price;
                row.origin = food.origin.clone();
                row.description = food.description.clone();
                row.add_by_name = food.add_by_name.clone();
                row.updated_at = Utc::now();
                Ok(UpsertOutcome::Updated)
            }
            Some(_) => Ok(UpsertOutcome::NotOwned),
            None => {
                inner.insert_food_at(food_id, food);
                Ok(UpsertOutcome::Inserted(food_id))
            }
        }
    }

    async fn place_order(&self, order: &NewOrder) -> RepoResult<PlaceOrderOutcome> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        let Some(food) = inner.foods.get_mut(&order.food_id) else {
            return Ok(PlaceOrderOutcome::FoodNotFound);
        };
        if food.quantity < order.ordered_quantity {
            return Ok(PlaceOrderOutcome::InsufficientQuantity {
                available: food.quantity,
            });
        }

        let now = Utc::now();
        food.quantity -= order.ordered_quantity;
        food.purchase_count += 1;
        food.updated_at = now;

        let food = food.clone();
        inner.last_order_id += 1;
        let row = OrderRow {
            order_id: inner.last_order_id,
            food_id: food.food_id,
            food_name: food.name,
            food_image: food.image,
            price: food.price,
            ordered_quantity: order.ordered_quantity,
            email: order.email.clone(),
            buyer_name: order.buyer_name.clone(),
            ordered_at: now,
        };
        inner.orders.insert(row.order_id, row.clone());

        Ok(PlaceOrderOutcome::Placed(row))
    }

    async fn orders_by_email(&self, email: &str) -> RepoResult<Vec<OrderRow>> {
        let inner = self.inner.read().await;
        // newest first
        Ok(inner
            .orders
            .values()
            .rev()
            .filter(|o| o.email == email)
            .cloned()
            .collect())
    }

    async fn delete_order(&self, order_id: i64, email: &str) -> RepoResult<u64> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .orders
            .get(&order_id)
            .is_some_and(|o| o.email == email);
        if !owned {
            return Ok(0);
        }
        inner.orders.remove(&order_id);
        Ok(1)
    }
}
