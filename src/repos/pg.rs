//! Postgres-backed store.
//!
//! Thin adapter from the `Store` trait onto the free functions in `food_repo` /
//! `order_repo`. Multi-step operations (upsert, order placement) run in one
//! transaction.
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::repos::error::RepoResult;
use crate::repos::store::{
    FoodRow, NewFood, NewOrder, OrderRow, PlaceOrderOutcome, Store, UpsertOutcome,
};
use crate::repos::{food_repo, order_repo};

const SCHEMA: &str = include_str!("../../db/schema.sql");

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create tables and indexes when missing.
    pub async fn migrate(&self) -> RepoResult<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn insert_food(&self, food: &NewFood) -> RepoResult<i64> {
        food_repo::insert(&self.pool, food).await
    }

    async fn get_food(&self, food_id: i64) -> RepoResult<Option<FoodRow>> {
        food_repo::get(&self.pool, food_id).await
    }

    async fn top_foods(&self, limit: i64) -> RepoResult<Vec<FoodRow>> {
        food_repo::top(&self.pool, limit).await
    }

    async fn search_foods(&self, search: Option<&str>) -> RepoResult<Vec<FoodRow>> {
        food_repo::search(&self.pool, search).await
    }

    async fn foods_by_owner(&self, email: &str) -> RepoResult<Vec<FoodRow>> {
        food_repo::list_by_owner(&self.pool, email).await
    }

    async fn upsert_food(&self, food_id: i64, food: &NewFood) -> RepoResult<UpsertOutcome> {
        let mut tx = self.pool.begin().await?;

        let outcome = if food_repo::update_owned(&mut *tx, food_id, food).await? {
            UpsertOutcome::Updated
        } else if food_repo::exists(&mut *tx, food_id).await? {
            UpsertOutcome::NotOwned
        } else if food_repo::insert_at(&mut *tx, food_id, food).await? {
            food_repo::advance_id_sequence(&mut *tx, food_id).await?;
            UpsertOutcome::Inserted(food_id)
        } else if food_repo::update_owned(&mut *tx, food_id, food).await? {
            // a concurrent upsert inserted the same id first
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::NotOwned
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn place_order(&self, order: &NewOrder) -> RepoResult<PlaceOrderOutcome> {
        let mut tx = self.pool.begin().await?;

        let Some(food) = food_repo::get_for_update(&mut *tx, order.food_id).await? else {
            return Ok(PlaceOrderOutcome::FoodNotFound);
        };
        if food.quantity < order.ordered_quantity {
            return Ok(PlaceOrderOutcome::InsufficientQuantity {
                available: food.quantity,
            });
        }

        food_repo::record_purchase(&mut *tx, food.food_id, order.ordered_quantity).await?;
        let row = order_repo::insert(&mut *tx, &food, order).await?;

        tx.commit().await?;
        Ok(PlaceOrderOutcome::Placed(row))
    }

    async fn orders_by_email(&self, email: &str) -> RepoResult<Vec<OrderRow>> {
        order_repo::list_by_email(&self.pool, email).await
    }

    async fn delete_order(&self, order_id: i64, email: &str) -> RepoResult<u64> {
        order_repo::delete_owned(&self.pool, order_id, email).await
    }
}
