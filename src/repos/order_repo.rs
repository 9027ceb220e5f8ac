/*
 * Responsibility
 * - orders テーブル向け SQLx 操作
 * - 削除は必ず email でも絞る (他人の注文は消せない)
 */
use sqlx::postgres::PgExecutor;

use crate::repos::error::RepoResult;
use crate::repos::store::{FoodRow, NewOrder, OrderRow};

pub async fn insert<'e>(
    db: impl PgExecutor<'e>,
    food: &FoodRow,
    order: &NewOrder,
) -> RepoResult<OrderRow> {
    let row = sqlx::query_as::<_, OrderRow>(
        r#"
        INSERT INTO orders (
            "foodId", "foodName", "foodImage", price, "orderedQuantity", email, "buyerName"
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING
            "orderId", "foodId", "foodName", "foodImage", price, "orderedQuantity",
            email, "buyerName", "orderedAt"
        "#,
    )
    .bind(food.food_id)
    .bind(&food.name)
    .bind(&food.image)
    .bind(food.price)
    .bind(order.ordered_quantity)
    .bind(&order.email)
    .bind(&order.buyer_name)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn list_by_email<'e>(db: impl PgExecutor<'e>, email: &str) -> RepoResult<Vec<OrderRow>> {
    let rows = sqlx::query_as::<_, OrderRow>(
        r#"
        SELECT
            "orderId", "foodId", "foodName", "foodImage", price, "orderedQuantity",
            email, "buyerName", "orderedAt"
        FROM orders
        WHERE email = $1
        ORDER BY "orderedAt" DESC, "orderId" DESC
        "#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn delete_owned<'e>(
    db: impl PgExecutor<'e>,
    order_id: i64,
    email: &str,
) -> RepoResult<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM orders
        WHERE "orderId" = $1 AND email = $2
        "#,
    )
    .bind(order_id)
    .bind(email)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}
