/*
 * Responsibility
 * - foods テーブル向け SQLx 操作
 * - executor (pool / transaction) を受け取る free function として提供
 */
use sqlx::postgres::PgExecutor;

use crate::repos::error::RepoResult;
use crate::repos::store::{FoodRow, NewFood};

pub async fn insert<'e>(db: impl PgExecutor<'e>, food: &NewFood) -> RepoResult<i64> {
    let food_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO foods (
            name, image, category, quantity, price, origin, description,
            "addByName", "addByEmail"
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING "foodId"
        "#,
    )
    .bind(&food.name)
    .bind(&food.image)
    .bind(&food.category)
    .bind(food.quantity)
    .bind(food.price)
    .bind(&food.origin)
    .bind(&food.description)
    .bind(&food.add_by_name)
    .bind(&food.add_by_email)
    .fetch_one(db)
    .await?;

    Ok(food_id)
}

/// Insert under a caller-chosen id (upsert of an unknown id).
///
/// Returns false when the id was taken concurrently.
pub async fn insert_at<'e>(
    db: impl PgExecutor<'e>,
    food_id: i64,
    food: &NewFood,
) -> RepoResult<bool> {
    let inserted: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO foods (
            "foodId", name, image, category, quantity, price, origin, description,
            "addByName", "addByEmail"
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT ("foodId") DO NOTHING
        RETURNING "foodId"
        "#,
    )
    .bind(food_id)
    .bind(&food.name)
    .bind(&food.image)
    .bind(&food.category)
    .bind(food.quantity)
    .bind(food.price)
    .bind(&food.origin)
    .bind(&food.description)
    .bind(&food.add_by_name)
    .bind(&food.add_by_email)
    .fetch_optional(db)
    .await?;

    Ok(inserted.is_some())
}

/// Move the `"foodId"` sequence past `food_id` so `insert` never hands it out again.
pub async fn advance_id_sequence<'e>(db: impl PgExecutor<'e>, food_id: i64) -> RepoResult<()> {
    sqlx::query(
        r#"
        SELECT setval(pg_get_serial_sequence('foods', 'foodId'), $1)
        WHERE $1 > COALESCE(
            pg_sequence_last_value(pg_get_serial_sequence('foods', 'foodId')::regclass),
            0
        )
        "#,
    )
    .bind(food_id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn get<'e>(db: impl PgExecutor<'e>, food_id: i64) -> RepoResult<Option<FoodRow>> {
    let row = sqlx::query_as::<_, FoodRow>(
        r#"
        SELECT
            "foodId", name, image, category, quantity, price, origin, description,
            "addByName", "addByEmail", "purchaseCount", "createdAt", "updatedAt"
        FROM foods
        WHERE "foodId" = $1
        "#,
    )
    .bind(food_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Same as `get` but locks the row until the surrounding transaction ends.
pub async fn get_for_update<'e>(
    db: impl PgExecutor<'e>,
    food_id: i64,
) -> RepoResult<Option<FoodRow>> {
    let row = sqlx::query_as::<_, FoodRow>(
        r#"
        SELECT
            "foodId", name, image, category, quantity, price, origin, description,
            "addByName", "addByEmail", "purchaseCount", "createdAt", "updatedAt"
        FROM foods
        WHERE "foodId" = $1
        FOR UPDATE
        "#,
    )
    .bind(food_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn top<'e>(db: impl PgExecutor<'e>, limit: i64) -> RepoResult<Vec<FoodRow>> {
    let rows = sqlx::query_as::<_, FoodRow>(
        r#"
        SELECT
            "foodId", name, image, category, quantity, price, origin, description,
            "addByName", "addByEmail", "purchaseCount", "createdAt", "updatedAt"
        FROM foods
        ORDER BY "purchaseCount" DESC, "foodId" ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn search<'e>(db: impl PgExecutor<'e>, search: Option<&str>) -> RepoResult<Vec<FoodRow>> {
    // $1 NULL -> no filter
    let pattern = search.map(|s| format!("%{}%", escape_like(s)));

    let rows = sqlx::query_as::<_, FoodRow>(
        r#"
        SELECT
            "foodId", name, image, category, quantity, price, origin, description,
            "addByName", "addByEmail", "purchaseCount", "createdAt", "updatedAt"
        FROM foods
        WHERE $1::text IS NULL OR name ILIKE $1
        ORDER BY "foodId" ASC
        "#,
    )
    .bind(pattern)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn list_by_owner<'e>(db: impl PgExecutor<'e>, email: &str) -> RepoResult<Vec<FoodRow>> {
    let rows = sqlx::query_as::<_, FoodRow>(
        r#"
        SELECT
            "foodId", name, image, category, quantity, price, origin, description,
            "addByName", "addByEmail", "purchaseCount", "createdAt", "updatedAt"
        FROM foods
        WHERE "addByEmail" = $1
        ORDER BY "foodId" ASC
        "#,
    )
    .bind(email)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

/// Overwrite the writable fields of a food owned by `food.add_by_email`.
///
/// Returns false when the id does not exist or belongs to someone else.
pub async fn update_owned<'e>(
    db: impl PgExecutor<'e>,
    food_id: i64,
    food: &NewFood,
) -> RepoResult<bool> {
    let updated: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE foods
        SET
            name = $2,
            image = $3,
            category = $4,
            quantity = $5,
            price = $6,
            origin = $7,
            description = $8,
            "addByName" = $9,
            "updatedAt" = now()
        WHERE "foodId" = $1 AND "addByEmail" = $10
        RETURNING "foodId"
        "#,
    )
    .bind(food_id)
    .bind(&food.name)
    .bind(&food.image)
    .bind(&food.category)
    .bind(food.quantity)
    .bind(food.price)
    .bind(&food.origin)
    .bind(&food.description)
    .bind(&food.add_by_name)
    .bind(&food.add_by_email)
    .fetch_optional(db)
    .await?;

    Ok(updated.is_some())
}

pub async fn exists<'e>(db: impl PgExecutor<'e>, food_id: i64) -> RepoResult<bool> {
    let exists: bool =
        sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM foods WHERE "foodId" = $1)"#)
            .bind(food_id)
            .fetch_one(db)
            .await?;

    Ok(exists)
}

pub async fn record_purchase<'e>(
    db: impl PgExecutor<'e>,
    food_id: i64,
    ordered_quantity: i64,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        UPDATE foods
        SET
            quantity = quantity - $2,
            "purchaseCount" = "purchaseCount" + 1,
            "updatedAt" = now()
        WHERE "foodId" = $1
        "#,
    )
    .bind(food_id)
    .bind(ordered_quantity)
    .execute(db)
    .await?;

    Ok(())
}

// LIKE treats `%` and `_` as wildcards; the search box is plain text.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("pizza"), "pizza");
        assert_eq!(escape_like("100%_\\"), "100\\%\\_\\\\");
    }
}
