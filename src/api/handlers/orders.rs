/*
 * Responsibility
 * - orders 系 handler
 * - 注文の作成 / 一覧 / 削除はすべて購入者本人のみ (policy::require_owner)
 * - 在庫の減算と注文の追加は store 側で 1 操作として行う
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::{
            ack::DeleteResponse,
            order::{OrderRequest, OrderResponse, OwnerQuery},
        },
        extractors::{AuthCtxExtractor, JsonBody, PathParam, QueryParams},
        policy::require_owner,
    },
    error::AppError,
    repos::store::{NewOrder, PlaceOrderOutcome},
    state::AppState,
};

/// POST /add-order
pub async fn add_order(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    JsonBody(req): JsonBody<OrderRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    require_owner(&auth, &req.email)?;
    req.validate().map_err(AppError::bad_request)?;

    let food_id = state.id_codec.decode(req.food_id.trim())?;
    let order = NewOrder {
        food_id,
        ordered_quantity: req.ordered_quantity,
        email: req.email,
        buyer_name: req.buyer_name,
    };

    match state.store.place_order(&order).await? {
        PlaceOrderOutcome::Placed(row) => {
            tracing::info!(
                order_id = row.order_id,
                food_id = row.food_id,
                ordered_quantity = row.ordered_quantity,
                "order placed"
            );
            Ok(Json(OrderResponse::from_row(&state.id_codec, row)?))
        }
        PlaceOrderOutcome::FoodNotFound => Err(AppError::not_found("food")),
        PlaceOrderOutcome::InsufficientQuantity { available } => Err(AppError::conflict(
            format!("only {available} item(s) left"),
        )),
    }
}

/// GET /my-orders/{email}
pub async fn my_orders(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PathParam(email): PathParam<String>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    require_owner(&auth, &email)?;

    let rows = state.store.orders_by_email(&email).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(OrderResponse::from_row(&state.id_codec, row)?);
    }
    Ok(Json(res))
}

/// DELETE /my-food/{id}?email= (removes one of the caller's orders)
pub async fn delete_my_order(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PathParam(public_id): PathParam<String>,
    QueryParams(owner): QueryParams<OwnerQuery>,
) -> Result<Json<DeleteResponse>, AppError> {
    require_owner(&auth, &owner.email)?;
    let order_id = state.id_codec.decode(&public_id)?;

    let deleted_count = state.store.delete_order(order_id, &owner.email).await?;

    Ok(Json(DeleteResponse {
        acknowledged: true,
        deleted_count,
    }))
}
