/*
 * Responsibility
 * - URL 構造を定義
 * - 公開 route と gate (cookie JWT 検証) 付き route を分けて merge する
 * - gate 付き route は handler 内で owner-match も行う
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::api::handlers::{
    auth::{issue_token, logout},
    foods::{add_food, all_foods, foods_by_owner, get_food, purchase_food, top_foods, update_food},
    health::{health, root},
    orders::{add_order, delete_my_order, my_orders},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/jwt", post(issue_token))
        .route("/logout", get(logout))
        .route("/foods", get(top_foods))
        .route("/all-foods", get(all_foods))
        .route("/foods/{id}", get(get_food));

    let protected = Router::new()
        .route("/foods/{id}", put(update_food))
        .route("/foods/purchase/{id}", get(purchase_food))
        .route("/food/{email}", get(foods_by_owner))
        .route("/add-food", post(add_food))
        .route("/add-order", post(add_order))
        .route("/my-orders/{email}", get(my_orders))
        .route("/my-food/{id}", delete(delete_my_order));
    let protected = middleware::auth::access::apply(protected, state);

    // GET /foods/{id} (public) と PUT /foods/{id} (gate) は同じ path で method ごとに merge される
    public.merge(protected)
}
