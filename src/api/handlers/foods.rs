/*
 * Responsibility
 * - foods 系 handler
 * - 公開 route の {id} は PublicFoodId extractor で復号して受け取る
 * - ユーザー単位の route は policy::require_owner を ID の復号・store 呼び出しより先に通す
 *   (不正な ID でも email 不一致なら一律 401)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::{
            ack::{InsertResponse, UpdateResponse},
            food::{FoodRequest, FoodResponse, SearchQuery},
            order::OwnerQuery,
        },
        extractors::{AuthCtxExtractor, JsonBody, PathParam, QueryParams, public_id::PublicFoodId},
        policy::require_owner,
    },
    error::AppError,
    repos::store::{TOP_FOODS_LIMIT, UpsertOutcome},
    state::AppState,
};

/// GET /foods (home page: most ordered first)
pub async fn top_foods(State(state): State<AppState>) -> Result<Json<Vec<FoodResponse>>, AppError> {
    let rows = state.store.top_foods(TOP_FOODS_LIMIT).await?;
    Ok(Json(FoodResponse::from_rows(&state.id_codec, rows)?))
}

/// GET /all-foods?search=
pub async fn all_foods(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Json<Vec<FoodResponse>>, AppError> {
    let rows = state.store.search_foods(query.term()).await?;
    Ok(Json(FoodResponse::from_rows(&state.id_codec, rows)?))
}

/// GET /foods/{id}
pub async fn get_food(
    State(state): State<AppState>,
    food_id: PublicFoodId,
) -> Result<Json<FoodResponse>, AppError> {
    let row = state
        .store
        .get_food(food_id.id)
        .await?
        .ok_or(AppError::not_found("food"))?;

    Ok(Json(FoodResponse::from_row(&state.id_codec, row)?))
}

/// GET /foods/purchase/{id}?email=
pub async fn purchase_food(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PathParam(public_id): PathParam<String>,
    QueryParams(owner): QueryParams<OwnerQuery>,
) -> Result<Json<FoodResponse>, AppError> {
    require_owner(&auth, &owner.email)?;
    let food_id = state.id_codec.decode(&public_id)?;

    let row = state
        .store
        .get_food(food_id)
        .await?
        .ok_or(AppError::not_found("food"))?;

    Ok(Json(FoodResponse::from_row(&state.id_codec, row)?))
}

/// GET /food/{email} (foods posted by the caller)
pub async fn foods_by_owner(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PathParam(email): PathParam<String>,
) -> Result<Json<Vec<FoodResponse>>, AppError> {
    require_owner(&auth, &email)?;

    let rows = state.store.foods_by_owner(&email).await?;
    Ok(Json(FoodResponse::from_rows(&state.id_codec, rows)?))
}

/// POST /add-food
pub async fn add_food(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    JsonBody(req): JsonBody<FoodRequest>,
) -> Result<(StatusCode, Json<InsertResponse>), AppError> {
    require_owner(&auth, &req.email)?;
    require_owner(&auth, &req.add_by.email)?;
    req.validate().map_err(AppError::bad_request)?;

    let food_id = state.store.insert_food(&req.into_new_food()).await?;
    tracing::info!(food_id, "food added");

    Ok((
        StatusCode::OK,
        Json(InsertResponse {
            acknowledged: true,
            inserted_id: state.id_codec.encode(food_id)?,
        }),
    ))
}

/// PUT /foods/{id} (upsert)
pub async fn update_food(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    PathParam(public_id): PathParam<String>,
    JsonBody(req): JsonBody<FoodRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    require_owner(&auth, &req.email)?;
    require_owner(&auth, &req.add_by.email)?;
    req.validate().map_err(AppError::bad_request)?;
    let food_id = state.id_codec.decode(&public_id)?;

    let outcome = state
        .store
        .upsert_food(food_id, &req.into_new_food())
        .await?;

    let res = match outcome {
        UpsertOutcome::Updated => UpdateResponse {
            acknowledged: true,
            matched_count: 1,
            modified_count: 1,
            upserted_id: None,
        },
        UpsertOutcome::Inserted(new_id) => UpdateResponse {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(state.id_codec.encode(new_id)?),
        },
        UpsertOutcome::NotOwned => {
            tracing::warn!(food_id, "update of a food owned by someone else");
            return Err(AppError::Unauthorized);
        }
    };

    Ok(Json(res))
}
