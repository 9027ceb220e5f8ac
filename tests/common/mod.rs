#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use dine_api::app::build_router;
use dine_api::config::Config;
use dine_api::repos::error::RepoResult;
use dine_api::repos::store::{
    FoodRow, NewFood, NewOrder, OrderRow, PlaceOrderOutcome, Store, UpsertOutcome,
};
use dine_api::repos::MemoryStore;
use dine_api::services::auth::{AuthService, build_auth_service};
use dine_api::services::id_codec::IdCodec;
use dine_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";

/// In-memory store that counts every call, to prove a request never reached it.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for CountingStore {
    fn backend_name(&self) -> &'static str {
        "counting"
    }

    async fn insert_food(&self, food: &NewFood) -> RepoResult<i64> {
        self.hit();
        self.inner.insert_food(food).await
    }

    async fn get_food(&self, food_id: i64) -> RepoResult<Option<FoodRow>> {
        self.hit();
        self.inner.get_food(food_id).await
    }

    async fn top_foods(&self, limit: i64) -> RepoResult<Vec<FoodRow>> {
        self.hit();
        self.inner.top_foods(limit).await
    }

    async fn search_foods(&self, search: Option<&str>) -> RepoResult<Vec<FoodRow>> {
        self.hit();
        self.inner.search_foods(search).await
    }

    async fn foods_by_owner(&self, email: &str) -> RepoResult<Vec<FoodRow>> {
        self.hit();
        self.inner.foods_by_owner(email).await
    }

    async fn upsert_food(&self, food_id: i64, food: &NewFood) -> RepoResult<UpsertOutcome> {
        self.hit();
        self.inner.upsert_food(food_id, food).await
    }

    async fn place_order(&self, order: &NewOrder) -> RepoResult<PlaceOrderOutcome> {
        self.hit();
        self.inner.place_order(order).await
    }

    async fn orders_by_email(&self, email: &str) -> RepoResult<Vec<OrderRow>> {
        self.hit();
        self.inner.orders_by_email(email).await
    }

    async fn delete_order(&self, order_id: i64, email: &str) -> RepoResult<u64> {
        self.hit();
        self.inner.delete_order(order_id, email).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<CountingStore>,
    pub auth: Arc<AuthService>,
    pub id_codec: IdCodec,
}

pub fn config_with(pairs: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    map.entry("SECRET_KEY".to_string())
        .or_insert_with(|| SECRET.to_string());
    Config::from_lookup(move |key| map.get(key).cloned()).expect("config")
}

pub fn test_app() -> TestApp {
    test_app_with(config_with(&[]))
}

pub fn test_app_with(config: Config) -> TestApp {
    let store = Arc::new(CountingStore::default());
    let id_codec =
        IdCodec::new(config.sqids_min_length, &config.sqids_alphabet).expect("id codec");
    let auth = build_auth_service(&config);

    let state = AppState::new(store.clone(), id_codec.clone(), auth.clone());
    TestApp {
        router: build_router(state, &config),
        store,
        auth,
        id_codec,
    }
}

/// `Cookie` header value carrying a fresh credential for `email`.
pub fn cookie_for(app: &TestApp, email: &str) -> String {
    let issued = app.auth.credentials().issue(email).expect("issue");
    format!("token={}", issued.token)
}

pub fn request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn json_request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub fn food_body(email: &str, name: &str, quantity: i64) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "name": name,
        "image": "https://img.example/food.png",
        "category": "Main",
        "quantity": quantity.to_string(),
        "price": "9.99",
        "origin": "Thailand",
        "description": "tasty",
        "addBy": { "name": "Owner", "email": email }
    })
}
