/*
 * Responsibility
 * - Orders の request/response DTO
 * - foodId は公開 ID のまま受け取り、handler で復号する
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::lenient::i64_from_number_or_string;
use crate::repos::store::OrderRow;
use crate::services::id_codec::{self, IdCodec};

/// Body of `POST /add-order`. `email` is the buyer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub food_id: String,
    #[serde(deserialize_with = "i64_from_number_or_string")]
    pub ordered_quantity: i64,
    pub email: String,
    #[serde(default)]
    pub buyer_name: String,
}

impl OrderRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.food_id.trim().is_empty() {
            return Err("foodId is required");
        }
        if self.ordered_quantity <= 0 {
            return Err("orderedQuantity must be > 0");
        }
        Ok(())
    }
}

/// `?email=` on routes whose path only carries a resource id.
/// Absent means blank, which never matches the authenticated email.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: String, // encoded
    pub food_id: String, // encoded
    pub food_name: String,
    pub food_image: String,
    pub price: f64,
    pub ordered_quantity: i64,
    pub email: String,
    pub buyer_name: String,
    pub ordered_at: DateTime<Utc>,
}

impl OrderResponse {
    pub fn from_row(codec: &IdCodec, row: OrderRow) -> id_codec::Result<Self> {
        Ok(Self {
            id: codec.encode(row.order_id)?,
            food_id: codec.encode(row.food_id)?,
            food_name: row.food_name,
            food_image: row.food_image,
            price: row.price,
            ordered_quantity: row.ordered_quantity,
            email: row.email,
            buyer_name: row.buyer_name,
            ordered_at: row.ordered_at,
        })
    }
}
