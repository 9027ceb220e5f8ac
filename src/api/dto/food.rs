/*
 * Responsibility
 * - Foods の request/response DTO
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 * - validate() で形式チェック
 */
use serde::{Deserialize, Serialize};

use crate::api::dto::lenient::{f64_from_number_or_string, i64_from_number_or_string};
use crate::repos::store::{FoodRow, NewFood};
use crate::services::id_codec::{self, IdCodec};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddBy {
    #[serde(default)]
    pub name: String,
    pub email: String,
}

/// Body of `POST /add-food` and `PUT /foods/{id}`.
///
/// `email` is the caller's declared identity; `addBy.email` becomes the owner.
/// Both must equal the authenticated email.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRequest {
    pub email: String,

    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(deserialize_with = "i64_from_number_or_string")]
    pub quantity: i64,
    #[serde(deserialize_with = "f64_from_number_or_string")]
    pub price: f64,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub description: String,

    pub add_by: AddBy,
}

impl FoodRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.quantity < 0 {
            return Err("quantity must be >= 0");
        }
        if self.price < 0.0 {
            return Err("price must be >= 0");
        }
        Ok(())
    }

    // `email` only declares who is calling; it is not stored.
    pub fn into_new_food(self) -> NewFood {
        NewFood {
            name: self.name.trim().to_string(),
            image: self.image,
            category: self.category,
            quantity: self.quantity,
            price: self.price,
            origin: self.origin,
            description: self.description,
            add_by_name: self.add_by.name,
            add_by_email: self.add_by.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    /// Blank search means "everything".
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodResponse {
    #[serde(rename = "_id")]
    pub id: String, // encoded
    pub name: String,
    pub image: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    pub origin: String,
    pub description: String,
    pub add_by: AddBy,
    // number of orders placed
    pub order: i64,
}

impl FoodResponse {
    pub fn from_row(codec: &IdCodec, row: FoodRow) -> id_codec::Result<Self> {
        Ok(Self {
            id: codec.encode(row.food_id)?,
            name: row.name,
            image: row.image,
            category: row.category,
            quantity: row.quantity,
            price: row.price,
            origin: row.origin,
            description: row.description,
            add_by: AddBy {
                name: row.add_by_name,
                email: row.add_by_email,
            },
            order: row.purchase_count,
        })
    }

    pub fn from_rows(codec: &IdCodec, rows: Vec<FoodRow>) -> id_codec::Result<Vec<Self>> {
        rows.into_iter()
            .map(|row| Self::from_row(codec, row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_style_body_is_accepted() {
        let req: FoodRequest = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "name": " Pad Thai ",
            "quantity": "12",
            "price": "8.5",
            "addBy": { "name": "Alice", "email": "a@x.com" }
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        let food = req.into_new_food();
        assert_eq!(food.name, "Pad Thai");
        assert_eq!(food.quantity, 12);
        assert_eq!(food.add_by_email, "a@x.com");
    }

    #[test]
    fn negative_quantity_is_invalid() {
        let req: FoodRequest = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "name": "Soup",
            "quantity": -1,
            "price": 1,
            "addBy": { "email": "a@x.com" }
        }))
        .unwrap();

        assert_eq!(req.validate(), Err("quantity must be >= 0"));
    }

    #[test]
    fn blank_search_means_everything() {
        let q = SearchQuery {
            search: Some("   ".to_string()),
        };
        assert_eq!(q.term(), None);

        let q = SearchQuery {
            search: Some(" curry ".to_string()),
        };
        assert_eq!(q.term(), Some("curry"));
    }
}
