use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::presentation::dto::{CreateProductRequest, UpdateProductRequest};

/// Catalog entry. Field names stay camelCase on the wire, with the
/// identifier exposed as `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub product_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub company: String,
}

impl Product {
    pub fn new(input: CreateProductRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: input.product_id,
            name: input.name,
            price: input.price,
            featured: input.featured,
            rating: input.rating,
            created_at: Utc::now(),
            company: input.company,
        }
    }

    /// Replaces the fields present in `update`, leaving the rest untouched.
    pub fn apply_update(&mut self, update: UpdateProductRequest) {
        if let Some(product_id) = update.product_id {
            self.product_id = product_id;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        if let Some(rating) = update.rating {
            self.rating = Some(rating);
        }
        if let Some(company) = update.company {
            self.company = company;
        }
    }
}
