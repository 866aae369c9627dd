use serde::{Deserialize, Serialize};

// Missing credential fields default to empty strings so the explicit
// validators report them as field errors instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub msg: &'static str,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

// ======================= PRODUCTS =======================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub featured: bool,
    pub rating: Option<f64>,
    pub company: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
    pub company: Option<String>,
}

/// Query parameters of the combined filter endpoint. Typed extraction rejects
/// non-numeric price/rating and non-boolean featured values with a 400.
#[derive(Debug, Default, Deserialize)]
pub struct FilteredQuery {
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub featured: Option<bool>,
}
