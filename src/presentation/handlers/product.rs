use actix_web::{HttpMessage, HttpRequest, HttpResponse, delete, get, post, put, web};
use tracing::info;
use uuid::Uuid;

use crate::application::product_service::ProductService;
use crate::data::product_repository::{MongoProductRepository, ProductFilter};
use crate::domain::error::DomainError;
use crate::presentation::dto::{CreateProductRequest, FilteredQuery, MessageResponse, UpdateProductRequest};
use crate::presentation::utils::AuthenticatedUser;
use crate::presentation::validation::{validate_create_product, validate_update_product};

#[post("/createProduct")]
pub async fn create_product(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<ProductService<MongoProductRepository>>,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, DomainError> {
    validate_create_product(&payload)?;

    let product = service.create_product(payload.into_inner()).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        product_id = %product.product_id,
        "product created"
    );

    Ok(HttpResponse::Ok().json(product))
}

#[get("")]
pub async fn list_products(
    service: web::Data<ProductService<MongoProductRepository>>,
) -> Result<HttpResponse, DomainError> {
    let products = service.list_products().await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/productByid/{id}")]
pub async fn get_product(
    _user: AuthenticatedUser,
    service: web::Data<ProductService<MongoProductRepository>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let product = service.get_product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[put("/{id}")]
pub async fn update_product(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<ProductService<MongoProductRepository>>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, DomainError> {
    validate_update_product(&payload)?;

    let id = path.into_inner();
    let product = service.update_product(id, payload.into_inner()).await?;

    info!(request_id = %request_id(&req), user_id = %user.id, id = %id, "product updated");

    Ok(HttpResponse::Ok().json(product))
}

#[delete("/{id}")]
pub async fn delete_product(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<ProductService<MongoProductRepository>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    service.delete_product(id).await?;

    info!(request_id = %request_id(&req), user_id = %user.id, id = %id, "product deleted");

    Ok(HttpResponse::Ok().json(MessageResponse {
        msg: "Product deleted",
    }))
}

#[get("/featured")]
pub async fn featured_products(
    service: web::Data<ProductService<MongoProductRepository>>,
) -> Result<HttpResponse, DomainError> {
    let products = service
        .list_filtered(ProductFilter {
            featured: Some(true),
            ..Default::default()
        })
        .await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/price/{value}")]
pub async fn products_below_price(
    service: web::Data<ProductService<MongoProductRepository>>,
    path: web::Path<f64>,
) -> Result<HttpResponse, DomainError> {
    let products = service
        .list_filtered(ProductFilter {
            price_below: Some(path.into_inner()),
            ..Default::default()
        })
        .await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/rating/{value}")]
pub async fn products_above_rating(
    service: web::Data<ProductService<MongoProductRepository>>,
    path: web::Path<f64>,
) -> Result<HttpResponse, DomainError> {
    let products = service
        .list_filtered(ProductFilter {
            rating_above: Some(path.into_inner()),
            ..Default::default()
        })
        .await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/filtered")]
pub async fn filtered_products(
    service: web::Data<ProductService<MongoProductRepository>>,
    query: web::Query<FilteredQuery>,
) -> Result<HttpResponse, DomainError> {
    let products = service
        .list_filtered(ProductFilter {
            featured: query.featured,
            price_at_most: query.price,
            rating_above: query.rating,
            ..Default::default()
        })
        .await?;
    Ok(HttpResponse::Ok().json(products))
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<crate::presentation::middleware::RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
