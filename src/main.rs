mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

use application::auth_service::AuthService;
use application::product_service::ProductService;
use data::product_repository::MongoProductRepository;
use data::user_repository::MongoUserRepository;
use infrastructure::config::AppConfig;
use infrastructure::database::connect;
use infrastructure::logging::init_logging;
use infrastructure::security::JwtKeys;
use presentation::handlers;
use presentation::middleware::{JwtAuthMiddleware, RequestLogMiddleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let db = connect(&config.mongodb_url, &config.mongodb_db)
        .await
        .expect("failed to connect to database");

    let user_repo = Arc::new(MongoUserRepository::new(&db));
    let product_repo = Arc::new(MongoProductRepository::new(&db));
    user_repo
        .init_indexes()
        .await
        .expect("failed to create user indexes");
    product_repo
        .init_indexes()
        .await
        .expect("failed to create product indexes");

    let auth_service = AuthService::new(
        Arc::clone(&user_repo),
        JwtKeys::new(config.jwt_secret.clone()),
    );
    let product_service = ProductService::new(Arc::clone(&product_repo));

    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(RequestLogMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(cors)
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(product_service.clone()))
            .route("/", web::get().to(welcome))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health))
                    .service(
                        web::scope("/products")
                            .service(handlers::auth::register)
                            .service(handlers::auth::login)
                            .service(handlers::product::list_products)
                            .service(handlers::product::featured_products)
                            .service(handlers::product::products_below_price)
                            .service(handlers::product::products_above_rating)
                            .service(handlers::product::filtered_products)
                            .service(
                                web::scope("")
                                    .wrap(JwtAuthMiddleware::new(auth_service.keys().clone()))
                                    .service(handlers::product::create_product)
                                    .service(handlers::product::get_product)
                                    .service(handlers::auth::logout)
                                    .service(handlers::product::update_product)
                                    .service(handlers::product::delete_product),
                            ),
                    ),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

async fn welcome() -> impl Responder {
    HttpResponse::Ok().body("Welcome to product page")
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
