use actix_web::{HttpResponse, Responder, post, web};
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::data::user_repository::MongoUserRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
use crate::presentation::utils::AuthenticatedUser;
use crate::presentation::validation::{validate_login, validate_register};

#[post("/register")]
pub async fn register(
    service: web::Data<AuthService<MongoUserRepository>>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, DomainError> {
    validate_register(&payload)?;

    let token = service
        .register(
            payload.name.clone(),
            payload.email.clone(),
            payload.password.clone(),
        )
        .await?;

    info!(email = %payload.email, "user registered");

    Ok(HttpResponse::Ok().json(AuthResponse {
        msg: "Registration successful",
        token,
    }))
}

#[post("/login")]
pub async fn login(
    service: web::Data<AuthService<MongoUserRepository>>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, DomainError> {
    validate_login(&payload)?;

    let token = service.login(&payload.email, &payload.password).await?;

    info!(email = %payload.email, "user logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        msg: "Login successful",
        token,
    }))
}

// Tokens are not invalidated server side; the client drops its copy.
#[post("/logout")]
pub async fn logout(user: AuthenticatedUser) -> Result<impl Responder, DomainError> {
    info!(user_id = %user.id, "user logged out");

    Ok(HttpResponse::Ok().json(MessageResponse {
        msg: "Logged out successfully",
    }))
}
