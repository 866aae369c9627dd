use validator::ValidateEmail;

use crate::domain::error::{DomainError, FieldError};
use crate::presentation::dto::{
    CreateProductRequest, LoginRequest, RegisterRequest, UpdateProductRequest,
};

fn rating_in_range(rating: f64) -> bool {
    (0.0..=5.0).contains(&rating)
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), DomainError> {
    let mut errors = Vec::new();

    if req.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "Name is required",
        });
    }
    if !req.email.validate_email() {
        errors.push(FieldError {
            field: "email",
            message: "Please include a valid email",
        });
    }
    if req.password.chars().count() < 6 {
        errors.push(FieldError {
            field: "password",
            message: "Please enter a password with 6 or more characters",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

pub fn validate_login(req: &LoginRequest) -> Result<(), DomainError> {
    let mut errors = Vec::new();

    if !req.email.validate_email() {
        errors.push(FieldError {
            field: "email",
            message: "Please include a valid email",
        });
    }
    if req.password.is_empty() {
        errors.push(FieldError {
            field: "password",
            message: "Password is required",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

pub fn validate_create_product(req: &CreateProductRequest) -> Result<(), DomainError> {
    let mut errors = Vec::new();

    if req.product_id.trim().is_empty() {
        errors.push(FieldError {
            field: "productId",
            message: "Product ID is required",
        });
    }
    if req.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "Product name is required",
        });
    }
    if req.company.trim().is_empty() {
        errors.push(FieldError {
            field: "company",
            message: "Company name is required",
        });
    }
    if req.rating.is_some_and(|r| !rating_in_range(r)) {
        errors.push(FieldError {
            field: "rating",
            message: "Rating must be between 0 and 5",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

pub fn validate_update_product(req: &UpdateProductRequest) -> Result<(), DomainError> {
    let mut errors = Vec::new();

    if req.product_id.as_deref().is_some_and(|v| v.trim().is_empty()) {
        errors.push(FieldError {
            field: "productId",
            message: "Product ID is required",
        });
    }
    if req.name.as_deref().is_some_and(|v| v.trim().is_empty()) {
        errors.push(FieldError {
            field: "name",
            message: "Product name is required",
        });
    }
    if req.company.as_deref().is_some_and(|v| v.trim().is_empty()) {
        errors.push(FieldError {
            field: "company",
            message: "Company name is required",
        });
    }
    if req.rating.is_some_and(|r| !rating_in_range(r)) {
        errors.push(FieldError {
            field: "rating",
            message: "Rating must be between 0 and 5",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}
