// src/handlers/auth.rs
// DOCUMENTATION: HTTP handlers for signup and login
// PURPOSE: Parse requests, call services, return responses

use crate::errors::ApiError;
use crate::models::{LoginRequest, RegistroUsuarioRequest};
use crate::services::AuthService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// POST /api/registro
/// Create a new user (passenger)
pub async fn registro(
    pool: web::Data<PgPool>,
    req: web::Json<RegistroUsuarioRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let id = AuthService::registrar(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Usuario registrado correctamente",
        "id": id
    })))
}

/// POST /api/login
/// Authenticate by national ID and password
pub async fn login(
    pool: web::Data<PgPool>,
    req: web::Json<LoginRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let usuario = AuthService::login(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(usuario))
}

/// Configuration for auth routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/registro", web::post().to(registro))
        .route("/login", web::post().to(login));
}
