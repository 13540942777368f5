// src/handlers/registros.rs
// DOCUMENTATION: HTTP handlers for trip registrations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::ApiError;
use crate::models::{CreateRegistroRequest, RolGate};
use crate::services::RegistroService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

/// POST /api/registrar
/// Register a trip for a passenger
pub async fn registrar(
    pool: web::Data<PgPool>,
    req: web::Json<CreateRegistroRequest>,
) -> Result<impl Responder, ApiError> {
    let registro = RegistroService::registrar(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Ruta registrada correctamente",
        "registroId": registro.id
    })))
}

/// GET /api/historial/{id_usuario}
/// A user's trip history joined with routes
pub async fn historial(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<impl Responder, ApiError> {
    let historial = RegistroService::historial(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(historial))
}

/// GET /api/registros
/// All registrations; gated by a `rol` body field, as the original client
/// has no auth token
pub async fn list_registros(
    pool: web::Data<PgPool>,
    gate: Option<web::Json<RolGate>>,
) -> Result<impl Responder, ApiError> {
    let is_admin = gate.map(|g| g.is_admin()).unwrap_or(false);
    let registros = RegistroService::list_all(pool.get_ref(), is_admin).await?;
    Ok(HttpResponse::Ok().json(registros))
}

/// Configuration for registration endpoints
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/registrar", web::post().to(registrar))
        .route("/historial/{id_usuario}", web::get().to(historial))
        .route("/registros", web::get().to(list_registros));
}
