// src/handlers/rutas.rs
// DOCUMENTATION: HTTP handlers for route operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::ApiError;
use crate::models::CreateRutaRequest;
use crate::services::RutaService;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// GET /api/rutas
/// List all available routes
pub async fn list_rutas(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let rutas = RutaService::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(rutas))
}

/// GET /api/rutas/{id}
/// Retrieve one route
pub async fn get_ruta(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<impl Responder, ApiError> {
    let ruta = RutaService::get(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ruta))
}

/// POST /api/rutas
/// Create a new route (admin role in body)
pub async fn create_ruta(
    pool: web::Data<PgPool>,
    req: web::Json<CreateRutaRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let ruta = RutaService::create(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(ruta))
}

/// Configuration for route endpoints
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/rutas", web::get().to(list_rutas))
        .route("/rutas/{id}", web::get().to(get_ruta))
        .route("/rutas", web::post().to(create_ruta));
}
