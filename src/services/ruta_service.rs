// src/services/ruta_service.rs
// DOCUMENTATION: Business logic for routes
// PURPOSE: Intermediary between handlers and the route repository

use crate::db::RutaRepository;
use crate::errors::ApiError;
use crate::models::{CreateRutaRequest, Ruta};
use sqlx::PgPool;

pub struct RutaService;

impl RutaService {
    /// List all available routes
    pub async fn list(pool: &PgPool) -> Result<Vec<Ruta>, ApiError> {
        RutaRepository::list(pool).await
    }

    /// Fetch one route
    pub async fn get(pool: &PgPool, id: i32) -> Result<Ruta, ApiError> {
        RutaRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Ruta".to_string()))
    }

    /// Create a route; admin role only
    pub async fn create(pool: &PgPool, req: CreateRutaRequest) -> Result<Ruta, ApiError> {
        if req.rol.as_deref() != Some("admin") {
            return Err(ApiError::Forbidden);
        }

        let ruta = RutaRepository::create(pool, &req.origen, &req.destino).await?;
        log::info!("Route {} created: {} -> {}", ruta.id, ruta.origen, ruta.destino);
        Ok(ruta)
    }
}
