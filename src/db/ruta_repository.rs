// src/db/ruta_repository.rs
// DOCUMENTATION: Route database operations
// PURPOSE: Handle listing and creation of routes

use crate::errors::ApiError;
use crate::models::Ruta;
use sqlx::PgPool;

pub struct RutaRepository;

impl RutaRepository {
    /// List all routes ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Ruta>, ApiError> {
        let rutas = sqlx::query_as::<_, Ruta>(
            r#"
            SELECT id, origen, destino
            FROM rutas
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list routes: {}", e);
            ApiError::from(e)
        })?;

        Ok(rutas)
    }

    /// Fetch one route by id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Ruta>, ApiError> {
        let ruta = sqlx::query_as::<_, Ruta>(
            r#"
            SELECT id, origen, destino
            FROM rutas
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch route {}: {}", id, e);
            ApiError::from(e)
        })?;

        Ok(ruta)
    }

    /// Insert a new route
    pub async fn create(pool: &PgPool, origen: &str, destino: &str) -> Result<Ruta, ApiError> {
        let ruta = sqlx::query_as::<_, Ruta>(
            r#"
            INSERT INTO rutas (origen, destino)
            VALUES ($1, $2)
            RETURNING id, origen, destino
            "#,
        )
        .bind(origen)
        .bind(destino)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create route: {}", e);
            ApiError::from(e)
        })?;

        Ok(ruta)
    }
}
