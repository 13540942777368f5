// src/db/registro_repository.rs
// DOCUMENTATION: Trip registration database operations
// PURPOSE: Append registrations and read histories (never updated or deleted)

use crate::errors::ApiError;
use crate::models::{HistorialEntry, Registro, RegistroDetalle};
use sqlx::PgPool;

pub struct RegistroRepository;

impl RegistroRepository {
    /// Append a registration dated today
    pub async fn create(pool: &PgPool, usuario_id: i32, ruta_id: i32) -> Result<Registro, ApiError> {
        let registro = sqlx::query_as::<_, Registro>(
            r#"
            INSERT INTO registros (usuario_id, ruta_id, fecha_registro)
            VALUES ($1, $2, CURRENT_DATE)
            RETURNING id, usuario_id, ruta_id, fecha_registro
            "#,
        )
        .bind(usuario_id)
        .bind(ruta_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create registration: {}", e);
            ApiError::from(e)
        })?;

        Ok(registro)
    }

    /// A user's registrations joined with their routes, newest first
    pub async fn historial_by_usuario(
        pool: &PgPool,
        usuario_id: i32,
    ) -> Result<Vec<HistorialEntry>, ApiError> {
        let historial = sqlx::query_as::<_, HistorialEntry>(
            r#"
            SELECT r.id, r.fecha_registro, ru.origen, ru.destino
            FROM registros r
            JOIN rutas ru ON r.ruta_id = ru.id
            WHERE r.usuario_id = $1
            ORDER BY r.fecha_registro DESC, r.id DESC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch history for user {}: {}", usuario_id, e);
            ApiError::from(e)
        })?;

        Ok(historial)
    }

    /// Every registration joined with user and route, newest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<RegistroDetalle>, ApiError> {
        let registros = sqlx::query_as::<_, RegistroDetalle>(
            r#"
            SELECT r.id, r.fecha_registro,
                   u.id AS usuario_id, u.nombre AS nombre_usuario, u.dni,
                   ru.id AS ruta_id, ru.origen, ru.destino
            FROM registros r
            JOIN usuarios u ON r.usuario_id = u.id
            JOIN rutas ru ON r.ruta_id = ru.id
            ORDER BY r.fecha_registro DESC, r.id DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list registrations: {}", e);
            ApiError::from(e)
        })?;

        Ok(registros)
    }
}
