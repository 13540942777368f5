// src/services/registro_service.rs
// DOCUMENTATION: Business logic for trip registrations
// PURPOSE: Existence checks before insert, history and admin listings

use crate::db::{RegistroRepository, RutaRepository, UsuarioRepository};
use crate::errors::ApiError;
use crate::models::{CreateRegistroRequest, HistorialEntry, Registro, RegistroDetalle};
use sqlx::PgPool;

pub struct RegistroService;

impl RegistroService {
    /// Register a trip for a passenger
    /// DOCUMENTATION: Both the user and the route must exist before the
    /// insert; missing references are 404s, not database errors
    pub async fn registrar(
        pool: &PgPool,
        req: CreateRegistroRequest,
    ) -> Result<Registro, ApiError> {
        UsuarioRepository::find_by_id(pool, req.usuario_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Usuario".to_string()))?;

        RutaRepository::find_by_id(pool, req.ruta_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Ruta".to_string()))?;

        let registro = RegistroRepository::create(pool, req.usuario_id, req.ruta_id).await?;
        log::info!(
            "Registration {} created (user {}, route {})",
            registro.id,
            registro.usuario_id,
            registro.ruta_id
        );
        Ok(registro)
    }

    /// Trip history for one user, newest first
    pub async fn historial(pool: &PgPool, usuario_id: i32) -> Result<Vec<HistorialEntry>, ApiError> {
        UsuarioRepository::find_by_id(pool, usuario_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Usuario".to_string()))?;

        RegistroRepository::historial_by_usuario(pool, usuario_id).await
    }

    /// All registrations with user and route details; admin role only
    pub async fn list_all(pool: &PgPool, is_admin: bool) -> Result<Vec<RegistroDetalle>, ApiError> {
        if !is_admin {
            return Err(ApiError::Forbidden);
        }

        RegistroRepository::list_all(pool).await
    }
}
