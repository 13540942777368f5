// src/db/usuario_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: Handle inserts and lookups on the usuarios table

use crate::errors::ApiError;
use crate::models::{RegistroUsuarioRequest, Usuario};
use sqlx::PgPool;

pub struct UsuarioRepository;

impl UsuarioRepository {
    /// Insert a new user with an already-hashed password
    /// DOCUMENTATION: Unique violations on dni/correo surface as AlreadyExists
    pub async fn create_usuario(
        pool: &PgPool,
        req: &RegistroUsuarioRequest,
        password_hash: &str,
    ) -> Result<i32, ApiError> {
        let inserted: (i32,) = sqlx::query_as(
            r#"
            INSERT INTO usuarios (nombre, dni, correo, password, rol)
            VALUES ($1, $2, $3, $4, 'pasajero')
            RETURNING id
            "#,
        )
        .bind(&req.nombre)
        .bind(&req.dni)
        .bind(&req.correo)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::AlreadyExists(_) => {
                ApiError::AlreadyExists("dni o correo".to_string())
            }
            other => {
                log::error!("Failed to create user: {}", other);
                other
            }
        })?;

        Ok(inserted.0)
    }

    /// Look up a user by national ID
    pub async fn find_by_dni(pool: &PgPool, dni: &str) -> Result<Option<Usuario>, ApiError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id, nombre, dni, correo, password, rol, fecha_creacion
            FROM usuarios
            WHERE dni = $1
            "#,
        )
        .bind(dni)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch user by dni: {}", e);
            ApiError::from(e)
        })?;

        Ok(usuario)
    }

    /// Look up a user by surrogate id
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Usuario>, ApiError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id, nombre, dni, correo, password, rol, fecha_creacion
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch user {}: {}", id, e);
            ApiError::from(e)
        })?;

        Ok(usuario)
    }
}
