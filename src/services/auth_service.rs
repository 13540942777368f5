// src/services/auth_service.rs
// DOCUMENTATION: Signup and login business logic
// PURPOSE: Intermediary between handlers and the user repository

use crate::db::UsuarioRepository;
use crate::errors::ApiError;
use crate::models::{LoginRequest, RegistroUsuarioRequest, UsuarioResponse};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

pub struct AuthService;

impl AuthService {
    /// SHA-256 hex digest of a password
    pub fn hash_password(password: &str) -> String {
        let digest = Sha256::digest(password.as_bytes());
        hex::encode(digest)
    }

    fn verify_password(password: &str, stored_hash: &str) -> bool {
        Self::hash_password(password) == stored_hash
    }

    /// Register a new passenger
    pub async fn registrar(pool: &PgPool, req: RegistroUsuarioRequest) -> Result<i32, ApiError> {
        let hash = Self::hash_password(&req.password);
        let id = UsuarioRepository::create_usuario(pool, &req, &hash).await?;
        log::info!("User {} registered (dni {})", id, req.dni);
        Ok(id)
    }

    /// Authenticate by national ID and password
    /// DOCUMENTATION: Unknown dni is 404, wrong password is 401, matching
    /// the original API contract
    pub async fn login(pool: &PgPool, req: LoginRequest) -> Result<UsuarioResponse, ApiError> {
        let usuario = UsuarioRepository::find_by_dni(pool, &req.dni)
            .await?
            .ok_or_else(|| ApiError::NotFound("Usuario".to_string()))?;

        if !Self::verify_password(&req.password, &usuario.password) {
            return Err(ApiError::Unauthorized);
        }

        Ok(usuario.to_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_hex() {
        let a = AuthService::hash_password("secreto1");
        let b = AuthService::hash_password("secreto1");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_passwords_hash_differently() {
        assert_ne!(
            AuthService::hash_password("secreto1"),
            AuthService::hash_password("secreto2")
        );
    }

    #[test]
    fn verify_matches_only_the_original() {
        let hash = AuthService::hash_password("secreto1");
        assert!(AuthService::verify_password("secreto1", &hash));
        assert!(!AuthService::verify_password("secreto2", &hash));
    }
}
