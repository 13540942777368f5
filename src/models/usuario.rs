// src/models/usuario.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Registered user (passenger or admin)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: i32,
    pub nombre: String,
    pub dni: String,
    pub correo: String,
    /// SHA-256 hex digest, never serialized out
    #[serde(skip_serializing)]
    pub password: String,
    pub rol: String,
    pub fecha_creacion: DateTime<Utc>,
}

/// Request to register a new user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegistroUsuarioRequest {
    #[validate(length(min = 3, message = "el nombre debe tener al menos 3 caracteres"))]
    pub nombre: String,

    #[validate(custom = "validate_dni")]
    pub dni: String,

    #[validate(email(message = "correo no válido"))]
    pub correo: String,

    #[validate(length(min = 6, message = "la contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
}

/// Login credentials
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "validate_dni")]
    pub dni: String,

    #[validate(length(min = 1, message = "la contraseña es obligatoria"))]
    pub password: String,
}

/// User DTO exposed via API (no password hash)
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioResponse {
    pub id: i32,
    pub nombre: String,
    pub dni: String,
    pub correo: String,
    pub rol: String,
}

impl Usuario {
    /// Convert database user into API response
    pub fn to_response(&self) -> UsuarioResponse {
        UsuarioResponse {
            id: self.id,
            nombre: self.nombre.clone(),
            dni: self.dni.clone(),
            correo: self.correo.clone(),
            rol: self.rol.clone(),
        }
    }
}

/// National ID: exactly 8 decimal digits
fn validate_dni(dni: &str) -> Result<(), ValidationError> {
    if dni.len() == 8 && dni.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("dni_invalido"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegistroUsuarioRequest {
        RegistroUsuarioRequest {
            nombre: "Ana Torres".to_string(),
            dni: "12345678".to_string(),
            correo: "ana@example.com".to_string(),
            password: "secreto1".to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn short_name_is_rejected() {
        let mut req = valid_request();
        req.nombre = "An".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn dni_must_be_eight_digits() {
        let mut req = valid_request();
        req.dni = "1234567".to_string();
        assert!(req.validate().is_err());

        req.dni = "1234567a".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut req = valid_request();
        req.correo = "no-es-un-correo".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn response_never_carries_the_hash() {
        let usuario = Usuario {
            id: 1,
            nombre: "Ana Torres".to_string(),
            dni: "12345678".to_string(),
            correo: "ana@example.com".to_string(),
            password: "deadbeef".to_string(),
            rol: "pasajero".to_string(),
            fecha_creacion: Utc::now(),
        };
        let json = serde_json::to_value(usuario.to_response()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["rol"], "pasajero");
    }
}
