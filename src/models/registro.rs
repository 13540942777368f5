// src/models/registro.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Trip registration linking a user and a route; append-only
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Registro {
    pub id: i32,
    pub usuario_id: i32,
    pub ruta_id: i32,
    pub fecha_registro: NaiveDate,
}

/// Request to register a trip for a passenger
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRegistroRequest {
    pub usuario_id: i32,
    pub ruta_id: i32,
}

/// One row of a user's trip history, joined with the route
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HistorialEntry {
    pub id: i32,
    pub fecha_registro: NaiveDate,
    pub origen: String,
    pub destino: String,
}

/// Full registration listing row for the admin view
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegistroDetalle {
    pub id: i32,
    pub fecha_registro: NaiveDate,
    pub usuario_id: i32,
    pub nombre_usuario: String,
    pub dni: String,
    pub ruta_id: i32,
    pub origen: String,
    pub destino: String,
}

/// Body-field role gate used by the admin-only listing
#[derive(Debug, Clone, Deserialize)]
pub struct RolGate {
    pub rol: Option<String>,
}

impl RolGate {
    pub fn is_admin(&self) -> bool {
        self.rol.as_deref() == Some("admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_only_opens_for_admin() {
        assert!(RolGate {
            rol: Some("admin".to_string())
        }
        .is_admin());
        assert!(!RolGate {
            rol: Some("pasajero".to_string())
        }
        .is_admin());
        assert!(!RolGate { rol: None }.is_admin());
    }
}
