// src/models/ruta.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Bus route: an origin/destination pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ruta {
    pub id: i32,
    pub origen: String,
    pub destino: String,
}

/// Request to create a new route
/// DOCUMENTATION: `rol` rides along in the body because the original client
/// has no auth token; admin gating happens on this field
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRutaRequest {
    #[validate(length(min = 1, message = "el origen es obligatorio"))]
    pub origen: String,

    #[validate(length(min = 1, message = "el destino es obligatorio"))]
    pub destino: String,

    pub rol: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_origin_is_rejected() {
        let req = CreateRutaRequest {
            origen: String::new(),
            destino: "Cusco".to_string(),
            rol: Some("admin".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn role_field_is_optional() {
        let req: CreateRutaRequest =
            serde_json::from_str(r#"{"origen":"Lima","destino":"Cusco"}"#).unwrap();
        assert!(req.rol.is_none());
        assert!(req.validate().is_ok());
    }
}
