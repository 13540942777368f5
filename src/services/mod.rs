// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export business logic components

pub mod auth_service;
pub mod registro_service;
pub mod ruta_service;

pub use auth_service::AuthService;
pub use registro_service::RegistroService;
pub use ruta_service::RutaService;
