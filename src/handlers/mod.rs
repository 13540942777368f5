// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod auth;
pub mod health;
pub mod registros;
pub mod rutas;

pub use auth::config as auth_config;
pub use health::config as health_config;
pub use registros::config as registros_config;
pub use rutas::config as rutas_config;
