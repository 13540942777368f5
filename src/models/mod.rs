// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export data model components

pub mod registro;
pub mod ruta;
pub mod usuario;

pub use registro::{CreateRegistroRequest, HistorialEntry, Registro, RegistroDetalle, RolGate};
pub use ruta::{CreateRutaRequest, Ruta};
pub use usuario::{LoginRequest, RegistroUsuarioRequest, Usuario, UsuarioResponse};
