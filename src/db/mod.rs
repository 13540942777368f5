// src/db/mod.rs
// DOCUMENTATION: Database access layer organization
// PURPOSE: Re-export schema initializer and repositories

pub mod registro_repository;
pub mod ruta_repository;
pub mod schema;
pub mod usuario_repository;

pub use registro_repository::RegistroRepository;
pub use ruta_repository::RutaRepository;
pub use usuario_repository::UsuarioRepository;
