// src/handlers/health.rs
// DOCUMENTATION: Health check and root banner handlers
// PURPOSE: Simple endpoints to verify service status

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "registro-pasajeros",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn root_banner() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "API de Registro de Pasajeros funcionando correctamente"
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/", web::get().to(root_banner));
}
