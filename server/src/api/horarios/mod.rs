//! API de configuración de horarios

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/horarios", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/config",
            get(handler::obtener_config).put(handler::guardar_config),
        )
        .route("/dias-no-disponibles", get(handler::dias_no_disponibles))
        .route("/dia-bloqueado/{fecha}", get(handler::dia_bloqueado))
}
