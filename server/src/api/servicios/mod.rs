//! API del catálogo de servicios

mod handler;

use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/servicios", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::listar).post(handler::crear))
        .route("/{id}", put(handler::actualizar).delete(handler::eliminar))
        .route("/{id}/publicado", patch(handler::toggle_publicado))
}
