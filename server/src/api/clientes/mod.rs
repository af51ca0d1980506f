//! API de clientes

mod handler;

use axum::{
    Router,
    routing::{patch, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/clientes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::registrar).get(handler::listar))
        .route("/login", post(handler::login))
        .route("/{id}", put(handler::actualizar).delete(handler::eliminar))
        .route("/{id}/estado", patch(handler::cambiar_estado))
}
