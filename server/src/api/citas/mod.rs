//! API de citas

mod handler;

pub use handler::Mensaje;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/citas", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::crear))
        .route("/usuario/{correo}", get(handler::por_usuario))
        .route("/mis-citas", get(handler::mis_citas))
        .route("/admin", get(handler::todas))
        .route("/{cita_id}", put(handler::actualizar).delete(handler::eliminar))
        .route("/{cita_id}/cancelar", put(handler::cancelar))
        .route("/{cita_id}/finalizar", put(handler::finalizar))
}
