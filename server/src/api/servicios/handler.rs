//! Handlers del API de servicios

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::api::citas::Mensaje;
use crate::core::ServerState;
use crate::db::models::{Servicio, ServicioCreate, ServicioUpdate};
use crate::utils::validation::{
    MAX_DESCRIPCION_LEN, MAX_NOMBRE_LEN, requerido, validar_longitud,
};
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicioCreado {
    pub mensaje: String,
    pub servicio_id: String,
    pub servicio: Servicio,
}

#[derive(Serialize)]
pub struct ServicioActualizado {
    pub mensaje: String,
    pub servicio: Servicio,
}

#[derive(Serialize)]
pub struct PublicadoCambiado {
    pub mensaje: String,
    pub publicado: bool,
}

/// GET /api/servicios - lista todos
pub async fn listar(State(state): State<ServerState>) -> AppResult<Json<Vec<Servicio>>> {
    let servicios = state.servicios.find_all().await?;
    Ok(Json(servicios))
}

/// POST /api/servicios - crear nuevo
pub async fn crear(
    State(state): State<ServerState>,
    Json(payload): Json<ServicioCreate>,
) -> AppResult<(StatusCode, Json<ServicioCreado>)> {
    let nombre = requerido(&payload.nombre)
        .ok_or_else(|| AppError::validation("El nombre del servicio es obligatorio."))?;
    validar_longitud(nombre, "nombre", MAX_NOMBRE_LEN)?;

    let descripcion = requerido(&payload.descripcion).unwrap_or("").to_string();
    validar_longitud(&descripcion, "descripción", MAX_DESCRIPCION_LEN)?;

    let servicio = state
        .servicios
        .create(
            nombre.to_string(),
            descripcion,
            payload.duracion_min,
            payload.precio,
            payload.publicado.unwrap_or(true),
        )
        .await?;

    tracing::info!(servicio_id = %servicio.servicio_id, nombre = %servicio.nombre, "Servicio creado");

    Ok((
        StatusCode::CREATED,
        Json(ServicioCreado {
            mensaje: "Servicio creado correctamente.".to_string(),
            servicio_id: servicio.servicio_id.clone(),
            servicio,
        }),
    ))
}

/// PUT /api/servicios/:id - editar datos
pub async fn actualizar(
    State(state): State<ServerState>,
    Path(servicio_id): Path<String>,
    Json(payload): Json<ServicioUpdate>,
) -> AppResult<Json<ServicioActualizado>> {
    if let Some(nombre) = &payload.nombre {
        validar_longitud(nombre.trim(), "nombre", MAX_NOMBRE_LEN)?;
    }
    if let Some(descripcion) = &payload.descripcion {
        validar_longitud(descripcion.trim(), "descripción", MAX_DESCRIPCION_LEN)?;
    }

    let servicio = state.servicios.update(&servicio_id, payload).await?;
    Ok(Json(ServicioActualizado {
        mensaje: "Servicio actualizado.".to_string(),
        servicio,
    }))
}

/// PATCH /api/servicios/:id/publicado - alternar publicado
pub async fn toggle_publicado(
    State(state): State<ServerState>,
    Path(servicio_id): Path<String>,
) -> AppResult<Json<PublicadoCambiado>> {
    let publicado = state.servicios.toggle_publicado(&servicio_id).await?;
    Ok(Json(PublicadoCambiado {
        mensaje: "Estado de publicación actualizado.".to_string(),
        publicado,
    }))
}

/// DELETE /api/servicios/:id
pub async fn eliminar(
    State(state): State<ServerState>,
    Path(servicio_id): Path<String>,
) -> AppResult<Json<Mensaje>> {
    state.servicios.delete(&servicio_id).await?;
    Ok(Mensaje::new("Servicio eliminado."))
}
