//! Handlers del API de citas

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Cita, CitaCreate, CitaUpdate, CitaUsuario};
use crate::utils::time::hora_valida;
use crate::utils::validation::{opcional, requerido};
use crate::utils::{AppError, AppResult};

#[derive(Deserialize)]
pub struct CorreoQuery {
    #[serde(default)]
    pub correo: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitaCreada {
    pub mensaje: String,
    pub cita_id: String,
}

#[derive(Serialize)]
pub struct Mensaje {
    pub mensaje: String,
}

impl Mensaje {
    pub fn new(mensaje: impl Into<String>) -> Json<Self> {
        Json(Self {
            mensaje: mensaje.into(),
        })
    }
}

/// POST /api/citas - agendar una cita
pub async fn crear(
    State(state): State<ServerState>,
    Json(payload): Json<CitaCreate>,
) -> AppResult<(StatusCode, Json<CitaCreada>)> {
    let faltan = || AppError::validation("Faltan datos de la cita");
    let fecha = requerido(&payload.fecha).ok_or_else(faltan)?;
    let hora = requerido(&payload.hora).ok_or_else(faltan)?;
    let servicio = requerido(&payload.servicio_nombre).ok_or_else(faltan)?;
    let nombre = requerido(&payload.nombre).ok_or_else(faltan)?;
    let telefono = requerido(&payload.telefono).ok_or_else(faltan)?;

    if !hora_valida(hora) {
        return Err(AppError::validation(
            "La hora debe estar en formato 24 horas (HH:MM)",
        ));
    }

    let cita_id = state
        .citas
        .crear(fecha, hora, servicio, nombre, telefono, opcional(&payload.correo))
        .await?;

    tracing::info!(cita_id = %cita_id, fecha = %fecha, hora = %hora, "Cita agendada");

    Ok((
        StatusCode::CREATED,
        Json(CitaCreada {
            mensaje: "Cita creada correctamente".to_string(),
            cita_id,
        }),
    ))
}

/// GET /api/citas/usuario/:correo - citas de un usuario
pub async fn por_usuario(
    State(state): State<ServerState>,
    Path(correo): Path<String>,
) -> AppResult<Json<Vec<CitaUsuario>>> {
    listar_de_usuario(&state, Some(correo)).await
}

/// GET /api/citas/mis-citas?correo= - misma consulta vía query string
pub async fn mis_citas(
    State(state): State<ServerState>,
    Query(query): Query<CorreoQuery>,
) -> AppResult<Json<Vec<CitaUsuario>>> {
    listar_de_usuario(&state, query.correo).await
}

async fn listar_de_usuario(
    state: &ServerState,
    correo: Option<String>,
) -> AppResult<Json<Vec<CitaUsuario>>> {
    let correo = requerido(&correo).ok_or_else(|| AppError::validation("Correo requerido"))?;
    let citas = state.citas.listar_por_correo(correo).await?;
    Ok(Json(citas))
}

/// GET /api/citas/admin - todas las citas para el panel
pub async fn todas(State(state): State<ServerState>) -> AppResult<Json<Vec<Cita>>> {
    let citas = state.citas.listar_todas().await?;
    Ok(Json(citas))
}

/// PUT /api/citas/:citaId - modificar / reagendar
pub async fn actualizar(
    State(state): State<ServerState>,
    Path(cita_id): Path<String>,
    Json(payload): Json<CitaUpdate>,
) -> AppResult<Json<Mensaje>> {
    if let Some(hora) = requerido(&payload.hora)
        && !hora_valida(hora)
    {
        return Err(AppError::validation(
            "La hora debe estar en formato 24 horas (HH:MM)",
        ));
    }

    state.citas.actualizar(&cita_id, payload).await?;
    Ok(Mensaje::new("Cita actualizada correctamente"))
}

/// PUT /api/citas/:citaId/cancelar
pub async fn cancelar(
    State(state): State<ServerState>,
    Path(cita_id): Path<String>,
) -> AppResult<Json<Mensaje>> {
    state.citas.cancelar(&cita_id).await?;
    tracing::info!(cita_id = %cita_id, "Cita cancelada");
    Ok(Mensaje::new("Cita cancelada correctamente"))
}

/// PUT /api/citas/:citaId/finalizar
pub async fn finalizar(
    State(state): State<ServerState>,
    Path(cita_id): Path<String>,
) -> AppResult<Json<Mensaje>> {
    state.citas.finalizar(&cita_id).await?;
    Ok(Mensaje::new("Cita marcada como finalizada"))
}

/// DELETE /api/citas/:citaId
pub async fn eliminar(
    State(state): State<ServerState>,
    Path(cita_id): Path<String>,
) -> AppResult<Json<Mensaje>> {
    state.citas.eliminar(&cita_id).await?;
    tracing::info!(cita_id = %cita_id, "Cita eliminada");
    Ok(Mensaje::new("Cita eliminada correctamente"))
}
