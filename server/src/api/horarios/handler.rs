//! Handlers del API de configuración de horarios

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{ConfigHorariosUpdate, HorarioSemanaDia};
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub horarios_semana: Vec<HorarioSemanaDia>,
    pub dias_no_disponibles: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigGuardada {
    pub mensaje: String,
    pub dias_no_disponibles: Vec<String>,
    pub horarios_semana: Vec<HorarioSemanaDia>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiasNoDisponibles {
    pub dias_no_disponibles: Vec<String>,
}

#[derive(Serialize)]
pub struct DiaBloqueado {
    pub fecha: String,
    pub bloqueado: bool,
}

/// GET /api/horarios/config - configuración global (se crea si no existe)
pub async fn obtener_config(
    State(state): State<ServerState>,
) -> AppResult<Json<ConfigResponse>> {
    let config = state.horarios.get_or_create().await?;
    Ok(Json(ConfigResponse {
        horarios_semana: config.horarios_semana,
        dias_no_disponibles: config.dias_no_disponibles,
    }))
}

/// PUT /api/horarios/config - guardar configuración global
pub async fn guardar_config(
    State(state): State<ServerState>,
    Json(payload): Json<ConfigHorariosUpdate>,
) -> AppResult<Json<ConfigGuardada>> {
    let config = state.horarios.guardar(payload).await?;
    tracing::info!(
        dias_bloqueados = config.dias_no_disponibles.len(),
        "Configuración de horarios guardada"
    );
    Ok(Json(ConfigGuardada {
        mensaje: "Configuración de horarios guardada.".to_string(),
        dias_no_disponibles: config.dias_no_disponibles,
        horarios_semana: config.horarios_semana,
    }))
}

/// GET /api/horarios/dias-no-disponibles - solo la lista de días bloqueados
pub async fn dias_no_disponibles(
    State(state): State<ServerState>,
) -> AppResult<Json<DiasNoDisponibles>> {
    let dias = state.horarios.dias_no_disponibles().await?;
    Ok(Json(DiasNoDisponibles {
        dias_no_disponibles: dias,
    }))
}

/// GET /api/horarios/dia-bloqueado/:fecha - ¿está bloqueado ese día?
pub async fn dia_bloqueado(
    State(state): State<ServerState>,
    Path(fecha): Path<String>,
) -> AppResult<Json<DiaBloqueado>> {
    if fecha.trim().is_empty() {
        return Err(AppError::validation("Fecha requerida"));
    }

    let bloqueado = state.horarios.esta_bloqueado(&fecha).await?;
    Ok(Json(DiaBloqueado { fecha, bloqueado }))
}
