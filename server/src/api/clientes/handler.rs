//! Handlers del API de clientes

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::api::citas::Mensaje;
use crate::core::ServerState;
use crate::db::models::{
    Cliente, ClienteRegistro, ClienteUpdate, LoginRequest, LoginResponse,
};
use crate::db::repository::RegistroCliente;
use crate::utils::validation::{
    MAX_CORREO_LEN, MAX_NOMBRE_LEN, MAX_PASSWORD_LEN, MAX_TELEFONO_LEN, requerido,
    validar_longitud,
};
use crate::utils::{AppError, AppResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteRegistrado {
    pub mensaje: String,
    pub cliente_id: String,
}

#[derive(Deserialize)]
pub struct CambioEstado {
    #[serde(default)]
    pub activo: Option<bool>,
}

/// POST /api/clientes - registrar cliente (admin o registro público)
pub async fn registrar(
    State(state): State<ServerState>,
    Json(payload): Json<ClienteRegistro>,
) -> AppResult<(StatusCode, Json<ClienteRegistrado>)> {
    let faltan = || {
        AppError::validation("Nombre, correo, teléfono y contraseña son obligatorios")
    };
    let nombre = requerido(&payload.nombre).ok_or_else(faltan)?;
    let correo = requerido(&payload.correo).ok_or_else(faltan)?;
    let telefono = requerido(&payload.telefono).ok_or_else(faltan)?;
    let password = requerido(&payload.password).ok_or_else(faltan)?;

    validar_longitud(nombre, "nombre", MAX_NOMBRE_LEN)?;
    validar_longitud(correo, "correo", MAX_CORREO_LEN)?;
    validar_longitud(telefono, "teléfono", MAX_TELEFONO_LEN)?;
    validar_longitud(password, "contraseña", MAX_PASSWORD_LEN)?;

    let correo_normalizado = correo.to_lowercase();

    let registro = state
        .clientes
        .registrar(nombre, &correo_normalizado, telefono, password)
        .await?;

    let (status, mensaje, cliente) = match registro {
        RegistroCliente::Creado(c) => {
            (StatusCode::CREATED, "Cliente creado correctamente", c)
        }
        RegistroCliente::Completado(c) => (
            StatusCode::OK,
            "Cliente actualizado correctamente (se activó la cuenta).",
            c,
        ),
    };

    tracing::info!(cliente_id = %cliente.cliente_id, "Cliente registrado");

    Ok((
        status,
        Json(ClienteRegistrado {
            mensaje: mensaje.to_string(),
            cliente_id: cliente.cliente_id,
        }),
    ))
}

/// POST /api/clientes/login
///
/// Mismo camino de verificación para todas las cuentas; el
/// administrador es una cuenta sembrada al arranque, no un caso
/// especial.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let faltan = || AppError::validation("Correo y contraseña son obligatorios");
    let correo = requerido(&payload.correo).ok_or_else(faltan)?;
    let password = requerido(&payload.password).ok_or_else(faltan)?;

    let cliente = state
        .clientes
        .find_by_correo(correo)
        .await?
        .ok_or_else(|| AppError::not_found("Cliente no encontrado"))?;

    if !cliente.activo {
        return Err(AppError::forbidden(
            "Tu cuenta está inactiva. Contacta a la barbería.",
        ));
    }

    if cliente.password_hash.is_none() {
        return Err(AppError::unauthorized(
            "Este cliente aún no tiene contraseña registrada. \
             Pide al administrador que active tu cuenta.",
        ));
    }

    let valida = cliente
        .verify_password(password)
        .map_err(|e| AppError::internal(format!("Fallo al verificar contraseña: {e}")))?;
    if !valida {
        tracing::warn!(correo = %correo, "Login rechazado - contraseña incorrecta");
        return Err(AppError::unauthorized("Contraseña incorrecta."));
    }

    tracing::info!(cliente_id = %cliente.cliente_id, rol = ?cliente.rol, "Login correcto");

    Ok(Json(LoginResponse {
        mensaje: "Login correcto".to_string(),
        cliente_id: cliente.cliente_id,
        nombre: cliente.nombre,
        correo: cliente.correo,
        telefono: cliente.telefono,
        rol: cliente.rol,
    }))
}

/// GET /api/clientes - listado para el panel
pub async fn listar(State(state): State<ServerState>) -> AppResult<Json<Vec<Cliente>>> {
    let clientes = state.clientes.find_all().await?;
    Ok(Json(clientes))
}

/// PUT /api/clientes/:id - actualizar datos
pub async fn actualizar(
    State(state): State<ServerState>,
    Path(cliente_id): Path<String>,
    Json(payload): Json<ClienteUpdate>,
) -> AppResult<Json<Mensaje>> {
    let faltan = || AppError::validation("Nombre, correo y teléfono son obligatorios");
    let nombre = requerido(&payload.nombre).ok_or_else(faltan)?;
    let correo = requerido(&payload.correo).ok_or_else(faltan)?;
    let telefono = requerido(&payload.telefono).ok_or_else(faltan)?;

    validar_longitud(nombre, "nombre", MAX_NOMBRE_LEN)?;
    validar_longitud(correo, "correo", MAX_CORREO_LEN)?;
    validar_longitud(telefono, "teléfono", MAX_TELEFONO_LEN)?;

    let correo_normalizado = correo.to_lowercase();

    // contraseña en blanco = no cambiar
    let password_hash = match requerido(&payload.password) {
        Some(password) => {
            validar_longitud(password, "contraseña", MAX_PASSWORD_LEN)?;
            Some(Cliente::hash_password(password).map_err(|e| {
                AppError::internal(format!("No se pudo hashear la contraseña: {e}"))
            })?)
        }
        None => None,
    };

    state
        .clientes
        .update(&cliente_id, nombre, &correo_normalizado, telefono, password_hash)
        .await?;
    Ok(Mensaje::new("Cliente actualizado correctamente"))
}

/// PATCH /api/clientes/:id/estado - activar / desactivar
pub async fn cambiar_estado(
    State(state): State<ServerState>,
    Path(cliente_id): Path<String>,
    Json(payload): Json<CambioEstado>,
) -> AppResult<Json<Mensaje>> {
    let activo = payload
        .activo
        .ok_or_else(|| AppError::validation("El campo 'activo' debe ser booleano"))?;

    state.clientes.cambiar_estado(&cliente_id, activo).await?;
    Ok(Mensaje::new("Estado del cliente actualizado correctamente"))
}

/// DELETE /api/clientes/:id - eliminar cliente y sus citas
pub async fn eliminar(
    State(state): State<ServerState>,
    Path(cliente_id): Path<String>,
) -> AppResult<Json<Mensaje>> {
    state.clientes.delete(&cliente_id).await?;
    tracing::info!(cliente_id = %cliente_id, "Cliente eliminado");
    Ok(Mensaje::new("Cliente eliminado correctamente"))
}
