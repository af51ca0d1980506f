//! Manejo unificado de errores
//!
//! El API responde siempre con un cuerpo `{"mensaje": "..."}`:
//! los errores esperados (validación, no encontrado, duplicado, día
//! bloqueado) llevan su mensaje específico y un código 4xx; cualquier
//! fallo inesperado se registra en el log del servidor y se responde
//! con un 500 genérico.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Cuerpo de error del API
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub mensaje: String,
}

/// Error de aplicación
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Entrada inválida o incompleta (400)
    #[error("{0}")]
    Validation(String),

    /// Credenciales rechazadas (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Cuenta deshabilitada (403)
    #[error("{0}")]
    Forbidden(String),

    /// Recurso inexistente (404)
    #[error("{0}")]
    NotFound(String),

    /// Conflicto con el estado actual (409)
    #[error("{0}")]
    Conflict(String),

    /// Error del almacén de datos (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Error interno (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result con [`AppError`] como error
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(mensaje: impl Into<String>) -> Self {
        Self::Validation(mensaje.into())
    }

    pub fn unauthorized(mensaje: impl Into<String>) -> Self {
        Self::Unauthorized(mensaje.into())
    }

    pub fn forbidden(mensaje: impl Into<String>) -> Self {
        Self::Forbidden(mensaje.into())
    }

    pub fn not_found(mensaje: impl Into<String>) -> Self {
        Self::NotFound(mensaje.into())
    }

    pub fn conflict(mensaje: impl Into<String>) -> Self {
        Self::Conflict(mensaje.into())
    }

    pub fn database(detalle: impl Into<String>) -> Self {
        Self::Database(detalle.into())
    }

    pub fn internal(detalle: impl Into<String>) -> Self {
        Self::Internal(detalle.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, mensaje) = match self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, m),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, m),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m),
            AppError::Database(detalle) => {
                error!(target: "database", error = %detalle, "Error de base de datos");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error en el servidor".to_string(),
                )
            }
            AppError::Internal(detalle) => {
                error!(target: "internal", error = %detalle, "Error interno");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error en el servidor".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { mensaje })).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(m) => AppError::NotFound(m),
            RepoError::Duplicate(m) => AppError::Conflict(m),
            RepoError::Validation(m) => AppError::Validation(m),
            RepoError::EstadoTerminal(m) => AppError::Conflict(m),
            RepoError::Database(m) => AppError::Database(m),
        }
    }
}
