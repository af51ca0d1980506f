//! Validación de entrada
//!
//! Los controladores del sistema original validaban campos con
//! truthiness de JavaScript; aquí el equivalente es "presente y no
//! vacío tras recortar espacios". Los límites de longitud protegen a
//! la base de datos de payloads desmedidos.

use crate::utils::AppError;

// ── Límites de longitud ─────────────────────────────────────────────

/// Nombres de entidades: clientes, servicios
pub const MAX_NOMBRE_LEN: usize = 200;

/// Correos electrónicos (RFC 5321)
pub const MAX_CORREO_LEN: usize = 254;

/// Teléfonos y otros identificadores cortos
pub const MAX_TELEFONO_LEN: usize = 100;

/// Contraseñas (antes de hashear)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Descripciones de servicios
pub const MAX_DESCRIPCION_LEN: usize = 500;

// ── Helpers ─────────────────────────────────────────────────────────

/// Devuelve el valor recortado cuando está presente y no vacío.
pub fn requerido(valor: &Option<String>) -> Option<&str> {
    valor.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Campo opcional: cadena vacía o ausente se trata como `None`.
pub fn opcional(valor: &Option<String>) -> Option<String> {
    requerido(valor).map(str::to_string)
}

/// Valida que un texto no exceda el límite de longitud.
pub fn validar_longitud(valor: &str, campo: &str, max: usize) -> Result<(), AppError> {
    if valor.len() > max {
        return Err(AppError::validation(format!(
            "{campo} demasiado largo ({} caracteres, máximo {max})",
            valor.len()
        )));
    }
    Ok(())
}
