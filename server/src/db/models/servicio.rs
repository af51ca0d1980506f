//! Modelo del catálogo de servicios

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Documento de la colección `servicio`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Servicio {
    pub servicio_id: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    /// Duración en minutos
    #[serde(default)]
    pub duracion_min: u32,
    #[serde(default)]
    pub precio: f64,
    /// Visible para agendar; por defecto publicado
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub publicado: bool,
    pub creado_en: i64,
    pub actualizado_en: i64,
}

fn default_true() -> bool {
    true
}

/// Payload de POST /api/servicios
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicioCreate {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::numero_u32_laxo")]
    pub duracion_min: u32,
    #[serde(default, deserialize_with = "serde_helpers::numero_f64_laxo")]
    pub precio: f64,
    #[serde(default)]
    pub publicado: Option<bool>,
}

/// Payload de PUT /api/servicios/:id (actualización parcial)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicioUpdate {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::opt_numero_u32_laxo")]
    pub duracion_min: Option<u32>,
    #[serde(default, deserialize_with = "serde_helpers::opt_numero_f64_laxo")]
    pub precio: Option<f64>,
}
