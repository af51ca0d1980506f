//! Modelo de citas

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Estado de una cita
///
/// `Cancelada` y `Finalizada` son terminales: ninguna transición
/// regresa a `Activa`, y cancelar/finalizar una cita terminal se
/// rechaza con conflicto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoCita {
    #[serde(rename = "active")]
    Activa,
    #[serde(rename = "cancelled")]
    Cancelada,
    #[serde(rename = "finalized")]
    Finalizada,
}

impl EstadoCita {
    pub fn es_terminal(self) -> bool {
        !matches!(self, EstadoCita::Activa)
    }

    /// Valor tal como se almacena y se expone en el API
    pub fn as_str(self) -> &'static str {
        match self {
            EstadoCita::Activa => "active",
            EstadoCita::Cancelada => "cancelled",
            EstadoCita::Finalizada => "finalized",
        }
    }
}

/// Documento de la colección global `cita`
///
/// `servicio` es el nombre copiado al agendar, no una referencia:
/// renombrar un servicio no cambia citas existentes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cita {
    pub cita_id: String,
    pub cliente_id: String,
    pub nombre_cliente: String,
    pub telefono: String,
    #[serde(default)]
    pub correo: Option<String>,
    /// Fecha de calendario "YYYY-MM-DD"
    pub fecha: String,
    /// Hora en formato 24h "HH:MM"
    pub hora: String,
    pub servicio: String,
    pub estado: EstadoCita,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub recordatorio_enviado: bool,
    pub fecha_registro: i64,
}

/// Entrada del arreglo embebido `citas` de un cliente
///
/// Copia desnormalizada de [`Cita`]; toda mutación de una cita debe
/// mantener ambas vistas de acuerdo (se actualizan en una misma
/// transacción).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitaResumen {
    pub cita_id: String,
    pub fecha: String,
    pub hora: String,
    pub servicio: String,
    pub estado: EstadoCita,
    pub fecha_registro: i64,
}

/// Payload de POST /api/citas
///
/// Los campos son opcionales para poder responder el 400 con mensaje
/// propio en lugar del rechazo genérico del deserializador.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitaCreate {
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub hora: Option<String>,
    #[serde(default)]
    pub servicio_nombre: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
}

/// Payload de PUT /api/citas/:citaId (actualización parcial)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitaUpdate {
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub hora: Option<String>,
    #[serde(default)]
    pub servicio_nombre: Option<String>,
}

/// Proyección de GET /api/citas/usuario/:correo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitaUsuario {
    pub cita_id: String,
    pub servicio: String,
    pub fecha: String,
    pub hora: String,
    pub nombre_cliente: String,
    pub estado: EstadoCita,
}
