//! Modelos de configuración de horarios y disponibilidad por día

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Plantilla semanal: un renglón por día de la semana
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorarioSemanaDia {
    pub dia: String,
    #[serde(default)]
    pub activo: bool,
    /// Hora de apertura "HH:MM"
    #[serde(default)]
    pub inicio: String,
    /// Hora de cierre "HH:MM"
    #[serde(default)]
    pub fin: String,
}

/// Singleton `config_horarios:config-global`
///
/// `dias_no_disponibles` es la fuente canónica de días bloqueados:
/// tanto el agendado como los endpoints de disponibilidad consultan
/// esta lista y ninguna otra.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigHorarios {
    #[serde(default)]
    pub horarios_semana: Vec<HorarioSemanaDia>,
    /// Fechas "YYYY-MM-DD" normalizadas y sin duplicados
    #[serde(default)]
    pub dias_no_disponibles: Vec<String>,
    #[serde(default)]
    pub actualizado_en: i64,
}

/// Payload de PUT /api/horarios/config
///
/// Entradas que no son arreglo se tratan como vacías, igual que en el
/// guardado original.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigHorariosUpdate {
    #[serde(default, deserialize_with = "serde_helpers::vec_o_vacio")]
    pub horarios_semana: Vec<HorarioSemanaDia>,
    #[serde(default, deserialize_with = "serde_helpers::vec_o_vacio")]
    pub dias_no_disponibles: Vec<String>,
}

/// Documento por día de la colección `horario` (clave = la fecha)
///
/// `horas_disponibles` funciona como conjunto: agendar quita la hora,
/// cancelar/eliminar/reagendar la regresa. Se crea implícitamente con
/// el primer movimiento que toca la fecha.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorarioDia {
    pub dia: String,
    #[serde(default)]
    pub horas_disponibles: Vec<String>,
}
