//! Utilidades de fecha y hora

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Timestamp UTC actual en milisegundos
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Normaliza un valor de fecha a `"YYYY-MM-DD"`.
///
/// Acepta fechas ya normalizadas, datetimes ISO-8601 con zona
/// ("2025-12-11T06:00:00.000Z") o sin zona. Devuelve `None` cuando el
/// valor no se puede interpretar como fecha de calendario.
pub fn normalizar_fecha_iso(valor: &str) -> Option<String> {
    let v = valor.trim();
    if v.is_empty() {
        return None;
    }
    if let Ok(fecha) = NaiveDate::parse_from_str(v, "%Y-%m-%d") {
        return Some(fecha.format("%Y-%m-%d").to_string());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(v) {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date().format("%Y-%m-%d").to_string());
    }
    None
}

/// Valida una hora en formato 24 horas "HH:MM"
pub fn hora_valida(hora: &str) -> bool {
    hora.len() == 5 && NaiveTime::parse_from_str(hora, "%H:%M").is_ok()
}
