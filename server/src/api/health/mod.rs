//! Rutas de salud
//!
//! | Ruta | Método | Descripción |
//! |------|--------|-------------|
//! | /health | GET | Chequeo simple |
//! | /health/detailed | GET | Chequeo con componentes y uptime |
//! | /api/test | GET | Ping histórico del backend |

use std::time::SystemTime;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
        .route("/api/test", get(test_ping))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn ok_with_latency(latency_ms: u64) -> Self {
        Self {
            status: "ok",
            latency_ms: Some(latency_ms),
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            message: Some(message.into()),
        }
    }
}

// Momento de arranque del servidor
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let inicio = std::time::Instant::now();
    let db_check = match state.db.query("RETURN 1").await {
        Ok(_) => CheckResult::ok_with_latency(inicio.elapsed().as_millis() as u64),
        Err(e) => CheckResult::error(format!("Database error: {e}")),
    };

    let status = if db_check.status == "ok" {
        "healthy"
    } else {
        "degraded"
    };

    Json(DetailedHealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: uptime_seconds(),
        checks: HealthChecks { database: db_check },
    })
}

#[derive(Serialize)]
pub struct TestPing {
    ok: bool,
    mensaje: &'static str,
}

/// Ruta de prueba que el frontend usa para verificar el backend
pub async fn test_ping() -> Json<TestPing> {
    Json(TestPing {
        ok: true,
        mensaje: "Backend funcionando correctamente",
    })
}
