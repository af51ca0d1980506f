//! Barbería Server - backend de agendado de citas
//!
//! # Arquitectura
//!
//! API REST sobre un almacén de documentos embebido (SurrealDB). Una
//! cita existe en dos vistas (la colección global `cita` y el arreglo
//! embebido del cliente dueño) y toda mutación que toca ambas corre
//! en una transacción del almacén, junto con la disponibilidad por día.
//!
//! # Estructura de módulos
//!
//! ```text
//! server/src/
//! ├── core/       # Configuración, estado, servidor HTTP
//! ├── api/        # Rutas y handlers por recurso
//! ├── db/         # Conexión, modelos y repositorios
//! ├── services/   # Aprovisionamiento (cuenta administradora)
//! └── utils/      # Errores, log, fechas, validación
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export de tipos públicos
pub use crate::core::{Config, Server, ServerState, build_router};
pub use crate::utils::logger::{init_logger, init_logger_with_file};
pub use crate::utils::{AppError, AppResult};
