//! Inicialización del log
//!
//! Salida estructurada vía `tracing`, con filtro configurable por
//! `RUST_LOG` y archivo rotativo diario opcional.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Inicializa el logger con la configuración por defecto (stdout, nivel info)
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Inicializa el logger, opcionalmente escribiendo a un directorio de logs.
///
/// `RUST_LOG` tiene prioridad sobre `log_level`. Si `log_dir` apunta a un
/// directorio existente, se escribe un archivo rotado por día.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let nivel = log_level.unwrap_or("info");
    let filtro = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(nivel));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filtro)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let ruta = Path::new(dir);
        if ruta.is_dir() {
            let appender = tracing_appender::rolling::daily(ruta, "barberia-server");
            subscriber.with_writer(appender).init();
            return;
        }
    }

    subscriber.init();
}
