//! Configuración del servidor
//!
//! # Variables de entorno
//!
//! | Variable | Default | Descripción |
//! |----------|---------|-------------|
//! | WORK_DIR | /var/lib/barberia | Directorio de trabajo (base de datos, logs) |
//! | HTTP_PORT | 4000 | Puerto del API HTTP |
//! | ENVIRONMENT | development | Entorno de ejecución |
//! | LOG_DIR | (sin archivo) | Directorio de logs rotados por día |
//! | ADMIN_CORREO | admin@admin.com | Correo de la cuenta administradora sembrada |
//! | ADMIN_PASSWORD | admin | Contraseña inicial de esa cuenta |
//!
//! # Ejemplo
//!
//! ```ignore
//! WORK_DIR=/data/barberia HTTP_PORT=8080 cargo run
//! ```

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directorio de trabajo; la base vive en `<work_dir>/database`
    pub work_dir: String,
    /// Puerto del API HTTP
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Directorio de logs (opcional)
    pub log_dir: Option<String>,
    /// Correo de la cuenta administradora sembrada al arranque
    pub admin_correo: String,
    /// Contraseña inicial de la cuenta administradora
    pub admin_password: String,
}

impl Config {
    /// Carga la configuración desde variables de entorno, con defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/barberia".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            admin_correo: std::env::var("ADMIN_CORREO")
                .unwrap_or_else(|_| "admin@admin.com".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into()),
        }
    }

    /// Sobreescribe directorio y puerto; útil en pruebas
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directorio de la base de datos
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
