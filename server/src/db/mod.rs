//! Capa de base de datos
//!
//! Una sola conexión al almacén embebido (SurrealDB) compartida por
//! todos los repositorios.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "barberia";
const DATABASE: &str = "barberia";

/// Servicio de base de datos, dueño del handle al almacén
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Abre (o crea) la base embebida en `db_path`
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let endpoint = db_path.to_string_lossy().to_string();
        let db = Surreal::new::<RocksDb>(endpoint)
            .await
            .map_err(|e| AppError::database(format!("No se pudo abrir la base de datos: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("No se pudo seleccionar la base: {e}")))?;

        tracing::info!(path = %db_path.display(), "Base de datos conectada (SurrealDB embebido)");

        Ok(Self { db })
    }
}
