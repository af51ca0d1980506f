//! Estado compartido del servidor

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    CitaRepository, ClienteRepository, ConfigHorariosRepository, ServicioRepository,
};
use crate::services::ProvisioningService;
use crate::utils::AppError;

/// Estado del servidor: referencias compartidas a configuración,
/// almacén y repositorios. `Clone` es barato, todos los campos son
/// handles.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub citas: CitaRepository,
    pub clientes: ClienteRepository,
    pub servicios: ServicioRepository,
    pub horarios: ConfigHorariosRepository,
}

impl ServerState {
    /// Construye el estado sobre un handle ya abierto
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self {
            citas: CitaRepository::new(db.clone()),
            clientes: ClienteRepository::new(db.clone()),
            servicios: ServicioRepository::new(db.clone()),
            horarios: ConfigHorariosRepository::new(db.clone()),
            config,
            db,
        }
    }

    /// Inicialización completa:
    ///
    /// 1. Asegura la estructura del directorio de trabajo
    /// 2. Abre la base embebida en `<work_dir>/database`
    /// 3. Siembra la cuenta administradora si no existe
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).map_err(|e| {
            AppError::internal(format!(
                "No se pudo crear el directorio de trabajo {}: {e}",
                db_dir.display()
            ))
        })?;

        let db_service = DbService::new(&db_dir.join("barberia.db")).await?;
        let state = Self::new(config.clone(), db_service.db);

        ProvisioningService::new(state.clone())
            .ensure_admin_account()
            .await?;

        Ok(state)
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
