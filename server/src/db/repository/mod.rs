//! Repositorios
//!
//! Operaciones CRUD sobre las colecciones de SurrealDB. Cada
//! repositorio envuelve el mismo handle compartido; las mutaciones que
//! tocan más de un documento corren dentro de una transacción del
//! almacén para que las dos vistas de una cita no puedan divergir.

pub mod cita;
pub mod cliente;
pub mod horario;
pub mod servicio;

// Re-exports
pub use cita::CitaRepository;
pub use cliente::{ClienteRepository, RegistroCliente};
pub use horario::ConfigHorariosRepository;
pub use servicio::ServicioRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Errores de repositorio
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Validation(String),

    /// Transición rechazada: la cita ya está cancelada o finalizada
    #[error("{0}")]
    EstadoTerminal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result de las operaciones de repositorio
pub type RepoResult<T> = Result<T, RepoError>;

/// Repositorio base con la referencia al almacén
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
