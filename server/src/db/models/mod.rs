//! Modelos de datos

// Serde helpers
pub mod serde_helpers;

// Entidades
pub mod cita;
pub mod cliente;
pub mod horario;
pub mod servicio;

// Re-exports
pub use cita::{Cita, CitaCreate, CitaResumen, CitaUpdate, CitaUsuario, EstadoCita};
pub use cliente::{
    Cliente, ClienteRegistro, ClienteUpdate, LoginRequest, LoginResponse, RolCliente,
};
pub use horario::{ConfigHorarios, ConfigHorariosUpdate, HorarioDia, HorarioSemanaDia};
pub use servicio::{Servicio, ServicioCreate, ServicioUpdate};
