//! Aprovisionamiento
//!
//! Siembra la cuenta administradora al arranque. El login no tiene
//! ningún caso especial: el administrador se autentica por el mismo
//! camino de hash que cualquier cliente.

use crate::core::ServerState;
use crate::db::models::RolCliente;
use crate::utils::AppError;

pub struct ProvisioningService {
    state: ServerState,
}

impl ProvisioningService {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Crea la cuenta administradora si aún no existe
    pub async fn ensure_admin_account(&self) -> Result<(), AppError> {
        let correo = self.state.config.admin_correo.to_lowercase();

        if self.state.clientes.find_by_correo(&correo).await?.is_some() {
            return Ok(());
        }

        let admin = self
            .state
            .clientes
            .crear_con_password(
                "Administrador",
                &correo,
                "0000000000",
                &self.state.config.admin_password,
                RolCliente::Admin,
            )
            .await?;

        tracing::info!(
            cliente_id = %admin.cliente_id,
            correo = %correo,
            "Cuenta administradora sembrada"
        );
        Ok(())
    }
}
