//! Modelo de clientes

use serde::{Deserialize, Serialize};

use super::CitaResumen;
use super::serde_helpers;

/// Rol de un cliente en el sistema
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RolCliente {
    #[default]
    #[serde(rename = "cliente")]
    Cliente,
    #[serde(rename = "admin")]
    Admin,
}

/// Documento de la colección `cliente`
///
/// El arreglo `citas` es la vista embebida de las citas del cliente;
/// la colección global `cita` es la otra vista de los mismos datos.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub cliente_id: String,
    pub nombre: String,
    /// Correo normalizado a minúsculas en el registro
    #[serde(default)]
    pub correo: Option<String>,
    pub telefono: String,
    /// Hash argon2; nunca se serializa hacia afuera
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub activo: bool,
    #[serde(default)]
    pub rol: RolCliente,
    #[serde(default)]
    pub citas: Vec<CitaResumen>,
    pub fecha_registro: i64,
}

fn default_true() -> bool {
    true
}

impl Cliente {
    /// Verifica una contraseña contra el hash almacenado
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let hash = match &self.password_hash {
            Some(h) => h,
            None => return Ok(false),
        };
        let parsed = PasswordHash::new(hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Hashea una contraseña con argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }
}

/// Payload de POST /api/clientes (registro público o desde el panel)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteRegistro {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Payload de PUT /api/clientes/:id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClienteUpdate {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    /// Contraseña nueva; en blanco significa "no cambiar"
    #[serde(default)]
    pub password: Option<String>,
}

/// Payload de POST /api/clientes/login
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Respuesta de login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub mensaje: String,
    pub cliente_id: String,
    pub nombre: String,
    pub correo: Option<String>,
    pub telefono: String,
    pub rol: RolCliente,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cliente_con_hash(hash: Option<String>) -> Cliente {
        Cliente {
            cliente_id: "c1".into(),
            nombre: "Juan Pérez".into(),
            correo: Some("juan@example.com".into()),
            telefono: "7551234567".into(),
            password_hash: hash,
            activo: true,
            rol: RolCliente::Cliente,
            citas: Vec::new(),
            fecha_registro: 0,
        }
    }

    #[test]
    fn hash_y_verificacion() {
        let hash = Cliente::hash_password("secreta123").unwrap();
        let cliente = cliente_con_hash(Some(hash));
        assert!(cliente.verify_password("secreta123").unwrap());
        assert!(!cliente.verify_password("otra").unwrap());
    }

    #[test]
    fn sin_hash_nunca_verifica() {
        let cliente = cliente_con_hash(None);
        assert!(!cliente.verify_password("lo-que-sea").unwrap());
    }

    #[test]
    fn el_hash_no_se_serializa() {
        let cliente = cliente_con_hash(Some("hash-secreto".into()));
        let json = serde_json::to_string(&cliente).unwrap();
        assert!(!json.contains("hash-secreto"));
        assert!(!json.contains("passwordHash"));
    }

    #[test]
    fn rol_por_defecto_es_cliente() {
        let json = r#"{"clienteId":"c1","nombre":"Ana","telefono":"555","fechaRegistro":0}"#;
        let cliente: Cliente = serde_json::from_str(json).unwrap();
        assert_eq!(cliente.rol, RolCliente::Cliente);
        assert!(cliente.activo);
    }
}
