//! Repositorio de clientes

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Cliente, RolCliente};
use crate::utils::time::now_millis;

const TABLE: &str = "cliente";

/// Resultado de un registro: cuenta nueva o cuenta completada en sitio
#[derive(Debug)]
pub enum RegistroCliente {
    Creado(Cliente),
    Completado(Cliente),
}

#[derive(Clone)]
pub struct ClienteRepository {
    base: BaseRepository,
}

impl ClienteRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, cliente_id: &str) -> RepoResult<Option<Cliente>> {
        let cliente: Option<Cliente> = self.base.db().select((TABLE, cliente_id)).await?;
        Ok(cliente)
    }

    pub async fn find_by_telefono(&self, telefono: &str) -> RepoResult<Option<Cliente>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cliente WHERE telefono = $telefono LIMIT 1")
            .bind(("telefono", telefono.to_string()))
            .await?;
        let clientes: Vec<Cliente> = result.take(0)?;
        Ok(clientes.into_iter().next())
    }

    pub async fn find_by_correo(&self, correo: &str) -> RepoResult<Option<Cliente>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cliente WHERE correo = $correo LIMIT 1")
            .bind(("correo", correo.to_string()))
            .await?;
        let clientes: Vec<Cliente> = result.take(0)?;
        Ok(clientes.into_iter().next())
    }

    async fn find_by_correo_o_telefono(
        &self,
        correo: &str,
        telefono: &str,
    ) -> RepoResult<Option<Cliente>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM cliente WHERE correo = $correo OR telefono = $telefono LIMIT 1",
            )
            .bind(("correo", correo.to_string()))
            .bind(("telefono", telefono.to_string()))
            .await?;
        let clientes: Vec<Cliente> = result.take(0)?;
        Ok(clientes.into_iter().next())
    }

    /// Todos los clientes, los registrados más recientemente primero
    pub async fn find_all(&self) -> RepoResult<Vec<Cliente>> {
        let clientes: Vec<Cliente> = self
            .base
            .db()
            .query("SELECT * FROM cliente ORDER BY fechaRegistro DESC")
            .await?
            .take(0)?;
        Ok(clientes)
    }

    /// Alta mínima usada por el flujo de agendado: busca por teléfono;
    /// si el cliente existe sobreescribe solo nombre y correo (el
    /// teléfono es la clave del match), si no lo crea sin contraseña.
    pub async fn upsert_por_telefono(
        &self,
        nombre: &str,
        telefono: &str,
        correo: Option<String>,
    ) -> RepoResult<Cliente> {
        if let Some(existente) = self.find_by_telefono(telefono).await? {
            let rid = RecordId::from_table_key(TABLE, &existente.cliente_id);
            let mut result = self
                .base
                .db()
                .query("UPDATE $rid SET nombre = $nombre, correo = $correo RETURN AFTER")
                .bind(("rid", rid))
                .bind(("nombre", nombre.to_string()))
                .bind(("correo", correo))
                .await?;
            let actualizado: Option<Cliente> = result.take(0)?;
            return actualizado.ok_or_else(|| {
                RepoError::Database("No se pudo actualizar el cliente".to_string())
            });
        }

        let cliente_id = Uuid::new_v4().simple().to_string();
        let rid = RecordId::from_table_key(TABLE, &cliente_id);
        let mut result = self
            .base
            .db()
            .query(
                "CREATE $rid SET clienteId = $cliente_id, nombre = $nombre, \
                 correo = $correo, telefono = $telefono, activo = true, \
                 rol = 'cliente', citas = [], fechaRegistro = $now RETURN AFTER",
            )
            .bind(("rid", rid))
            .bind(("cliente_id", cliente_id))
            .bind(("nombre", nombre.to_string()))
            .bind(("correo", correo))
            .bind(("telefono", telefono.to_string()))
            .bind(("now", now_millis()))
            .await?;
        let creado: Option<Cliente> = result.take(0)?;
        creado.ok_or_else(|| RepoError::Database("No se pudo crear el cliente".to_string()))
    }

    /// Alta completa con contraseña (registro y aprovisionamiento).
    ///
    /// El hash se escribe con una consulta explícita porque
    /// `passwordHash` está marcado `skip_serializing` en el modelo.
    pub async fn crear_con_password(
        &self,
        nombre: &str,
        correo: &str,
        telefono: &str,
        password: &str,
        rol: RolCliente,
    ) -> RepoResult<Cliente> {
        let hash = Cliente::hash_password(password)
            .map_err(|e| RepoError::Database(format!("No se pudo hashear la contraseña: {e}")))?;

        let cliente_id = Uuid::new_v4().simple().to_string();
        let rid = RecordId::from_table_key(TABLE, &cliente_id);
        let mut result = self
            .base
            .db()
            .query(
                "CREATE $rid SET clienteId = $cliente_id, nombre = $nombre, \
                 correo = $correo, telefono = $telefono, passwordHash = $hash, \
                 activo = true, rol = $rol, citas = [], fechaRegistro = $now \
                 RETURN AFTER",
            )
            .bind(("rid", rid))
            .bind(("cliente_id", cliente_id))
            .bind(("nombre", nombre.to_string()))
            .bind(("correo", correo.to_string()))
            .bind(("telefono", telefono.to_string()))
            .bind(("hash", hash))
            .bind(("rol", rol))
            .bind(("now", now_millis()))
            .await?;
        let creado: Option<Cliente> = result.take(0)?;
        creado.ok_or_else(|| RepoError::Database("No se pudo crear el cliente".to_string()))
    }

    /// Registro público o desde el panel.
    ///
    /// Busca por correo o teléfono: si no hay coincidencia crea la
    /// cuenta; si existe una cuenta sin contraseña la completa en
    /// sitio; si ya tiene contraseña es un duplicado.
    pub async fn registrar(
        &self,
        nombre: &str,
        correo: &str,
        telefono: &str,
        password: &str,
    ) -> RepoResult<RegistroCliente> {
        let existente = self.find_by_correo_o_telefono(correo, telefono).await?;

        let existente = match existente {
            None => {
                let creado = self
                    .crear_con_password(nombre, correo, telefono, password, RolCliente::Cliente)
                    .await?;
                return Ok(RegistroCliente::Creado(creado));
            }
            Some(c) => c,
        };

        if existente.password_hash.is_some() {
            return Err(RepoError::Duplicate(
                "Ya existe un cliente con ese correo o teléfono registrado.".to_string(),
            ));
        }

        let hash = Cliente::hash_password(password)
            .map_err(|e| RepoError::Database(format!("No se pudo hashear la contraseña: {e}")))?;

        let rid = RecordId::from_table_key(TABLE, &existente.cliente_id);
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $rid SET nombre = $nombre, correo = $correo, \
                 telefono = $telefono, passwordHash = $hash RETURN AFTER",
            )
            .bind(("rid", rid))
            .bind(("nombre", nombre.to_string()))
            .bind(("correo", correo.to_string()))
            .bind(("telefono", telefono.to_string()))
            .bind(("hash", hash))
            .await?;
        let completado: Option<Cliente> = result.take(0)?;
        completado
            .map(RegistroCliente::Completado)
            .ok_or_else(|| RepoError::Database("No se pudo completar la cuenta".to_string()))
    }

    /// Actualización desde el panel; `password_hash` ya viene hasheado
    pub async fn update(
        &self,
        cliente_id: &str,
        nombre: &str,
        correo: &str,
        telefono: &str,
        password_hash: Option<String>,
    ) -> RepoResult<Cliente> {
        if self.find_by_id(cliente_id).await?.is_none() {
            return Err(RepoError::NotFound("Cliente no encontrado".to_string()));
        }

        let rid = RecordId::from_table_key(TABLE, cliente_id);
        let sql = match password_hash {
            Some(_) => {
                "UPDATE $rid SET nombre = $nombre, correo = $correo, \
                 telefono = $telefono, passwordHash = $hash RETURN AFTER"
            }
            None => {
                "UPDATE $rid SET nombre = $nombre, correo = $correo, \
                 telefono = $telefono RETURN AFTER"
            }
        };

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("rid", rid))
            .bind(("nombre", nombre.to_string()))
            .bind(("correo", correo.to_string()))
            .bind(("telefono", telefono.to_string()));
        if let Some(hash) = password_hash {
            query = query.bind(("hash", hash));
        }

        let mut result = query.await?;
        let actualizado: Option<Cliente> = result.take(0)?;
        actualizado
            .ok_or_else(|| RepoError::Database("No se pudo actualizar el cliente".to_string()))
    }

    /// Activa o desactiva la cuenta
    pub async fn cambiar_estado(&self, cliente_id: &str, activo: bool) -> RepoResult<()> {
        if self.find_by_id(cliente_id).await?.is_none() {
            return Err(RepoError::NotFound("Cliente no encontrado".to_string()));
        }

        let rid = RecordId::from_table_key(TABLE, cliente_id);
        self.base
            .db()
            .query("UPDATE $rid SET activo = $activo")
            .bind(("rid", rid))
            .bind(("activo", activo))
            .await?
            .check()?;
        Ok(())
    }

    /// Elimina el cliente y en cascada sus citas globales
    pub async fn delete(&self, cliente_id: &str) -> RepoResult<()> {
        let existente = self
            .find_by_id(cliente_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Cliente no encontrado".to_string()))?;

        let rid = RecordId::from_table_key(TABLE, &existente.cliente_id);
        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 DELETE $rid; \
                 DELETE cita WHERE clienteId = $cliente_id; \
                 COMMIT TRANSACTION;",
            )
            .bind(("rid", rid))
            .bind(("cliente_id", existente.cliente_id.clone()))
            .await?
            .check()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::local::Mem;

    async fn repo() -> ClienteRepository {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        ClienteRepository::new(db)
    }

    #[tokio::test]
    async fn upsert_crea_y_luego_sobreescribe_nombre_y_correo() {
        let repo = repo().await;

        let creado = repo
            .upsert_por_telefono("Juan Pérez", "7551234567", None)
            .await
            .unwrap();
        assert_eq!(creado.nombre, "Juan Pérez");
        assert!(creado.citas.is_empty());
        assert!(creado.password_hash.is_none());

        let actualizado = repo
            .upsert_por_telefono("Juan P. Gómez", "7551234567", Some("juan@mail.com".into()))
            .await
            .unwrap();
        // mismo cliente, datos sobreescritos
        assert_eq!(actualizado.cliente_id, creado.cliente_id);
        assert_eq!(actualizado.nombre, "Juan P. Gómez");
        assert_eq!(actualizado.correo.as_deref(), Some("juan@mail.com"));
    }

    #[tokio::test]
    async fn registro_nuevo_y_duplicado() {
        let repo = repo().await;

        let registro = repo
            .registrar("Ana", "ana@mail.com", "5550001111", "secreta")
            .await
            .unwrap();
        let cliente = match registro {
            RegistroCliente::Creado(c) => c,
            RegistroCliente::Completado(_) => panic!("debió ser alta nueva"),
        };
        assert!(cliente.password_hash.is_some());
        assert!(cliente.verify_password("secreta").unwrap());

        // mismo teléfono, otro correo: la cuenta ya tiene contraseña → duplicado
        let err = repo
            .registrar("Ana Dos", "otra@mail.com", "5550001111", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn registro_completa_cuenta_sin_password() {
        let repo = repo().await;

        // cliente dado de alta por el flujo de agendado, sin contraseña
        repo.upsert_por_telefono("Luis", "5552223333", None)
            .await
            .unwrap();

        let registro = repo
            .registrar("Luis Mora", "luis@mail.com", "5552223333", "clave123")
            .await
            .unwrap();
        let cliente = match registro {
            RegistroCliente::Completado(c) => c,
            RegistroCliente::Creado(_) => panic!("debió completar la cuenta existente"),
        };
        assert_eq!(cliente.nombre, "Luis Mora");
        assert_eq!(cliente.correo.as_deref(), Some("luis@mail.com"));
        assert!(cliente.verify_password("clave123").unwrap());
    }

    #[tokio::test]
    async fn cambiar_estado_y_no_encontrado() {
        let repo = repo().await;
        let cliente = repo
            .upsert_por_telefono("Eva", "5559998888", None)
            .await
            .unwrap();

        repo.cambiar_estado(&cliente.cliente_id, false).await.unwrap();
        let leido = repo.find_by_id(&cliente.cliente_id).await.unwrap().unwrap();
        assert!(!leido.activo);

        let err = repo.cambiar_estado("no-existe", true).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
