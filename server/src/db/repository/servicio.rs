//! Repositorio del catálogo de servicios

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Servicio, ServicioUpdate};
use crate::utils::time::now_millis;

const TABLE: &str = "servicio";

#[derive(Clone)]
pub struct ServicioRepository {
    base: BaseRepository,
}

impl ServicioRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Todos los servicios, los creados más recientemente primero
    pub async fn find_all(&self) -> RepoResult<Vec<Servicio>> {
        let servicios: Vec<Servicio> = self
            .base
            .db()
            .query("SELECT * FROM servicio ORDER BY creadoEn DESC")
            .await?
            .take(0)?;
        Ok(servicios)
    }

    pub async fn find_by_id(&self, servicio_id: &str) -> RepoResult<Option<Servicio>> {
        let servicio: Option<Servicio> = self.base.db().select((TABLE, servicio_id)).await?;
        Ok(servicio)
    }

    /// Alta de servicio; los valores numéricos ya vienen coercionados
    pub async fn create(
        &self,
        nombre: String,
        descripcion: String,
        duracion_min: u32,
        precio: f64,
        publicado: bool,
    ) -> RepoResult<Servicio> {
        let now = now_millis();
        let servicio = Servicio {
            servicio_id: Uuid::new_v4().simple().to_string(),
            nombre,
            descripcion,
            duracion_min,
            precio,
            publicado,
            creado_en: now,
            actualizado_en: now,
        };

        let rid = RecordId::from_table_key(TABLE, &servicio.servicio_id);
        let created: Option<Servicio> = self.base.db().create(rid).content(servicio).await?;
        created.ok_or_else(|| RepoError::Database("No se pudo crear el servicio".to_string()))
    }

    /// Actualización parcial
    pub async fn update(&self, servicio_id: &str, data: ServicioUpdate) -> RepoResult<Servicio> {
        if self.find_by_id(servicio_id).await?.is_none() {
            return Err(RepoError::NotFound("Servicio no encontrado.".to_string()));
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ServicioUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            nombre: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            descripcion: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            duracion_min: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            precio: Option<f64>,
            actualizado_en: i64,
        }

        let update_data = ServicioUpdateDb {
            nombre: data.nombre.map(|n| n.trim().to_string()),
            descripcion: data.descripcion.map(|d| d.trim().to_string()),
            duracion_min: data.duracion_min,
            precio: data.precio,
            actualizado_en: now_millis(),
        };

        let rid = RecordId::from_table_key(TABLE, servicio_id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $rid MERGE $data RETURN AFTER")
            .bind(("rid", rid))
            .bind(("data", update_data))
            .await?;

        let actualizado: Option<Servicio> = result.take(0)?;
        actualizado.ok_or_else(|| RepoError::NotFound("Servicio no encontrado.".to_string()))
    }

    /// Invierte la bandera de publicado y devuelve el nuevo valor
    pub async fn toggle_publicado(&self, servicio_id: &str) -> RepoResult<bool> {
        let servicio = self
            .find_by_id(servicio_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Servicio no encontrado.".to_string()))?;

        let nuevo = !servicio.publicado;
        let rid = RecordId::from_table_key(TABLE, servicio_id);
        self.base
            .db()
            .query("UPDATE $rid SET publicado = $publicado, actualizadoEn = $now")
            .bind(("rid", rid))
            .bind(("publicado", nuevo))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(nuevo)
    }

    /// Borrado definitivo
    pub async fn delete(&self, servicio_id: &str) -> RepoResult<()> {
        let eliminado: Option<Servicio> = self.base.db().delete((TABLE, servicio_id)).await?;
        if eliminado.is_none() {
            return Err(RepoError::NotFound("Servicio no encontrado.".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::local::Mem;

    async fn repo() -> ServicioRepository {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        ServicioRepository::new(db)
    }

    #[tokio::test]
    async fn alta_y_listado() {
        let repo = repo().await;
        let servicio = repo
            .create("Corte de Pelo".into(), "Clásico".into(), 45, 150.0, true)
            .await
            .unwrap();
        assert!(servicio.publicado);
        assert_eq!(servicio.duracion_min, 45);

        let todos = repo.find_all().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].nombre, "Corte de Pelo");
    }

    #[tokio::test]
    async fn actualizacion_parcial_conserva_el_resto() {
        let repo = repo().await;
        let servicio = repo
            .create("Afeitado".into(), String::new(), 30, 80.0, true)
            .await
            .unwrap();

        let actualizado = repo
            .update(
                &servicio.servicio_id,
                ServicioUpdate {
                    precio: Some(95.0),
                    ..ServicioUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(actualizado.precio, 95.0);
        assert_eq!(actualizado.nombre, "Afeitado");
        assert_eq!(actualizado.duracion_min, 30);
        assert!(actualizado.actualizado_en >= servicio.actualizado_en);
    }

    #[tokio::test]
    async fn toggle_publicado_invierte() {
        let repo = repo().await;
        let servicio = repo
            .create("Tinte".into(), String::new(), 60, 300.0, true)
            .await
            .unwrap();

        assert!(!repo.toggle_publicado(&servicio.servicio_id).await.unwrap());
        assert!(repo.toggle_publicado(&servicio.servicio_id).await.unwrap());
    }

    #[tokio::test]
    async fn operaciones_sobre_inexistente_son_not_found() {
        let repo = repo().await;
        assert!(matches!(
            repo.delete("nope").await.unwrap_err(),
            RepoError::NotFound(_)
        ));
        assert!(matches!(
            repo.toggle_publicado("nope").await.unwrap_err(),
            RepoError::NotFound(_)
        ));
        assert!(matches!(
            repo.update("nope", ServicioUpdate::default())
                .await
                .unwrap_err(),
            RepoError::NotFound(_)
        ));
    }
}
