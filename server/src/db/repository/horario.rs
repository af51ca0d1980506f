//! Repositorio de configuración de horarios (singleton)

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{ConfigHorarios, ConfigHorariosUpdate, HorarioDia};
use crate::utils::time::{normalizar_fecha_iso, now_millis};

const TABLE: &str = "config_horarios";
const SINGLETON_ID: &str = "config-global";

/// Colección de disponibilidad por día (clave = fecha "YYYY-MM-DD")
pub(crate) const TABLA_HORARIO: &str = "horario";

#[derive(Clone)]
pub struct ConfigHorariosRepository {
    base: BaseRepository,
}

impl ConfigHorariosRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Lee el singleton sin crearlo
    pub async fn get(&self) -> RepoResult<Option<ConfigHorarios>> {
        let config: Option<ConfigHorarios> =
            self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(config)
    }

    /// Lee el singleton, creándolo con valores por defecto si no existe
    pub async fn get_or_create(&self) -> RepoResult<ConfigHorarios> {
        if let Some(config) = self.get().await? {
            return Ok(config);
        }

        let config = ConfigHorarios {
            actualizado_en: now_millis(),
            ..ConfigHorarios::default()
        };
        let created: Option<ConfigHorarios> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(config)
            .await?;
        created.ok_or_else(|| {
            RepoError::Database("No se pudo crear la configuración de horarios".to_string())
        })
    }

    /// Guarda la configuración completa (upsert).
    ///
    /// Cada día bloqueado se normaliza a "YYYY-MM-DD"; los valores que
    /// no se pueden interpretar como fecha se descartan en silencio y
    /// los duplicados se eliminan conservando el orden.
    pub async fn guardar(&self, data: ConfigHorariosUpdate) -> RepoResult<ConfigHorarios> {
        let dias = normalizar_dias(data.dias_no_disponibles);

        let rid = RecordId::from_table_key(TABLE, SINGLETON_ID);
        let mut result = self
            .base
            .db()
            .query(
                "UPSERT $rid SET horariosSemana = $semana, diasNoDisponibles = $dias, \
                 actualizadoEn = $now RETURN AFTER",
            )
            .bind(("rid", rid))
            .bind(("semana", data.horarios_semana))
            .bind(("dias", dias))
            .bind(("now", now_millis()))
            .await?;

        let config: Option<ConfigHorarios> = result.take(0)?;
        config.ok_or_else(|| {
            RepoError::Database("No se pudo guardar la configuración de horarios".to_string())
        })
    }

    /// ¿Está la fecha (comparación exacta, sin normalizar) bloqueada?
    pub async fn esta_bloqueado(&self, fecha: &str) -> RepoResult<bool> {
        let config = self.get().await?;
        Ok(config
            .map(|c| c.dias_no_disponibles.iter().any(|d| d == fecha))
            .unwrap_or(false))
    }

    /// Lista cruda de días bloqueados; vacía si el singleton no existe
    pub async fn dias_no_disponibles(&self) -> RepoResult<Vec<String>> {
        Ok(self
            .get()
            .await?
            .map(|c| c.dias_no_disponibles)
            .unwrap_or_default())
    }

    /// Documento de disponibilidad de un día concreto
    pub async fn horario_del_dia(&self, fecha: &str) -> RepoResult<Option<HorarioDia>> {
        let dia: Option<HorarioDia> = self.base.db().select((TABLA_HORARIO, fecha)).await?;
        Ok(dia)
    }
}

fn normalizar_dias(dias: Vec<String>) -> Vec<String> {
    let mut normalizados: Vec<String> = Vec::with_capacity(dias.len());
    for dia in dias {
        if let Some(normalizado) = normalizar_fecha_iso(&dia)
            && !normalizados.contains(&normalizado)
        {
            normalizados.push(normalizado);
        }
    }
    normalizados
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::HorarioSemanaDia;
    use surrealdb::engine::local::Mem;

    async fn repo() -> ConfigHorariosRepository {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        ConfigHorariosRepository::new(db)
    }

    #[tokio::test]
    async fn get_or_create_persiste_el_default() {
        let repo = repo().await;
        assert!(repo.get().await.unwrap().is_none());

        let config = repo.get_or_create().await.unwrap();
        assert!(config.horarios_semana.is_empty());
        assert!(config.dias_no_disponibles.is_empty());

        // ya quedó persistido
        assert!(repo.get().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn guardar_normaliza_y_deduplica() {
        let repo = repo().await;
        let config = repo
            .guardar(ConfigHorariosUpdate {
                horarios_semana: vec![HorarioSemanaDia {
                    dia: "Lunes".into(),
                    activo: true,
                    inicio: "09:00".into(),
                    fin: "18:00".into(),
                }],
                dias_no_disponibles: vec![
                    "2025-12-11".into(),
                    "not-a-date".into(),
                    "2025-12-11T06:00:00.000Z".into(),
                    "2025-12-25".into(),
                ],
            })
            .await
            .unwrap();

        assert_eq!(config.dias_no_disponibles, vec!["2025-12-11", "2025-12-25"]);
        assert_eq!(config.horarios_semana.len(), 1);
    }

    #[tokio::test]
    async fn bloqueado_compara_exacto() {
        let repo = repo().await;
        repo.guardar(ConfigHorariosUpdate {
            horarios_semana: Vec::new(),
            dias_no_disponibles: vec!["2025-12-11".into()],
        })
        .await
        .unwrap();

        assert!(repo.esta_bloqueado("2025-12-11").await.unwrap());
        assert!(!repo.esta_bloqueado("2025-12-12").await.unwrap());
        // sin normalización en la consulta
        assert!(!repo.esta_bloqueado("2025-12-11T00:00:00Z").await.unwrap());
    }

    #[tokio::test]
    async fn dias_sin_singleton_es_vacio() {
        let repo = repo().await;
        assert!(repo.dias_no_disponibles().await.unwrap().is_empty());
        // la consulta no debe crear el singleton
        assert!(repo.get().await.unwrap().is_none());
    }
}
