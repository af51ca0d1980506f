//! Repositorio de citas
//!
//! Una cita vive en dos lugares: la colección global `cita` y el
//! arreglo embebido `citas` del cliente dueño. Toda mutación que toca
//! ambas vistas (y la disponibilidad del día) corre en una sola
//! transacción del almacén.
//!
//! La disponibilidad por día se lleva con semántica de conjunto:
//! agendar quita la hora con `array::difference` (quitar un valor
//! ausente es no-op) y liberar la regresa con `array::union` (agregar
//! es idempotente). Solo cancelar, eliminar y reagendar liberan la
//! hora; finalizar nunca toca el horario.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use uuid::Uuid;

use super::horario::TABLA_HORARIO;
use super::{
    BaseRepository, ClienteRepository, ConfigHorariosRepository, RepoError, RepoResult,
};
use crate::db::models::{Cita, CitaResumen, CitaUpdate, CitaUsuario, EstadoCita};
use crate::utils::time::now_millis;

const TABLE: &str = "cita";

#[derive(Clone)]
pub struct CitaRepository {
    base: BaseRepository,
    clientes: ClienteRepository,
    config: ConfigHorariosRepository,
}

impl CitaRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            clientes: ClienteRepository::new(db.clone()),
            config: ConfigHorariosRepository::new(db.clone()),
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, cita_id: &str) -> RepoResult<Option<Cita>> {
        let cita: Option<Cita> = self.base.db().select((TABLE, cita_id)).await?;
        Ok(cita)
    }

    /// Agenda una cita.
    ///
    /// 1. Rechaza fechas bloqueadas antes de cualquier mutación.
    /// 2. Upsert del cliente por teléfono.
    /// 3. En una transacción: agrega el resumen al arreglo embebido,
    ///    inserta la cita global y reclama la hora del día.
    ///
    /// Devuelve el id generado de la cita.
    pub async fn crear(
        &self,
        fecha: &str,
        hora: &str,
        servicio: &str,
        nombre: &str,
        telefono: &str,
        correo: Option<String>,
    ) -> RepoResult<String> {
        if self.config.esta_bloqueado(fecha).await? {
            return Err(RepoError::Validation(
                "Lo sentimos, ese día está marcado como no disponible. Elige otra fecha."
                    .to_string(),
            ));
        }

        let cliente = self
            .clientes
            .upsert_por_telefono(nombre, telefono, correo.clone())
            .await?;

        let cita_id = Uuid::new_v4().simple().to_string();
        let now = now_millis();

        let resumen = CitaResumen {
            cita_id: cita_id.clone(),
            fecha: fecha.to_string(),
            hora: hora.to_string(),
            servicio: servicio.to_string(),
            estado: EstadoCita::Activa,
            fecha_registro: now,
        };

        let cita = Cita {
            cita_id: cita_id.clone(),
            cliente_id: cliente.cliente_id.clone(),
            nombre_cliente: cliente.nombre.clone(),
            telefono: cliente.telefono.clone(),
            correo,
            fecha: fecha.to_string(),
            hora: hora.to_string(),
            servicio: servicio.to_string(),
            estado: EstadoCita::Activa,
            recordatorio_enviado: false,
            fecha_registro: now,
        };

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 UPDATE $cliente_rid SET citas = array::concat(citas ?? [], [$resumen]); \
                 CREATE $cita_rid CONTENT $cita; \
                 UPSERT $horario_rid SET dia = $fecha, \
                     horasDisponibles = array::difference(horasDisponibles ?? [], [$hora]); \
                 COMMIT TRANSACTION;",
            )
            .bind(("cliente_rid", RecordId::from_table_key("cliente", &cliente.cliente_id)))
            .bind(("resumen", resumen))
            .bind(("cita_rid", RecordId::from_table_key(TABLE, &cita_id)))
            .bind(("cita", cita))
            .bind(("horario_rid", RecordId::from_table_key(TABLA_HORARIO, fecha)))
            .bind(("fecha", fecha.to_string()))
            .bind(("hora", hora.to_string()))
            .await?
            .check()?;

        Ok(cita_id)
    }

    /// Citas de un usuario por correo, ordenadas por fecha y hora
    pub async fn listar_por_correo(&self, correo: &str) -> RepoResult<Vec<CitaUsuario>> {
        let citas: Vec<CitaUsuario> = self
            .base
            .db()
            .query(
                "SELECT citaId, servicio, fecha, hora, nombreCliente, estado \
                 FROM cita WHERE correo = $correo ORDER BY fecha ASC, hora ASC",
            )
            .bind(("correo", correo.to_string()))
            .await?
            .take(0)?;
        Ok(citas)
    }

    /// Todas las citas para el panel de administración
    pub async fn listar_todas(&self) -> RepoResult<Vec<Cita>> {
        let citas: Vec<Cita> = self
            .base
            .db()
            .query("SELECT * FROM cita ORDER BY fecha ASC, hora ASC")
            .await?
            .take(0)?;
        Ok(citas)
    }

    /// Actualización parcial (reagendar / cambiar servicio).
    ///
    /// Si cambia la fecha o la hora, la hora anterior se libera en la
    /// fecha anterior y la nueva se reclama en la nueva fecha, con los
    /// valores faltantes tomados del registro original. No se vuelve a
    /// validar disponibilidad.
    pub async fn actualizar(&self, cita_id: &str, data: CitaUpdate) -> RepoResult<()> {
        let original = self
            .find_by_id(cita_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Cita no encontrada".to_string()))?;

        let cambia_horario = data.fecha.is_some() || data.hora.is_some();
        let nueva_fecha = data.fecha.unwrap_or_else(|| original.fecha.clone());
        let nueva_hora = data.hora.unwrap_or_else(|| original.hora.clone());
        let nuevo_servicio = data
            .servicio_nombre
            .unwrap_or_else(|| original.servicio.clone());

        let sql = if cambia_horario {
            "BEGIN TRANSACTION; \
             UPDATE $cita_rid SET fecha = $fecha, hora = $hora, servicio = $servicio; \
             UPDATE cliente SET citas[WHERE citaId = $cita_id].fecha = $fecha, \
                 citas[WHERE citaId = $cita_id].hora = $hora, \
                 citas[WHERE citaId = $cita_id].servicio = $servicio \
                 WHERE citas.citaId CONTAINS $cita_id; \
             UPSERT $horario_ant SET dia = $fecha_ant, \
                 horasDisponibles = array::union(horasDisponibles ?? [], [$hora_ant]); \
             UPSERT $horario_nvo SET dia = $fecha, \
                 horasDisponibles = array::difference(horasDisponibles ?? [], [$hora]); \
             COMMIT TRANSACTION;"
        } else {
            "BEGIN TRANSACTION; \
             UPDATE $cita_rid SET fecha = $fecha, hora = $hora, servicio = $servicio; \
             UPDATE cliente SET citas[WHERE citaId = $cita_id].fecha = $fecha, \
                 citas[WHERE citaId = $cita_id].hora = $hora, \
                 citas[WHERE citaId = $cita_id].servicio = $servicio \
                 WHERE citas.citaId CONTAINS $cita_id; \
             COMMIT TRANSACTION;"
        };

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("cita_rid", RecordId::from_table_key(TABLE, cita_id)))
            .bind(("cita_id", cita_id.to_string()))
            .bind(("fecha", nueva_fecha.clone()))
            .bind(("hora", nueva_hora.clone()))
            .bind(("servicio", nuevo_servicio));

        if cambia_horario {
            query = query
                .bind((
                    "horario_ant",
                    RecordId::from_table_key(TABLA_HORARIO, &original.fecha),
                ))
                .bind(("fecha_ant", original.fecha.clone()))
                .bind(("hora_ant", original.hora.clone()))
                .bind((
                    "horario_nvo",
                    RecordId::from_table_key(TABLA_HORARIO, &nueva_fecha),
                ));
        }

        query.await?.check()?;
        Ok(())
    }

    /// Cancela una cita activa y libera su hora
    pub async fn cancelar(&self, cita_id: &str) -> RepoResult<()> {
        let cita = self.exigir_activa(cita_id).await?;

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 UPDATE $cita_rid SET estado = $estado; \
                 UPDATE cliente SET citas[WHERE citaId = $cita_id].estado = $estado \
                     WHERE citas.citaId CONTAINS $cita_id; \
                 UPSERT $horario_rid SET dia = $fecha, \
                     horasDisponibles = array::union(horasDisponibles ?? [], [$hora]); \
                 COMMIT TRANSACTION;",
            )
            .bind(("cita_rid", RecordId::from_table_key(TABLE, cita_id)))
            .bind(("cita_id", cita_id.to_string()))
            .bind(("estado", EstadoCita::Cancelada))
            .bind(("horario_rid", RecordId::from_table_key(TABLA_HORARIO, &cita.fecha)))
            .bind(("fecha", cita.fecha.clone()))
            .bind(("hora", cita.hora.clone()))
            .await?
            .check()?;
        Ok(())
    }

    /// Marca una cita activa como finalizada; el horario no se toca
    /// (el servicio ya se prestó)
    pub async fn finalizar(&self, cita_id: &str) -> RepoResult<()> {
        self.exigir_activa(cita_id).await?;

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 UPDATE $cita_rid SET estado = $estado; \
                 UPDATE cliente SET citas[WHERE citaId = $cita_id].estado = $estado \
                     WHERE citas.citaId CONTAINS $cita_id; \
                 COMMIT TRANSACTION;",
            )
            .bind(("cita_rid", RecordId::from_table_key(TABLE, cita_id)))
            .bind(("cita_id", cita_id.to_string()))
            .bind(("estado", EstadoCita::Finalizada))
            .await?
            .check()?;
        Ok(())
    }

    /// Elimina la cita de ambas vistas y libera su hora
    pub async fn eliminar(&self, cita_id: &str) -> RepoResult<()> {
        let cita = self
            .find_by_id(cita_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Cita no encontrada".to_string()))?;

        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 DELETE $cita_rid; \
                 UPDATE cliente SET citas = array::filter(citas ?? [], |$c| $c.citaId != $cita_id) \
                     WHERE citas.citaId CONTAINS $cita_id; \
                 UPSERT $horario_rid SET dia = $fecha, \
                     horasDisponibles = array::union(horasDisponibles ?? [], [$hora]); \
                 COMMIT TRANSACTION;",
            )
            .bind(("cita_rid", RecordId::from_table_key(TABLE, cita_id)))
            .bind(("cita_id", cita_id.to_string()))
            .bind(("horario_rid", RecordId::from_table_key(TABLA_HORARIO, &cita.fecha)))
            .bind(("fecha", cita.fecha.clone()))
            .bind(("hora", cita.hora.clone()))
            .await?
            .check()?;
        Ok(())
    }

    /// La cita debe existir y seguir activa
    async fn exigir_activa(&self, cita_id: &str) -> RepoResult<Cita> {
        let cita = self
            .find_by_id(cita_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Cita no encontrada".to_string()))?;
        if cita.estado.es_terminal() {
            return Err(RepoError::EstadoTerminal(
                "La cita ya fue cancelada o finalizada".to_string(),
            ));
        }
        Ok(cita)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ConfigHorariosUpdate;
    use surrealdb::engine::local::Mem;

    struct Fixture {
        citas: CitaRepository,
        clientes: ClienteRepository,
        config: ConfigHorariosRepository,
    }

    async fn fixture() -> Fixture {
        let db = Surreal::new::<Mem>(()).await.unwrap();
        db.use_ns("test").use_db("test").await.unwrap();
        Fixture {
            citas: CitaRepository::new(db.clone()),
            clientes: ClienteRepository::new(db.clone()),
            config: ConfigHorariosRepository::new(db),
        }
    }

    async fn agendar(f: &Fixture) -> String {
        f.citas
            .crear(
                "2025-12-11",
                "14:00",
                "Corte de Pelo",
                "Juan Pérez",
                "7551234567",
                Some("juan@mail.com".into()),
            )
            .await
            .unwrap()
    }

    async fn horas_del_dia(f: &Fixture, fecha: &str) -> Vec<String> {
        f.config
            .horario_del_dia(fecha)
            .await
            .unwrap()
            .map(|h| h.horas_disponibles)
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn crear_deja_una_cita_activa_en_ambas_vistas() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;

        let todas = f.citas.listar_todas().await.unwrap();
        assert_eq!(todas.len(), 1);
        let cita = &todas[0];
        assert_eq!(cita.cita_id, cita_id);
        assert_eq!(cita.estado, EstadoCita::Activa);
        assert_eq!(cita.fecha, "2025-12-11");
        assert_eq!(cita.hora, "14:00");
        assert_eq!(cita.servicio, "Corte de Pelo");
        assert!(!cita.recordatorio_enviado);

        // vista embebida del cliente
        let cliente = f
            .clientes
            .find_by_telefono("7551234567")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cliente.citas.len(), 1);
        let resumen = &cliente.citas[0];
        assert_eq!(resumen.cita_id, cita_id);
        assert_eq!(resumen.estado, EstadoCita::Activa);
        assert_eq!(resumen.fecha, "2025-12-11");
        assert_eq!(resumen.hora, "14:00");
        assert_eq!(cita.cliente_id, cliente.cliente_id);
    }

    #[tokio::test]
    async fn crear_reclama_la_hora_del_dia() {
        let f = fixture().await;
        agendar(&f).await;

        // el documento del día se crea implícitamente, sin la hora reservada
        let horas = horas_del_dia(&f, "2025-12-11").await;
        assert!(!horas.contains(&"14:00".to_string()));
    }

    #[tokio::test]
    async fn crear_en_dia_bloqueado_no_tiene_efectos() {
        let f = fixture().await;
        f.config
            .guardar(ConfigHorariosUpdate {
                horarios_semana: Vec::new(),
                dias_no_disponibles: vec!["2025-12-11".into()],
            })
            .await
            .unwrap();

        let err = f
            .citas
            .crear(
                "2025-12-11",
                "14:00",
                "Corte de Pelo",
                "Juan Pérez",
                "7551234567",
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        // sin mutaciones de ningún tipo
        assert!(f.citas.listar_todas().await.unwrap().is_empty());
        assert!(
            f.clientes
                .find_by_telefono("7551234567")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            f.config
                .horario_del_dia("2025-12-11")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn cancelar_marca_ambas_vistas_y_libera_la_hora() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;

        f.citas.cancelar(&cita_id).await.unwrap();

        let cita = f.citas.find_by_id(&cita_id).await.unwrap().unwrap();
        assert_eq!(cita.estado, EstadoCita::Cancelada);

        let cliente = f
            .clientes
            .find_by_telefono("7551234567")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cliente.citas[0].estado, EstadoCita::Cancelada);

        // la hora regresó al conjunto del día
        let horas = horas_del_dia(&f, "2025-12-11").await;
        assert_eq!(horas.iter().filter(|h| *h == "14:00").count(), 1);
    }

    #[tokio::test]
    async fn cancelar_dos_veces_es_conflicto_y_no_duplica_la_hora() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;

        f.citas.cancelar(&cita_id).await.unwrap();
        let err = f.citas.cancelar(&cita_id).await.unwrap_err();
        assert!(matches!(err, RepoError::EstadoTerminal(_)));

        let horas = horas_del_dia(&f, "2025-12-11").await;
        assert_eq!(horas.iter().filter(|h| *h == "14:00").count(), 1);
    }

    #[tokio::test]
    async fn finalizar_no_toca_el_horario() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;

        let antes = horas_del_dia(&f, "2025-12-11").await;
        f.citas.finalizar(&cita_id).await.unwrap();
        let despues = horas_del_dia(&f, "2025-12-11").await;

        assert_eq!(antes, despues);

        let cita = f.citas.find_by_id(&cita_id).await.unwrap().unwrap();
        assert_eq!(cita.estado, EstadoCita::Finalizada);
        let cliente = f
            .clientes
            .find_by_telefono("7551234567")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cliente.citas[0].estado, EstadoCita::Finalizada);
    }

    #[tokio::test]
    async fn finalizar_cancelada_es_conflicto() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;
        f.citas.cancelar(&cita_id).await.unwrap();

        let err = f.citas.finalizar(&cita_id).await.unwrap_err();
        assert!(matches!(err, RepoError::EstadoTerminal(_)));
    }

    #[tokio::test]
    async fn reagendar_libera_la_hora_anterior_y_reclama_la_nueva() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;

        f.citas
            .actualizar(
                &cita_id,
                CitaUpdate {
                    fecha: Some("2025-12-12".into()),
                    hora: Some("16:30".into()),
                    servicio_nombre: None,
                },
            )
            .await
            .unwrap();

        let cita = f.citas.find_by_id(&cita_id).await.unwrap().unwrap();
        assert_eq!(cita.fecha, "2025-12-12");
        assert_eq!(cita.hora, "16:30");
        assert_eq!(cita.servicio, "Corte de Pelo");

        let cliente = f
            .clientes
            .find_by_telefono("7551234567")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cliente.citas[0].fecha, "2025-12-12");
        assert_eq!(cliente.citas[0].hora, "16:30");

        // la hora original quedó liberada, la nueva reclamada
        assert!(horas_del_dia(&f, "2025-12-11").await.contains(&"14:00".into()));
        assert!(!horas_del_dia(&f, "2025-12-12").await.contains(&"16:30".into()));
    }

    #[tokio::test]
    async fn reagendar_de_ida_y_vuelta_restaura_la_disponibilidad() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;

        f.citas
            .actualizar(
                &cita_id,
                CitaUpdate {
                    hora: Some("16:30".into()),
                    ..CitaUpdate::default()
                },
            )
            .await
            .unwrap();
        f.citas
            .actualizar(
                &cita_id,
                CitaUpdate {
                    hora: Some("14:00".into()),
                    ..CitaUpdate::default()
                },
            )
            .await
            .unwrap();

        let horas = horas_del_dia(&f, "2025-12-11").await;
        assert!(!horas.contains(&"14:00".to_string()));
        assert!(horas.contains(&"16:30".to_string()));
    }

    #[tokio::test]
    async fn actualizar_solo_servicio_no_toca_horarios() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;
        let antes = horas_del_dia(&f, "2025-12-11").await;

        f.citas
            .actualizar(
                &cita_id,
                CitaUpdate {
                    servicio_nombre: Some("Afeitado".into()),
                    ..CitaUpdate::default()
                },
            )
            .await
            .unwrap();

        let cita = f.citas.find_by_id(&cita_id).await.unwrap().unwrap();
        assert_eq!(cita.servicio, "Afeitado");
        assert_eq!(cita.fecha, "2025-12-11");
        let cliente = f
            .clientes
            .find_by_telefono("7551234567")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cliente.citas[0].servicio, "Afeitado");

        assert_eq!(antes, horas_del_dia(&f, "2025-12-11").await);
    }

    #[tokio::test]
    async fn eliminar_quita_ambas_vistas_y_libera_la_hora() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;

        f.citas.eliminar(&cita_id).await.unwrap();

        assert!(f.citas.find_by_id(&cita_id).await.unwrap().is_none());
        let cliente = f
            .clientes
            .find_by_telefono("7551234567")
            .await
            .unwrap()
            .unwrap();
        assert!(cliente.citas.is_empty());
        assert!(horas_del_dia(&f, "2025-12-11").await.contains(&"14:00".into()));
    }

    #[tokio::test]
    async fn operaciones_sobre_cita_inexistente_son_not_found() {
        let f = fixture().await;
        for err in [
            f.citas.cancelar("nope").await.unwrap_err(),
            f.citas.finalizar("nope").await.unwrap_err(),
            f.citas.eliminar("nope").await.unwrap_err(),
            f.citas
                .actualizar("nope", CitaUpdate::default())
                .await
                .unwrap_err(),
        ] {
            assert!(matches!(err, RepoError::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn cancelar_y_luego_eliminar_libera_la_hora_una_sola_vez() {
        let f = fixture().await;
        let cita_id = agendar(&f).await;

        f.citas.cancelar(&cita_id).await.unwrap();
        f.citas.eliminar(&cita_id).await.unwrap();

        // union es idempotente: la hora aparece exactamente una vez
        let horas = horas_del_dia(&f, "2025-12-11").await;
        assert_eq!(horas.iter().filter(|h| *h == "14:00").count(), 1);
        assert!(f.citas.find_by_id(&cita_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn eliminar_cliente_arrastra_sus_citas_globales() {
        let f = fixture().await;
        agendar(&f).await;
        let cliente = f
            .clientes
            .find_by_telefono("7551234567")
            .await
            .unwrap()
            .unwrap();

        f.clientes.delete(&cliente.cliente_id).await.unwrap();

        assert!(f.citas.listar_todas().await.unwrap().is_empty());
        assert!(
            f.clientes
                .find_by_id(&cliente.cliente_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn listados_ordenados_por_fecha_y_hora() {
        let f = fixture().await;
        for (fecha, hora) in [
            ("2025-12-12", "10:00"),
            ("2025-12-11", "16:00"),
            ("2025-12-11", "09:00"),
        ] {
            f.citas
                .crear(fecha, hora, "Corte de Pelo", "Juan", "755111", Some("j@m.com".into()))
                .await
                .unwrap();
        }

        let todas = f.citas.listar_todas().await.unwrap();
        let orden: Vec<(String, String)> = todas
            .iter()
            .map(|c| (c.fecha.clone(), c.hora.clone()))
            .collect();
        assert_eq!(
            orden,
            vec![
                ("2025-12-11".to_string(), "09:00".to_string()),
                ("2025-12-11".to_string(), "16:00".to_string()),
                ("2025-12-12".to_string(), "10:00".to_string()),
            ]
        );

        let del_usuario = f.citas.listar_por_correo("j@m.com").await.unwrap();
        assert_eq!(del_usuario.len(), 3);
        assert_eq!(del_usuario[0].hora, "09:00");
        assert_eq!(del_usuario[0].nombre_cliente, "Juan");
        assert!(f.citas.listar_por_correo("nadie@m.com").await.unwrap().is_empty());
    }
}
