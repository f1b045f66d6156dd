use async_trait::async_trait;
use innova_core::{
    timestamp, AreaCatalog, CollaboratorError, CollaboratorResult, ReservationQuery, ReservationStore, Session,
};
use innova_shared::{AreaRecord, CreateReservationRecord, ReservationRecord, ResidentRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

const STATUS_ACTIVE: &str = "pagado";

fn is_cancelled(estado: &str) -> bool {
    estado.trim().to_lowercase().starts_with("cancelad")
}

/// Process-local stand-in for the backend, used for development and tests.
///
/// Accepts and rejects requests the way the real backend does: overlapping
/// active reservations of one area are refused, and only the owner or an
/// administrator may change a reservation's status.
#[derive(Default)]
pub struct InMemoryBackend {
    areas: RwLock<Vec<AreaRecord>>,
    reservations: RwLock<Vec<ReservationRecord>>,
    rejection: RwLock<Option<String>>,
    create_calls: AtomicUsize,
    sequence: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_areas(areas: Vec<AreaRecord>) -> Self {
        Self {
            areas: RwLock::new(areas),
            ..Self::default()
        }
    }

    pub async fn seed(&self, record: ReservationRecord) {
        self.reservations.write().await.push(record);
    }

    /// Makes the next mutating request fail with `message`.
    pub async fn reject_next(&self, message: impl Into<String>) {
        *self.rejection.write().await = Some(message.into());
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub async fn records(&self) -> Vec<ReservationRecord> {
        self.reservations.read().await.clone()
    }

    async fn take_rejection(&self) -> CollaboratorResult<()> {
        match self.rejection.write().await.take() {
            Some(message) => Err(CollaboratorError::Rejected(message)),
            None => Ok(()),
        }
    }

    fn next_code(&self) -> String {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        format!("RES-{:04}", n)
    }
}

#[async_trait]
impl AreaCatalog for InMemoryBackend {
    async fn list_areas(&self, _session: &Session, building_id: Option<&str>) -> CollaboratorResult<Vec<AreaRecord>> {
        let areas = self.areas.read().await;
        Ok(areas
            .iter()
            .filter(|a| match (building_id, a.id_edificio.as_deref()) {
                (Some(wanted), Some(actual)) => wanted == actual,
                _ => true,
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReservationStore for InMemoryBackend {
    async fn list_for_area(
        &self,
        _session: &Session,
        area_id: &str,
        query: &ReservationQuery,
    ) -> CollaboratorResult<Vec<ReservationRecord>> {
        let reservations = self.reservations.read().await;
        Ok(reservations
            .iter()
            .filter(|r| r.id_area_comun == area_id)
            .filter(|r| match timestamp::parse(&r.fecha_ini) {
                Ok(start) => query.matches(start.date()),
                Err(_) => true,
            })
            .cloned()
            .collect())
    }

    async fn create(&self, session: &Session, command: &CreateReservationRecord) -> CollaboratorResult<ReservationRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.take_rejection().await?;

        if !command.pago_confirmado {
            return Err(CollaboratorError::Rejected("El pago no ha sido confirmado".to_string()));
        }
        let parse = |raw: &str| timestamp::parse(raw).map_err(|e| CollaboratorError::Rejected(e.to_string()));
        let start = parse(&command.fecha_ini)?;
        let end = parse(&command.fecha_fin)?;
        if end <= start {
            return Err(CollaboratorError::Rejected(
                "La hora de fin debe ser posterior a la de inicio".to_string(),
            ));
        }

        let mut reservations = self.reservations.write().await;
        let taken = reservations
            .iter()
            .filter(|r| r.id_area_comun == command.id_area_comun && !is_cancelled(&r.estado))
            .filter_map(|r| Some((timestamp::parse(&r.fecha_ini).ok()?, timestamp::parse(&r.fecha_fin).ok()?)))
            .any(|(s, e)| start < e && s < end);
        if taken {
            tracing::debug!(area_id = %command.id_area_comun, "Rejecting overlapping reservation");
            return Err(CollaboratorError::Rejected("El horario seleccionado ya está reservado".to_string()));
        }

        let record = ReservationRecord {
            id_reserva: Uuid::new_v4().to_string(),
            codigo: self.next_code(),
            id_area_comun: command.id_area_comun.clone(),
            usuario: Some(ResidentRecord {
                id_usuario: Some(session.user_id.clone()),
                nombre: session.display_name.expose().clone(),
                apellido: String::new(),
            }),
            fecha_ini: timestamp::format(start),
            fecha_fin: timestamp::format(end),
            costo_total: command.costo_total,
            estado: STATUS_ACTIVE.to_string(),
        };
        reservations.push(record.clone());
        Ok(record)
    }

    async fn update_status(
        &self,
        session: &Session,
        reservation_id: &str,
        estado: &str,
    ) -> CollaboratorResult<ReservationRecord> {
        self.take_rejection().await?;

        let mut reservations = self.reservations.write().await;
        let record = reservations
            .iter_mut()
            .find(|r| r.id_reserva == reservation_id)
            .ok_or_else(|| CollaboratorError::Rejected(format!("Reserva {} no encontrada", reservation_id)))?;

        let owner = record.usuario.as_ref().and_then(|u| u.id_usuario.as_deref());
        if !session.may_act_for(owner) {
            return Err(CollaboratorError::Rejected("No autorizado".to_string()));
        }
        if is_cancelled(&record.estado) {
            return Err(CollaboratorError::Rejected("La reserva ya está cancelada".to_string()));
        }

        record.estado = estado.to_string();
        Ok(record.clone())
    }

    async fn list_mine(&self, session: &Session) -> CollaboratorResult<Vec<ReservationRecord>> {
        let reservations = self.reservations.read().await;
        Ok(reservations
            .iter()
            .filter(|r| {
                r.usuario.as_ref().and_then(|u| u.id_usuario.as_deref()) == Some(session.user_id.as_str())
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use innova_core::Role;
    use rust_decimal::Decimal;

    fn command(start: &str, end: &str) -> CreateReservationRecord {
        CreateReservationRecord {
            id_area_comun: "gym".to_string(),
            fecha_ini: start.to_string(),
            fecha_fin: end.to_string(),
            costo_total: Decimal::from(60),
            pago_confirmado: true,
        }
    }

    fn resident(id: &str) -> Session {
        Session::new(id, Role::Resident).with_display_name("Ana")
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_code() {
        let backend = InMemoryBackend::new();
        let first = backend
            .create(&resident("u-1"), &command("2025-10-15T09:00:00", "2025-10-15T10:00:00"))
            .await
            .unwrap();
        let second = backend
            .create(&resident("u-1"), &command("2025-10-15T10:00:00", "2025-10-15T11:00:00"))
            .await
            .unwrap();

        assert_eq!(first.codigo, "RES-0001");
        assert_eq!(second.codigo, "RES-0002");
        assert_ne!(first.id_reserva, second.id_reserva);
        assert_eq!(first.estado, "pagado");
        assert_eq!(backend.create_calls(), 2);
    }

    #[tokio::test]
    async fn test_overlap_rejected_server_side() {
        let backend = InMemoryBackend::new();
        backend
            .create(&resident("u-1"), &command("2025-10-15T09:00:00", "2025-10-15T11:00:00"))
            .await
            .unwrap();
        let result = backend
            .create(&resident("u-2"), &command("2025-10-15T10:00:00", "2025-10-15T12:00:00"))
            .await;
        assert!(matches!(result, Err(CollaboratorError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_reject_next_applies_once() {
        let backend = InMemoryBackend::new();
        backend.reject_next("Mantenimiento").await;
        let cmd = command("2025-10-15T09:00:00", "2025-10-15T10:00:00");

        let first = backend.create(&resident("u-1"), &cmd).await;
        assert_eq!(first, Err(CollaboratorError::Rejected("Mantenimiento".to_string())));
        assert!(backend.create(&resident("u-1"), &cmd).await.is_ok());
    }

    #[tokio::test]
    async fn test_status_update_requires_owner_or_admin() {
        let backend = InMemoryBackend::new();
        let created = backend
            .create(&resident("u-1"), &command("2025-10-15T09:00:00", "2025-10-15T10:00:00"))
            .await
            .unwrap();

        let denied = backend
            .update_status(&resident("u-2"), &created.id_reserva, "cancelado")
            .await;
        assert!(denied.is_err());

        let admin = Session::new("admin", Role::Administrator);
        let updated = backend
            .update_status(&admin, &created.id_reserva, "cancelado")
            .await
            .unwrap();
        assert_eq!(updated.estado, "cancelado");

        // A cancelled slot is free again.
        assert!(backend
            .create(&resident("u-2"), &command("2025-10-15T09:00:00", "2025-10-15T10:00:00"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_listing_filters() {
        let backend = InMemoryBackend::new();
        backend
            .create(&resident("u-1"), &command("2025-10-15T09:00:00", "2025-10-15T10:00:00"))
            .await
            .unwrap();
        backend
            .create(&resident("u-2"), &command("2025-11-02T09:00:00", "2025-11-02T10:00:00"))
            .await
            .unwrap();

        let october = ReservationQuery::between(
            chrono::NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 10, 31).unwrap(),
        );
        let listed = backend.list_for_area(&resident("u-1"), "gym", &october).await.unwrap();
        assert_eq!(listed.len(), 1);

        let mine = backend.list_mine(&resident("u-2")).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].fecha_ini, "2025-11-02T09:00:00");
    }
}
