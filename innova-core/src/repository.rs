use async_trait::async_trait;
use innova_shared::{AreaRecord, CreateReservationRecord, ReservationRecord};

use crate::search::ReservationQuery;
use crate::session::Session;

/// Failure reported by the backend collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// The backend answered and declined the request. The message is shown verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("Backend unreachable: {0}")]
    Transport(String),
    #[error("Malformed backend response: {0}")]
    Malformed(String),
}

impl CollaboratorError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, CollaboratorError::Rejected(_))
    }
}

pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Read-only access to the common-area catalogue.
#[async_trait]
pub trait AreaCatalog: Send + Sync {
    async fn list_areas(
        &self,
        session: &Session,
        building_id: Option<&str>,
    ) -> CollaboratorResult<Vec<AreaRecord>>;
}

/// Reservation persistence owned by the backend.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn list_for_area(
        &self,
        session: &Session,
        area_id: &str,
        query: &ReservationQuery,
    ) -> CollaboratorResult<Vec<ReservationRecord>>;

    /// Returns the canonical record with backend-assigned id and code.
    async fn create(
        &self,
        session: &Session,
        command: &CreateReservationRecord,
    ) -> CollaboratorResult<ReservationRecord>;

    async fn update_status(
        &self,
        session: &Session,
        reservation_id: &str,
        estado: &str,
    ) -> CollaboratorResult<ReservationRecord>;

    async fn list_mine(&self, session: &Session) -> CollaboratorResult<Vec<ReservationRecord>>;
}
