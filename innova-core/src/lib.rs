pub mod search;
pub mod repository;
pub mod session;
pub mod payment;
pub mod timestamp;

pub use payment::PaymentGate;
pub use repository::{AreaCatalog, CollaboratorError, CollaboratorResult, ReservationStore};
pub use search::ReservationQuery;
pub use session::{Role, Session};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Payment confirmation required")]
    PaymentNotConfirmed,
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
