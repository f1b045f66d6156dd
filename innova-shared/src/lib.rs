pub mod models;
pub mod pii;

pub use models::records::{
    AreaRecord, CreateReservationRecord, ReservationRecord, ResidentRecord, StatusUpdateRecord,
};
pub use pii::Masked;
