pub mod models;
pub mod range;
pub mod conflict;
pub mod calendar;
pub mod index;
pub mod mapping;
pub mod slots;
pub mod lifecycle;
pub mod view;
pub mod workflow;
pub mod cancellation;

pub use models::{Reservation, ReservationId, ReservationStatus, Resident};
pub use range::{TimeRange, TimeRangeError};
pub use conflict::{find_conflict, has_conflict};
pub use calendar::{build_month_matrix, CalendarError, DayCell, MonthCursor, MonthMatrix};
pub use index::DayBucketIndex;
pub use slots::{SlotError, SlotMenu};
pub use lifecycle::{Confirmation, LifecycleError, Transition};
pub use view::{CalendarView, DaySummary, MonthSummary, ViewTicket};
pub use workflow::{CreationError, CreationWorkflow, PreparedReservation, ReservationDraft, ValidationError};
pub use cancellation::{CancelError, CancelOutcome, CancellationWorkflow};
