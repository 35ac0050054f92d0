//! Installment schedule engine.
//!
//! Pure, framework-agnostic functions: every operation takes a schedule and
//! parameters and returns a new schedule plus findings. Persistence, payment
//! status transitions and presentation belong to the caller.

/// Calendar arithmetic for due dates
pub mod dates;
/// Editing façade returning proposed schedules with findings
pub mod editor;
/// Fresh schedule generation around manual pins
pub mod generator;
/// Currency precision helpers
pub mod money;
/// Auto amount recomputation against the target balance
pub mod reconciler;
/// Plain-text schedule rendering
pub mod summary;
/// Advisory invariant checks
pub mod validator;

pub use editor::{EditOutcome, ScheduleEditor};
pub use validator::Finding;
