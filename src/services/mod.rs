//! Asynchronous collaborators of the engine.
//!
//! The calculation modules are pure. This module holds the pieces that talk
//! to the outside world: the clock, the device location provider, the
//! attendance backend, and the session that combines them for one employee.

mod backend;
mod clock;
#[cfg(test)]
mod fake;
mod location;
mod rules_store;
mod session;

pub use backend::{
    AttendanceBackend, AttendanceClient, BackendError, CheckInSubmission, CheckOutSubmission,
    GENERIC_FAILURE_MESSAGE,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use location::{LocationProvider, LocationRequester};
pub use rules_store::RulesStore;
pub use session::AttendanceSession;
