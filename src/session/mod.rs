//! Drawing session: state machine plus the controller that runs uploads and
//! exports with a busy guard.

pub mod controller;
pub mod state;

pub use controller::{SessionController, Trigger};
pub use state::{
    RejectReason, SessionEvent, SessionPhase, SessionState, INITIAL_STATUS, UPLOAD_SUCCESS_STATUS,
};
