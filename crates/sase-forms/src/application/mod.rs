//! Application layer
//!
//! The form controller use cases and the session task that serializes them.

pub mod controller;
pub mod dto;
pub mod session;

pub use controller::{FormController, FormState, LoadTicket, SubmitOutcome};
pub use dto::*;
pub use session::{FormSession, SessionHandle};
