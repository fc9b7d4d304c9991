//! Domain module
//!
//! Field specs, schemas, records and the pure services that validate and
//! render them. Nothing here performs I/O.

pub mod aggregates;
pub mod events;
pub mod services;
pub mod value_objects;

pub use aggregates::*;
pub use events::*;
pub use value_objects::*;
