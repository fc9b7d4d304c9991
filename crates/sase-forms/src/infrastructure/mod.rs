//! Infrastructure layer
//!
//! Implementations of the outbound ports.

mod builtin;
pub mod catalog;
pub mod notifier;
pub mod persistence;

pub use catalog::{CatalogEntry, StaticSchemaCatalog};
pub use notifier::{Toast, ToastNotifier, DEFAULT_TOAST_TTL};
pub use persistence::InMemoryRecordStore;
