//! OpenSASE Forms Engine
//!
//! Schema-driven form rendering, validation and local submission management.
//! A form type (user info, address, payment, ...) selects a declarative field
//! schema; the engine renders a control per field, tracks input, reports
//! completion progress and validates the whole form before committing an
//! in-memory record.
//!
//! ## Architecture
//!
//! - **Domain Layer**: field specs, schemas, values, records, validation and
//!   rendering services
//! - **Application Layer**: the form controller state machine and the
//!   single-threaded session actor
//! - **Ports Layer**: schema provider, record repository and notifier traits
//! - **Infrastructure Layer**: static schema catalog, in-memory record store,
//!   toast notifier

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;

use thiserror::Error;

// Re-exports for convenience
pub use application::{
    FieldView, FormController, FormSession, FormState, FormView, LoadTicket, SessionHandle,
    SubmitOutcome, TableView,
};
pub use config::FormsConfig;
pub use domain::aggregates::Record;
pub use domain::events::FormEvent;
pub use domain::services::{
    calculate_progress, validate_field, validate_form, Control, SelectedFile, ValidationReport,
};
pub use domain::value_objects::{
    FieldSpec, FieldType, FormSchema, FormType, FormValues, RecordId, ValidationErrors,
};
pub use infrastructure::{InMemoryRecordStore, StaticSchemaCatalog, Toast, ToastNotifier};
pub use ports::inbound::{CommandOutcome, FieldInput, FormCommand};
pub use ports::outbound::{NotificationKind, Notifier, RecordRepository, SchemaProvider};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum FormsError {
    #[error("Form configuration not found: {0}")]
    SchemaNotFound(String),

    #[error("Invalid form schema: {0}")]
    InvalidSchema(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Duplicate record id: {0}")]
    DuplicateRecord(String),

    #[error("Form is not ready: {0}")]
    NotReady(&'static str),

    #[error("File rejected: {0}")]
    FileRejected(String),

    #[error("Form session closed")]
    SessionClosed,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FormsError>;
