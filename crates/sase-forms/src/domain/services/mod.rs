//! Domain services module

pub mod files;
pub mod progress;
pub mod renderer;
pub mod validation;

pub use files::{accept_selection, AcceptFilter, DropZone, SelectedFile};
pub use progress::calculate_progress;
pub use renderer::{normalize_range, normalize_text, render_field, CheckboxGroup, Choice, Control};
pub use validation::{validate_field, validate_form, ValidationReport};
