//! Form controller
//!
//! State machine driving one form: schema loading, field input, submission,
//! edit mode and deletion. All transitions are synchronous except the schema
//! fetch, which is split into [`FormController::begin_load`] (issue a ticket)
//! and [`FormController::complete_load`] (apply the result) so that a caller
//! can run the fetch elsewhere. Results for superseded tickets are dropped.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::dto::{FormView, TableView};
use crate::domain::aggregates::Record;
use crate::domain::events::FormEvent;
use crate::domain::services::files::MSG_INVALID_FILE_TYPE;
use crate::domain::services::{
    accept_selection, calculate_progress, normalize_range, normalize_text, validate_form,
    CheckboxGroup,
};
use crate::domain::value_objects::{
    FieldSpec, FieldType, FormSchema, FormType, FormValues, RecordId, ValidationErrors,
};
use crate::ports::inbound::{CommandOutcome, FieldInput, FormCommand};
use crate::ports::outbound::{NotificationKind, Notifier, RecordRepository, SchemaProvider};
use crate::{FormsError, Result};

pub const MSG_LOAD_FAILED: &str = "Failed to load form configuration";
pub const MSG_CORRECT_ERRORS: &str = "Please correct the errors in the form";
pub const MSG_UPDATED: &str = "Entry updated successfully";
pub const MSG_SUBMITTED: &str = "Form submitted successfully!";
pub const MSG_EDIT_MODE: &str = "Edit mode activated";
pub const MSG_DELETED: &str = "Entry deleted successfully";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    /// Nothing requested yet
    Idle,
    /// A schema fetch is outstanding
    Loading,
    Ready,
    /// Values were seeded from a stored record; submit replaces it
    Editing,
}

/// Handle for one outstanding schema fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    form_type: FormType,
}

impl LoadTicket {
    pub fn form_type(&self) -> &FormType {
        &self.form_type
    }

    pub fn sequence(&self) -> u64 {
        self.seq
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Created(RecordId),
    Updated(RecordId),
    /// Nothing committed
    Invalid(ValidationErrors),
}

#[derive(Debug)]
struct PendingLoad {
    seq: u64,
    /// Edit-initiated: keep the seeded values
    preserve_values: bool,
}

pub struct FormController {
    provider: Arc<dyn SchemaProvider>,
    store: Arc<dyn RecordRepository>,
    notifier: Arc<dyn Notifier>,

    state: FormState,
    form_type: FormType,
    schema: Option<Arc<FormSchema>>,
    values: FormValues,
    errors: ValidationErrors,
    checkbox_groups: HashMap<String, CheckboxGroup>,
    editing_id: Option<RecordId>,

    pending: Option<PendingLoad>,
    last_seq: u64,
    events: Vec<FormEvent>,
}

impl FormController {
    /// Controller in `Idle` for `form_type`; call [`Self::mount`] (or
    /// `begin_load`) to fetch its schema.
    pub fn new(
        provider: Arc<dyn SchemaProvider>,
        store: Arc<dyn RecordRepository>,
        notifier: Arc<dyn Notifier>,
        form_type: FormType,
    ) -> Self {
        Self {
            provider,
            store,
            notifier,
            state: FormState::Idle,
            form_type,
            schema: None,
            values: FormValues::new(),
            errors: ValidationErrors::new(),
            checkbox_groups: HashMap::new(),
            editing_id: None,
            pending: None,
            last_seq: 0,
            events: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Schema loading
    // -------------------------------------------------------------------------

    /// Switch to `form_type` and issue a load ticket.
    ///
    /// A user-initiated switch leaves edit mode. Any earlier outstanding
    /// ticket becomes stale.
    pub fn begin_load(&mut self, form_type: FormType) -> LoadTicket {
        if let Some(id) = self.editing_id.take() {
            debug!(record_id = %id, "form type changed, leaving edit mode");
        }
        self.issue_ticket(form_type, false)
    }

    fn issue_ticket(&mut self, form_type: FormType, preserve_values: bool) -> LoadTicket {
        self.last_seq += 1;
        if let Some(stale) = self.pending.take() {
            debug!(superseded = stale.seq, by = self.last_seq, "schema load superseded");
        }
        self.pending = Some(PendingLoad {
            seq: self.last_seq,
            preserve_values,
        });
        self.form_type = form_type.clone();
        self.schema = None;
        self.state = FormState::Loading;
        info!(form_type = %form_type, seq = self.last_seq, "loading form schema");

        LoadTicket {
            seq: self.last_seq,
            form_type,
        }
    }

    /// Apply a fetch result.
    ///
    /// Returns `Ok(false)` when the ticket was superseded and the result was
    /// discarded, `Ok(true)` when the schema was installed. A failed fetch is
    /// applied (error notification, no schema) and its error handed back.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Arc<FormSchema>>,
    ) -> Result<bool> {
        let pending = match self.pending.take() {
            Some(p) if p.seq == ticket.seq => p,
            other => {
                self.pending = other;
                warn!(form_type = %ticket.form_type, seq = ticket.seq, "discarding stale schema result");
                return Ok(false);
            }
        };

        self.errors.clear();
        match result {
            Ok(schema) => {
                if pending.preserve_values && self.editing_id.is_some() {
                    self.state = FormState::Editing;
                } else {
                    self.values.clear();
                    self.state = FormState::Ready;
                }
                info!(form_type = %self.form_type, fields = schema.len(), "form schema loaded");
                self.events.push(FormEvent::SchemaLoaded {
                    form_type: self.form_type.clone(),
                    field_count: schema.len(),
                });
                self.schema = Some(schema);
                self.reseed_checkbox_groups();
                Ok(true)
            }
            Err(e) => {
                warn!(form_type = %self.form_type, error = %e, "form schema load failed");
                self.schema = None;
                self.editing_id = None;
                self.values.clear();
                self.checkbox_groups.clear();
                self.state = FormState::Ready;
                self.events.push(FormEvent::SchemaLoadFailed {
                    form_type: self.form_type.clone(),
                    reason: e.to_string(),
                });
                self.notifier.notify(MSG_LOAD_FAILED, NotificationKind::Error);
                Err(e)
            }
        }
    }

    /// Switch form type and wait for its schema. Choosing the form type that
    /// is already shown is a no-op.
    pub async fn change_form_type(&mut self, form_type: FormType) -> Result<()> {
        if self.is_active(&form_type) {
            return Ok(());
        }
        let ticket = self.begin_load(form_type);
        self.fetch_and_complete(ticket).await
    }

    /// Load the schema of the current form type
    pub async fn mount(&mut self) -> Result<()> {
        let form_type = self.form_type.clone();
        self.change_form_type(form_type).await
    }

    /// Already showing `form_type`, or already fetching its schema
    fn is_active(&self, form_type: &FormType) -> bool {
        &self.form_type == form_type && (self.schema.is_some() || self.pending.is_some())
    }

    async fn fetch_and_complete(&mut self, ticket: LoadTicket) -> Result<()> {
        let provider = Arc::clone(&self.provider);
        let result = provider.get_schema(ticket.form_type()).await;
        self.complete_load(&ticket, result).map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Field input
    // -------------------------------------------------------------------------

    /// Set a field from a raw textual value
    pub fn set_field_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.apply_input(name, FieldInput::text(value))
    }

    /// Apply one input event to a field.
    ///
    /// Clears the field's validation error on success; does not re-validate.
    pub fn apply_input(&mut self, name: &str, input: FieldInput) -> Result<()> {
        let schema = self.ready_schema()?;
        let spec = schema
            .field(name)
            .ok_or_else(|| FormsError::FieldNotFound(name.to_string()))?;

        let value = match input {
            FieldInput::Text { value } => {
                let value = normalize_text(spec, &value)?;
                if spec.is_checkbox_group() {
                    self.checkbox_groups.insert(
                        spec.name.clone(),
                        CheckboxGroup::from_value(spec.options(), &value),
                    );
                }
                value
            }
            FieldInput::Toggle { option, checked } => {
                if !spec.is_checkbox_group() {
                    return Err(invalid(spec, "not a checkbox group"));
                }
                let current = self.values.get(name);
                let group = self
                    .checkbox_groups
                    .entry(spec.name.clone())
                    .or_insert_with(|| CheckboxGroup::from_value(spec.options(), current));
                if !group.set(&option, checked) {
                    return Err(invalid(spec, &format!("'{option}' is not one of the options")));
                }
                group.value()
            }
            FieldInput::Checked { checked } => {
                if !spec.is_single_checkbox() {
                    return Err(invalid(spec, "not a single checkbox"));
                }
                checked.to_string()
            }
            FieldInput::Files { files } => match accept_selection(spec, &files) {
                Ok(Some(value)) => value,
                Ok(None) => return Ok(()),
                Err(e) => {
                    if matches!(&e, FormsError::FileRejected(m) if m == MSG_INVALID_FILE_TYPE) {
                        self.notifier.notify(MSG_INVALID_FILE_TYPE, NotificationKind::Error);
                    }
                    return Err(e);
                }
            },
            FieldInput::Range { position } => {
                if spec.field_type != FieldType::Range {
                    return Err(invalid(spec, "not a range field"));
                }
                normalize_range(spec, position)?
            }
        };

        debug!(field = name, "field value changed");
        self.values.set(name, value);
        self.errors.remove(name);
        Ok(())
    }

    fn ready_schema(&self) -> Result<Arc<FormSchema>> {
        if self.state == FormState::Loading {
            return Err(FormsError::NotReady("form schema is loading"));
        }
        self.schema
            .clone()
            .ok_or(FormsError::NotReady("no form schema loaded"))
    }

    fn reseed_checkbox_groups(&mut self) {
        self.checkbox_groups.clear();
        if let Some(schema) = &self.schema {
            for spec in schema.fields().iter().filter(|f| f.is_checkbox_group()) {
                self.checkbox_groups.insert(
                    spec.name.clone(),
                    CheckboxGroup::from_value(spec.options(), self.values.get(&spec.name)),
                );
            }
        }
    }

    fn reset_values(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.reseed_checkbox_groups();
    }

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------

    /// Validate and commit the current values.
    ///
    /// In edit mode the record under edit is replaced in place; otherwise a
    /// new record is appended. Values reset after either commit. A store
    /// failure leaves values and edit mode untouched.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let schema = self.ready_schema()?;

        let report = validate_form(&schema, &self.values);
        if !report.is_valid() {
            info!(form_type = %self.form_type, errors = report.errors.len(), "submit rejected");
            self.errors = report.errors.clone();
            self.notifier.notify(MSG_CORRECT_ERRORS, NotificationKind::Error);
            return Ok(SubmitOutcome::Invalid(report.errors));
        }

        let outcome = match self.editing_id.clone() {
            Some(id) => {
                let existing = self
                    .store
                    .get(&id)
                    .ok_or_else(|| FormsError::RecordNotFound(id.to_string()))?;
                let replacement = existing.replaced_by(self.values.clone());
                let updated_at = replacement.timestamp();
                self.store.replace(&id, replacement)?;

                info!(record_id = %id, form_type = %self.form_type, "record updated");
                self.events.push(FormEvent::RecordUpdated {
                    record_id: id.clone(),
                    form_type: existing.form_type().clone(),
                    updated_at,
                });
                self.editing_id = None;
                self.state = FormState::Ready;
                self.notifier.notify(MSG_UPDATED, NotificationKind::Success);
                SubmitOutcome::Updated(id)
            }
            None => {
                let record = Record::with_id(self.mint_id(), self.form_type.clone(), self.values.clone());
                let id = record.id().clone();
                let created_at = record.timestamp();
                self.store.append(record)?;

                info!(record_id = %id, form_type = %self.form_type, "record created");
                self.events.push(FormEvent::RecordCreated {
                    record_id: id.clone(),
                    form_type: self.form_type.clone(),
                    created_at,
                });
                self.notifier.notify(MSG_SUBMITTED, NotificationKind::Success);
                SubmitOutcome::Created(id)
            }
        };

        self.reset_values();
        Ok(outcome)
    }

    fn mint_id(&self) -> RecordId {
        loop {
            let id = RecordId::new();
            if !self.store.contains(&id) {
                return id;
            }
            warn!(record_id = %id, "record id collision, minting another");
        }
    }

    // -------------------------------------------------------------------------
    // Edit / delete
    // -------------------------------------------------------------------------

    /// Enter edit mode for a stored record.
    ///
    /// Values are seeded from the record immediately. When the record belongs
    /// to another form type (or no schema is loaded) a load ticket is returned
    /// and the form is `Editing` once it completes.
    pub fn begin_edit(&mut self, id: &RecordId) -> Result<Option<LoadTicket>> {
        if self.state == FormState::Loading {
            return Err(FormsError::NotReady("form schema is loading"));
        }
        let record = self
            .store
            .get(id)
            .ok_or_else(|| FormsError::RecordNotFound(id.to_string()))?;

        self.editing_id = Some(id.clone());
        self.values = record.values().clone();
        self.errors.clear();
        self.events.push(FormEvent::EditStarted {
            record_id: id.clone(),
            form_type: record.form_type().clone(),
        });
        self.notifier.notify(MSG_EDIT_MODE, NotificationKind::Info);
        info!(record_id = %id, form_type = %record.form_type(), "edit mode activated");

        if record.form_type() == &self.form_type && self.schema.is_some() {
            self.state = FormState::Editing;
            self.reseed_checkbox_groups();
            Ok(None)
        } else {
            Ok(Some(self.issue_ticket(record.form_type().clone(), true)))
        }
    }

    /// Enter edit mode and wait for any schema load it needs
    pub async fn edit(&mut self, id: &RecordId) -> Result<()> {
        match self.begin_edit(id)? {
            Some(ticket) => self.fetch_and_complete(ticket).await,
            None => Ok(()),
        }
    }

    /// Leave edit mode, discarding the seeded values
    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.editing_id.take() {
            debug!(record_id = %id, "edit cancelled");
            self.reset_values();
            if self.state == FormState::Editing {
                self.state = FormState::Ready;
            }
        }
    }

    /// Remove a stored record.
    ///
    /// Deleting the record under edit leaves edit mode but keeps the values.
    pub fn delete(&mut self, id: &RecordId) -> Result<()> {
        self.store.remove(id)?;

        if self.editing_id.as_ref() == Some(id) {
            self.editing_id = None;
            if self.state == FormState::Editing {
                self.state = FormState::Ready;
            }
        }
        info!(record_id = %id, "record deleted");
        self.events.push(FormEvent::RecordDeleted { record_id: id.clone() });
        self.notifier.notify(MSG_DELETED, NotificationKind::Success);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Apply one command synchronously. Loads are only issued here; the
    /// returned ticket must be completed by the caller.
    pub fn dispatch(&mut self, command: FormCommand) -> Result<CommandOutcome> {
        match command {
            FormCommand::FormTypeChanged { form_type } if self.is_active(&form_type) => {
                debug!(form_type = %form_type, "form type unchanged");
                Ok(CommandOutcome::Applied)
            }
            FormCommand::FormTypeChanged { form_type } => {
                Ok(CommandOutcome::Loading(self.begin_load(form_type)))
            }
            FormCommand::FieldChanged { name, input } => {
                self.apply_input(&name, input)?;
                Ok(CommandOutcome::Applied)
            }
            FormCommand::SubmitRequested => self.submit().map(CommandOutcome::Submitted),
            FormCommand::EditRequested { id } => Ok(match self.begin_edit(&id)? {
                Some(ticket) => CommandOutcome::Loading(ticket),
                None => CommandOutcome::Applied,
            }),
            FormCommand::EditCancelled => {
                self.cancel_edit();
                Ok(CommandOutcome::Applied)
            }
            FormCommand::DeleteRequested { id } => {
                self.delete(&id)?;
                Ok(CommandOutcome::Deleted(id))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Read side
    // -------------------------------------------------------------------------

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn form_type(&self) -> &FormType {
        &self.form_type
    }

    pub fn schema(&self) -> Option<&Arc<FormSchema>> {
        self.schema.as_ref()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn editing_id(&self) -> Option<&RecordId> {
        self.editing_id.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn schema_provider(&self) -> Arc<dyn SchemaProvider> {
        Arc::clone(&self.provider)
    }

    pub fn progress(&self) -> f64 {
        calculate_progress(self.schema.as_deref(), &self.values)
    }

    /// Records of the current form type
    pub fn entries(&self) -> Vec<Record> {
        self.store.list_by_type(&self.form_type)
    }

    pub fn view(&self) -> FormView {
        FormView::build(
            self.state,
            &self.form_type,
            self.schema.as_deref(),
            &self.values,
            &self.errors,
            self.progress(),
            self.editing_id.as_ref(),
        )
    }

    pub fn table(&self) -> TableView {
        TableView::build(&self.form_type, &self.entries(), self.schema.as_deref())
    }

    /// Drain accumulated domain events
    pub fn take_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }
}

fn invalid(spec: &FieldSpec, reason: &str) -> FormsError {
    FormsError::InvalidValue {
        field: spec.name.clone(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::SelectedFile;
    use crate::infrastructure::{InMemoryRecordStore, StaticSchemaCatalog};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<(String, NotificationKind)>>,
    }

    impl RecordingNotifier {
        fn last(&self) -> Option<(String, NotificationKind)> {
            self.seen.lock().last().cloned()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, kind: NotificationKind) {
            self.seen.lock().push((message.to_string(), kind));
        }
    }

    struct Fixture {
        controller: FormController,
        store: Arc<InMemoryRecordStore>,
        notifier: Arc<RecordingNotifier>,
    }

    async fn mounted(form_type: &str) -> Fixture {
        let store = Arc::new(InMemoryRecordStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut controller = FormController::new(
            Arc::new(StaticSchemaCatalog::builtin()),
            store.clone(),
            notifier.clone(),
            FormType::from(form_type),
        );
        controller.mount().await.unwrap();
        Fixture {
            controller,
            store,
            notifier,
        }
    }

    fn fill_user_info(controller: &mut FormController) {
        for (name, value) in [
            ("firstName", "Jane"),
            ("lastName", "Doe"),
            ("email", "jane@x.com"),
            ("birthDate", "2000-01-01"),
            ("gender", "Female"),
        ] {
            controller.set_field_value(name, value).unwrap();
        }
    }

    #[tokio::test]
    async fn test_mount_loads_schema() {
        let f = mounted("userInfo").await;
        assert_eq!(f.controller.state(), FormState::Ready);
        assert_eq!(f.controller.schema().map(|s| s.len()), Some(8));
        assert_eq!(f.controller.progress(), 0.0);
    }

    #[tokio::test]
    async fn test_unknown_form_type_fails_softly() {
        let mut f = mounted("userInfo").await;
        let err = f.controller.change_form_type(FormType::from("tax")).await;
        assert!(matches!(err, Err(FormsError::SchemaNotFound(_))));
        assert_eq!(f.controller.state(), FormState::Ready);
        assert!(f.controller.schema().is_none());
        assert_eq!(f.notifier.last(), Some((MSG_LOAD_FAILED.into(), NotificationKind::Error)));
        assert!(matches!(
            f.controller.set_field_value("firstName", "x"),
            Err(FormsError::NotReady(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_creates_and_resets() {
        let mut f = mounted("userInfo").await;
        fill_user_info(&mut f.controller);
        assert_eq!(f.controller.progress(), 100.0);

        let SubmitOutcome::Created(first) = f.controller.submit().unwrap() else {
            panic!("expected created");
        };
        assert!(f.controller.values().is_empty());
        assert_eq!(f.notifier.last(), Some((MSG_SUBMITTED.into(), NotificationKind::Success)));

        fill_user_info(&mut f.controller);
        let SubmitOutcome::Created(second) = f.controller.submit().unwrap() else {
            panic!("expected created");
        };
        assert_ne!(first, second);
        assert_eq!(f.store.len(), 2);
        assert_eq!(f.controller.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_submit_records_errors() {
        let mut f = mounted("userInfo").await;
        f.controller.set_field_value("age", "abc").unwrap();

        let SubmitOutcome::Invalid(errors) = f.controller.submit().unwrap() else {
            panic!("expected invalid");
        };
        assert_eq!(errors.get("age"), Some("Must be a valid number"));
        assert_eq!(errors.get("firstName"), Some("This field is required"));
        assert_eq!(errors.get("gender"), Some("This field is required"));
        assert!(f.store.is_empty());
        assert_eq!(f.notifier.last(), Some((MSG_CORRECT_ERRORS.into(), NotificationKind::Error)));

        // editing a field drops only its own error
        f.controller.set_field_value("age", "x").unwrap();
        assert_eq!(f.controller.errors().get("age"), None);
        assert!(f.controller.errors().get("firstName").is_some());
    }

    #[tokio::test]
    async fn test_edit_replaces_in_place() {
        let mut f = mounted("userInfo").await;
        fill_user_info(&mut f.controller);
        let SubmitOutcome::Created(id) = f.controller.submit().unwrap() else {
            panic!("expected created");
        };
        let before = f.store.get(&id).unwrap();

        f.controller.edit(&id).await.unwrap();
        assert_eq!(f.controller.state(), FormState::Editing);
        assert_eq!(f.controller.values().get("firstName"), "Jane");
        assert_eq!(f.notifier.last(), Some((MSG_EDIT_MODE.into(), NotificationKind::Info)));

        f.controller.set_field_value("firstName", "Janet").unwrap();
        assert_eq!(f.controller.submit().unwrap(), SubmitOutcome::Updated(id.clone()));

        let after = f.store.get(&id).unwrap();
        assert_eq!(f.store.len(), 1);
        assert_eq!(after.value("firstName"), "Janet");
        assert_eq!(after.form_type(), before.form_type());
        assert!(after.timestamp() >= before.timestamp());
        assert_eq!(f.controller.state(), FormState::Ready);
        assert!(!f.controller.is_editing());
    }

    #[tokio::test]
    async fn test_edit_across_form_types() {
        let mut f = mounted("contactForm").await;
        for (name, value) in [
            ("fullName", "Ann"),
            ("email", "ann@x.com"),
            ("subject", "Bug Report"),
            ("priority", "High"),
            ("message", "Broken"),
            ("preferredContact", "Email"),
        ] {
            f.controller.set_field_value(name, value).unwrap();
        }
        let SubmitOutcome::Created(id) = f.controller.submit().unwrap() else {
            panic!("expected created");
        };

        f.controller.change_form_type(FormType::from("survey")).await.unwrap();
        let ticket = f.controller.begin_edit(&id).unwrap().expect("needs a load");
        assert_eq!(ticket.form_type().as_str(), "contactForm");
        assert_eq!(f.controller.state(), FormState::Loading);

        let schema = f.controller.schema_provider().get_schema(ticket.form_type()).await;
        assert!(f.controller.complete_load(&ticket, schema).unwrap());
        assert_eq!(f.controller.state(), FormState::Editing);
        assert_eq!(f.controller.values().get("subject"), "Bug Report");
    }

    #[tokio::test]
    async fn test_reselecting_current_form_type_keeps_edit() {
        let mut f = mounted("userInfo").await;
        fill_user_info(&mut f.controller);
        let SubmitOutcome::Created(id) = f.controller.submit().unwrap() else {
            panic!("expected created");
        };
        f.controller.edit(&id).await.unwrap();
        f.controller.set_field_value("firstName", "Janet").unwrap();

        let outcome = f
            .controller
            .dispatch(FormCommand::FormTypeChanged { form_type: FormType::from("userInfo") })
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Applied);
        f.controller.change_form_type(FormType::from("userInfo")).await.unwrap();

        assert_eq!(f.controller.state(), FormState::Editing);
        assert_eq!(f.controller.editing_id(), Some(&id));
        assert_eq!(f.controller.values().get("firstName"), "Janet");
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let mut f = mounted("userInfo").await;
        let provider = f.controller.schema_provider();

        let first = f.controller.begin_load(FormType::from("address"));
        let second = f.controller.begin_load(FormType::from("payment"));

        let payment = provider.get_schema(second.form_type()).await;
        assert!(f.controller.complete_load(&second, payment).unwrap());
        let address = provider.get_schema(first.form_type()).await;
        assert!(!f.controller.complete_load(&first, address).unwrap());

        assert_eq!(f.controller.form_type().as_str(), "payment");
        assert!(f.controller.schema().unwrap().field("cvv").is_some());
    }

    #[tokio::test]
    async fn test_loading_refuses_input() {
        let mut f = mounted("userInfo").await;
        let _ticket = f.controller.begin_load(FormType::from("address"));
        assert!(matches!(f.controller.submit(), Err(FormsError::NotReady(_))));
        assert!(matches!(
            f.controller.set_field_value("city", "Austin"),
            Err(FormsError::NotReady(_))
        ));
        assert!(f.controller.view().fields.is_empty());
    }

    #[tokio::test]
    async fn test_checkbox_toggles() {
        let mut f = mounted("userInfo").await;
        let toggle = |option: &str, checked| FieldInput::Toggle {
            option: option.to_string(),
            checked,
        };
        f.controller.apply_input("interests", toggle("Music", true)).unwrap();
        f.controller.apply_input("interests", toggle("Sports", true)).unwrap();
        assert_eq!(f.controller.values().get("interests"), "Sports,Music");

        f.controller.apply_input("interests", toggle("Music", false)).unwrap();
        assert_eq!(f.controller.values().get("interests"), "Sports");
        assert!(f.controller.apply_input("interests", toggle("Cooking", true)).is_err());
        assert!(f.controller.apply_input("gender", toggle("Female", true)).is_err());
    }

    #[tokio::test]
    async fn test_single_checkbox_and_range() {
        let mut f = mounted("survey").await;
        f.controller
            .apply_input("contactPermission", FieldInput::Checked { checked: true })
            .unwrap();
        assert_eq!(f.controller.values().get("contactPermission"), "true");

        f.controller
            .apply_input("recommendationScore", FieldInput::Range { position: 42.0 })
            .unwrap();
        assert_eq!(f.controller.values().get("recommendationScore"), "10");
    }

    #[tokio::test]
    async fn test_rejected_files_keep_prior_value() {
        let mut f = mounted("jobApplication").await;
        let pick = |names: &[&str]| FieldInput::Files {
            files: names.iter().map(|n| SelectedFile::named(*n)).collect(),
        };

        f.controller.apply_input("resume", pick(&["cv.pdf"])).unwrap();
        assert_eq!(f.controller.values().get("resume"), "cv.pdf");

        let err = f.controller.apply_input("resume", pick(&["cv.exe"]));
        assert!(matches!(err, Err(FormsError::FileRejected(_))));
        assert_eq!(f.controller.values().get("resume"), "cv.pdf");
        assert_eq!(
            f.notifier.last(),
            Some((MSG_INVALID_FILE_TYPE.into(), NotificationKind::Error))
        );

        f.controller.apply_input("resume", pick(&[])).unwrap();
        assert_eq!(f.controller.values().get("resume"), "cv.pdf");
    }

    #[tokio::test]
    async fn test_unknown_field() {
        let mut f = mounted("userInfo").await;
        assert!(matches!(
            f.controller.set_field_value("nickname", "JJ"),
            Err(FormsError::FieldNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_record_under_edit() {
        let mut f = mounted("userInfo").await;
        fill_user_info(&mut f.controller);
        let SubmitOutcome::Created(id) = f.controller.submit().unwrap() else {
            panic!("expected created");
        };
        f.controller.edit(&id).await.unwrap();

        f.controller.delete(&id).unwrap();
        assert!(f.store.is_empty());
        assert!(!f.controller.is_editing());
        assert_eq!(f.controller.state(), FormState::Ready);
        assert_eq!(f.controller.values().get("firstName"), "Jane");
        assert_eq!(f.notifier.last(), Some((MSG_DELETED.into(), NotificationKind::Success)));

        assert!(matches!(f.controller.delete(&id), Err(FormsError::RecordNotFound(_))));
    }

    #[tokio::test]
    async fn test_cancel_edit_clears_values() {
        let mut f = mounted("userInfo").await;
        fill_user_info(&mut f.controller);
        let SubmitOutcome::Created(id) = f.controller.submit().unwrap() else {
            panic!("expected created");
        };
        f.controller.edit(&id).await.unwrap();
        f.controller.cancel_edit();
        assert_eq!(f.controller.state(), FormState::Ready);
        assert!(f.controller.values().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_vanished_record_keeps_edit_mode() {
        let mut f = mounted("userInfo").await;
        fill_user_info(&mut f.controller);
        let SubmitOutcome::Created(id) = f.controller.submit().unwrap() else {
            panic!("expected created");
        };
        f.controller.edit(&id).await.unwrap();
        f.store.remove(&id).unwrap();

        assert!(matches!(f.controller.submit(), Err(FormsError::RecordNotFound(_))));
        assert!(f.controller.is_editing());
        assert_eq!(f.controller.values().get("firstName"), "Jane");
        assert!(f.store.is_empty());
    }

    #[tokio::test]
    async fn test_events_drain() {
        let mut f = mounted("userInfo").await;
        fill_user_info(&mut f.controller);
        f.controller.submit().unwrap();

        let kinds: Vec<&str> = f.controller.take_events().iter().map(|e| e.event_type()).collect();
        assert_eq!(kinds, ["schema.loaded", "record.created"]);
        assert!(f.controller.take_events().is_empty());
    }

    #[tokio::test]
    async fn test_view_marks_errors() {
        let mut f = mounted("address").await;
        f.controller.submit().unwrap();
        let view = f.controller.view();
        assert_eq!(view.fields.len(), 8);
        assert_eq!(view.field("city").and_then(|v| v.error.as_deref()), Some("This field is required"));
        assert_eq!(view.field("apartment").and_then(|v| v.error.as_deref()), None);
        assert!(view.field("deliveryInstructions").map(|v| v.wide).unwrap_or(false));
    }
}
