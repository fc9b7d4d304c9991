//! End-to-end form flows through the public API

use std::sync::Arc;
use std::time::Duration;

use sase_forms::{
    CommandOutcome, FieldInput, FormCommand, FormController, FormSession, FormState, FormType,
    FormsError, InMemoryRecordStore, NotificationKind, RecordRepository, SelectedFile,
    StaticSchemaCatalog, SubmitOutcome, ToastNotifier,
};

struct Harness {
    controller: FormController,
    store: Arc<InMemoryRecordStore>,
    toasts: Arc<ToastNotifier>,
}

async fn harness(form_type: &str) -> Harness {
    let store = Arc::new(InMemoryRecordStore::new());
    let toasts = Arc::new(ToastNotifier::new());
    let mut controller = FormController::new(
        Arc::new(StaticSchemaCatalog::builtin()),
        store.clone(),
        toasts.clone(),
        FormType::from(form_type),
    );
    controller.mount().await.expect("builtin schema loads");
    Harness {
        controller,
        store,
        toasts,
    }
}

fn fill_jane(controller: &mut FormController) {
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
async fn test_user_info_submitted_twice() {
    let mut h = harness("userInfo").await;

    fill_jane(&mut h.controller);
    let first = h.controller.submit().unwrap();
    fill_jane(&mut h.controller);
    let second = h.controller.submit().unwrap();

    let (SubmitOutcome::Created(a), SubmitOutcome::Created(b)) = (first, second) else {
        panic!("both submits should create");
    };
    assert_ne!(a, b);
    assert_eq!(h.store.len(), 2);
    for record in h.store.list_by_type(&FormType::from("userInfo")) {
        assert_eq!(record.form_type().as_str(), "userInfo");
        assert_eq!(record.value("firstName"), "Jane");
    }

    let toast = h.toasts.current().unwrap();
    assert_eq!(toast.message, "Form submitted successfully!");
    assert_eq!(toast.kind, NotificationKind::Success);

    let table = h.controller.table();
    assert_eq!(table.title, "user info Entries");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.columns[0].heading, "first name");
}

#[tokio::test]
async fn test_edit_then_delete() {
    let mut h = harness("userInfo").await;
    fill_jane(&mut h.controller);
    let SubmitOutcome::Created(id) = h.controller.submit().unwrap() else {
        panic!("expected a new record");
    };
    let created = h.store.get(&id).unwrap();

    h.controller.edit(&id).await.unwrap();
    assert_eq!(h.controller.view().editing_id.as_ref(), Some(&id));
    h.controller.set_field_value("lastName", "Smith").unwrap();
    assert_eq!(h.controller.submit().unwrap(), SubmitOutcome::Updated(id.clone()));

    let updated = h.store.get(&id).unwrap();
    assert_eq!(h.store.len(), 1);
    assert_eq!(updated.value("lastName"), "Smith");
    assert_eq!(updated.form_type(), created.form_type());
    assert!(updated.timestamp() >= created.timestamp());
    assert_eq!(h.toasts.current().unwrap().message, "Entry updated successfully");

    h.controller.delete(&id).unwrap();
    assert!(h.store.is_empty());
    assert_eq!(h.toasts.current().unwrap().message, "Entry deleted successfully");
    assert_eq!(
        h.controller.table().empty_message.as_deref(),
        Some("No entries found for user info")
    );
}

#[tokio::test]
async fn test_contact_form_with_attachments() {
    let mut h = harness("contactForm").await;
    for (name, value) in [
        ("fullName", "Ann Lee"),
        ("email", "ann@example.org"),
        ("subject", "Bug Report"),
        ("priority", "Urgent"),
        ("message", "The export button does nothing."),
        ("preferredContact", "Email"),
    ] {
        h.controller.set_field_value(name, value).unwrap();
    }
    h.controller
        .apply_input(
            "attachments",
            FieldInput::Files {
                files: vec![
                    SelectedFile::new("trace.zip", "application/zip"),
                    SelectedFile::new("screen.PNG", "image/png"),
                ],
            },
        )
        .unwrap();
    h.controller
        .apply_input("newsletter", FieldInput::Checked { checked: true })
        .unwrap();

    let SubmitOutcome::Created(id) = h.controller.submit().unwrap() else {
        panic!("expected a new record");
    };
    let record = h.store.get(&id).unwrap();
    assert_eq!(record.value("attachments"), "trace.zip, screen.PNG");
    assert_eq!(record.value("newsletter"), "true");
}

#[tokio::test]
async fn test_survey_progress_and_validation() {
    let mut h = harness("survey").await;
    assert_eq!(h.controller.progress(), 0.0);

    h.controller.set_field_value("satisfaction", "Neutral").unwrap();
    h.controller
        .apply_input("recommendationScore", FieldInput::Range { position: 8.0 })
        .unwrap();
    assert_eq!(h.controller.progress(), 50.0);

    let SubmitOutcome::Invalid(errors) = h.controller.submit().unwrap() else {
        panic!("half-filled survey must not commit");
    };
    assert_eq!(errors.get("usedFeatures"), Some("This field is required"));
    assert_eq!(errors.get("feedbackCategory"), Some("Please select an option"));
    assert_eq!(h.toasts.current().unwrap().kind, NotificationKind::Error);

    for option in ["Reviews", "Wishlist"] {
        h.controller
            .apply_input(
                "usedFeatures",
                FieldInput::Toggle {
                    option: option.into(),
                    checked: true,
                },
            )
            .unwrap();
    }
    h.controller.set_field_value("feedbackCategory", "Performance").unwrap();
    assert_eq!(h.controller.values().get("usedFeatures"), "Wishlist,Reviews");
    assert_eq!(h.controller.progress(), 100.0);
    assert!(matches!(h.controller.submit().unwrap(), SubmitOutcome::Created(_)));
}

#[tokio::test(start_paused = true)]
async fn test_session_latest_selection_wins() {
    let catalog = StaticSchemaCatalog::builtin().with_latency(Duration::from_millis(500));
    let controller = FormController::new(
        Arc::new(catalog),
        Arc::new(InMemoryRecordStore::new()),
        Arc::new(ToastNotifier::new()),
        FormType::from("userInfo"),
    );
    let session = FormSession::spawn(controller);

    for form_type in ["address", "jobApplication", "survey"] {
        let outcome = session
            .send(FormCommand::FormTypeChanged {
                form_type: FormType::from(form_type),
            })
            .await
            .unwrap();
        assert!(matches!(outcome, CommandOutcome::Loading(t) if t.form_type().as_str() == form_type));
    }

    let view = session.settled().await.unwrap();
    assert_eq!(view.state, FormState::Ready);
    assert_eq!(view.form_type.as_str(), "survey");
    assert!(view.field("satisfaction").is_some());

    let refused = session
        .send(FormCommand::DeleteRequested {
            id: sase_forms::RecordId::from_string("missing"),
        })
        .await;
    assert!(matches!(refused, Err(FormsError::RecordNotFound(_))));
}
