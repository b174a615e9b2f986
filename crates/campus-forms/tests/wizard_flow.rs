use std::sync::{Arc, Mutex};

use campus_core::entities::FullStudent;
use campus_forms::{
    ButtonAction, RecordingShell, ShellEvent, StepDef, StepOutcome, Wizard, WizardError, labels,
};
use campus_schema::FormSchema;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn student() -> Value {
    json!({
        "studentCode": "STU-001",
        "name": "Amina Idrissi",
        "gender": "F",
        "enrollmentDate": "2024-09-01"
    })
}

fn parent() -> Value {
    json!({
        "name": "Karim Idrissi",
        "phone": "+212600000000",
        "cin": "AB123456",
        "relationshipType": "father"
    })
}

fn two_step_schema() -> FormSchema {
    FormSchema::new(json!({
        "type": "object",
        "properties": {
            "step1": { "type": "object", "properties": { "a": { "type": "integer" } } },
            "step2": { "type": "object", "properties": { "b": { "type": "integer" } } }
        }
    }))
    .unwrap()
}

fn enrollment(shell: Arc<RecordingShell>, submitted: Arc<Mutex<Option<Value>>>) -> Wizard {
    Wizard::builder(FormSchema::from_type::<FullStudent>().unwrap())
        .step(StepDef::keyed("student").title("Student"))
        .step(StepDef::keyed("parents").title("Parents"))
        .on_submit(move |data| {
            let submitted = Arc::clone(&submitted);
            async move {
                *submitted.lock().unwrap() = Some(data);
                Ok::<_, String>(())
            }
        })
        .build(shell)
        .unwrap()
}

#[tokio::test]
async fn enrollment_wizard_submits_full_student() {
    let shell = Arc::new(RecordingShell::with_dialog("enroll"));
    let submitted = Arc::new(Mutex::new(None));
    let mut wizard = enrollment(Arc::clone(&shell), Arc::clone(&submitted));

    assert_eq!(shell.primary().unwrap().label_key, labels::NEXT);
    assert_eq!(shell.primary().unwrap().form.as_deref(), Some("student"));
    assert_eq!(shell.secondary().unwrap().action, ButtonAction::Cancel);

    let outcome = wizard.submit_step(student()).await.unwrap();
    assert_eq!(outcome, StepOutcome::Advanced { step: 2 });
    assert_eq!(shell.primary().unwrap().label_key, labels::CONFIRM);
    assert_eq!(shell.secondary().unwrap().icon.as_deref(), Some("chevronLeft"));

    // list step data arrives wrapped and is stored unwrapped
    assert_eq!(wizard.current_step_defaults(), json!({}));
    let outcome = wizard
        .submit_step(json!({ "parents": [parent()] }))
        .await
        .unwrap();

    let StepOutcome::Submitted(data) = outcome else {
        panic!("expected submission");
    };
    assert_eq!(data["parents"][0]["cin"], "AB123456");
    assert_eq!(data["student"]["status"], "active");
    assert_eq!(submitted.lock().unwrap().as_ref(), Some(&data));
    assert_eq!(wizard.form_data()["parents"], data["parents"]);
}

#[tokio::test]
async fn stored_step_data_has_schema_defaults_applied() {
    let shell = Arc::new(RecordingShell::with_dialog("enroll"));
    let mut wizard = enrollment(shell, Arc::new(Mutex::new(None)));

    wizard.submit_step(student()).await.unwrap();
    assert_eq!(wizard.form_data()["student"]["status"], "active");

    wizard.previous();
    assert_eq!(wizard.current_step_defaults()["status"], "active");

    wizard.submit_step(student()).await.unwrap();
    wizard
        .submit_step(json!({ "parents": [parent()] }))
        .await
        .unwrap();
    assert_eq!(wizard.form_data()["parents"][0]["isEmergencyContact"], false);
}

#[tokio::test]
async fn invalid_step_keeps_wizard_in_place() {
    let shell = Arc::new(RecordingShell::with_dialog("enroll"));
    let mut wizard = enrollment(shell, Arc::new(Mutex::new(None)));

    let err = wizard
        .submit_step(json!({ "name": "A" }))
        .await
        .unwrap_err();
    let WizardError::Step { step, failure } = err else {
        panic!("expected step error");
    };
    assert_eq!(step, 1);
    assert!(failure.for_path("name").is_some());
    assert_eq!(wizard.current_step(), 1);
    assert!(wizard.form_data().is_empty());
}

#[tokio::test]
async fn previous_keeps_entered_data_as_defaults() {
    let shell = Arc::new(RecordingShell::with_dialog("enroll"));
    let mut wizard = enrollment(Arc::clone(&shell), Arc::new(Mutex::new(None)));

    wizard.submit_step(student()).await.unwrap();
    assert!(wizard.handle_action(&ButtonAction::Previous));
    assert_eq!(wizard.current_step(), 1);
    assert_eq!(wizard.current_step_defaults()["studentCode"], "STU-001");
    assert_eq!(shell.secondary().unwrap().action, ButtonAction::Cancel);
}

#[test]
fn step_defaults_prefer_entered_data_then_wizard_defaults() {
    let shell = Arc::new(RecordingShell::default());
    let mut wizard = Wizard::builder(two_step_schema())
        .step(StepDef::keyed("step1"))
        .step(StepDef::keyed("step2"))
        .default_values(json!({ "step1": { "a": 0 }, "step2": { "b": 2 } }))
        .build(shell)
        .unwrap();

    assert_eq!(wizard.current_step_defaults(), json!({ "a": 0 }));
    assert_eq!(wizard.current_form().unwrap().values(), &json!({ "a": 0 }));

    futures::executor::block_on(wizard.submit_step(json!({ "a": 1 }))).unwrap();
    assert_eq!(wizard.current_step_defaults(), json!({ "b": 2 }));
    wizard.previous();
    assert_eq!(wizard.current_step_defaults(), json!({ "a": 1 }));
}

#[test]
fn headers_default_to_step_number() {
    let wizard = Wizard::builder(two_step_schema())
        .step(StepDef::keyed("step1").title("Basics"))
        .step(StepDef::keyed("step2"))
        .build(Arc::new(RecordingShell::default()))
        .unwrap();

    let titles: Vec<String> = wizard.steps().into_iter().map(|h| h.title).collect();
    assert_eq!(titles, vec!["Basics".to_string(), "Step 2".to_string()]);
}

#[test]
fn headers_carry_step_descriptions() {
    let wizard = Wizard::builder(two_step_schema())
        .step(
            StepDef::keyed("step1")
                .title("Student")
                .description("Identity and enrollment date"),
        )
        .step(StepDef::keyed("step2"))
        .build(Arc::new(RecordingShell::default()))
        .unwrap();

    let headers = wizard.steps();
    assert_eq!(
        headers[0].description.as_deref(),
        Some("Identity and enrollment date")
    );
    assert_eq!(headers[1].description, None);
}

#[test]
fn no_owner_dialog_means_no_button_updates() {
    let shell = Arc::new(RecordingShell::default());
    let wizard = Wizard::builder(two_step_schema())
        .step(StepDef::keyed("step1"))
        .build(shell.clone())
        .unwrap();

    assert!(wizard.owner().is_none());
    assert!(shell.events().is_empty());
}

#[test]
fn empty_step_list_is_rejected() {
    let result = Wizard::builder(two_step_schema()).build(Arc::new(RecordingShell::default()));
    assert!(matches!(result, Err(WizardError::NoSteps)));
}

#[test]
fn cancel_without_callback_pops_dialog() {
    let shell = Arc::new(RecordingShell::with_dialog("d"));
    let mut wizard = Wizard::builder(two_step_schema())
        .step(StepDef::keyed("step1"))
        .step(StepDef::keyed("step2"))
        .build(shell.clone())
        .unwrap();

    wizard.cancel();
    assert_eq!(wizard.current_step(), 1);
    assert!(matches!(
        shell.events().last(),
        Some(ShellEvent::Pop { result: None })
    ));
}

#[test]
fn cancel_callback_replaces_pop() {
    let shell = Arc::new(RecordingShell::with_dialog("d"));
    let cancelled = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&cancelled);
    let mut wizard = Wizard::builder(two_step_schema())
        .step(StepDef::keyed("step1"))
        .on_cancel(move || *flag.lock().unwrap() = true)
        .build(shell.clone())
        .unwrap();

    wizard.handle_action(&ButtonAction::Cancel);
    assert!(*cancelled.lock().unwrap());
    assert!(
        !shell
            .events()
            .iter()
            .any(|e| matches!(e, ShellEvent::Pop { .. }))
    );
}

#[tokio::test]
async fn final_validation_reports_owning_steps() {
    let schema = FormSchema::new(json!({
        "type": "object",
        "properties": {
            "step1": { "type": "object" },
            "step2": { "type": "object" }
        },
        "allOf": [{ "properties": { "step1": { "required": ["a"] } } }]
    }))
    .unwrap();
    let mut wizard = Wizard::builder(schema)
        .step(StepDef::keyed("step1"))
        .step(StepDef::keyed("step2"))
        .build(Arc::new(RecordingShell::default()))
        .unwrap();

    wizard.submit_step(json!({})).await.unwrap();
    let err = wizard.submit_step(json!({ "b": 1 })).await.unwrap_err();
    let WizardError::Validation { failure, steps } = err else {
        panic!("expected final validation error");
    };
    assert!(failure.for_path("step1.a").is_some());
    assert_eq!(steps, vec![1]);
    assert_eq!(wizard.current_step(), 2);
}

#[tokio::test]
async fn unkeyed_steps_merge_into_top_level() {
    let schema = FormSchema::new(json!({
        "type": "object",
        "properties": { "a": { "type": "integer" }, "b": { "type": "integer" } }
    }))
    .unwrap();
    let mut wizard = Wizard::builder(schema)
        .step(StepDef::unkeyed())
        .step(StepDef::unkeyed())
        .build(Arc::new(RecordingShell::default()))
        .unwrap();

    wizard.submit_step(json!({ "a": 1 })).await.unwrap();
    let outcome = wizard.submit_step(json!({ "b": 2 })).await.unwrap();
    assert_eq!(outcome, StepOutcome::Submitted(json!({ "a": 1, "b": 2 })));
}

#[tokio::test]
async fn failing_submit_handler_surfaces_message() {
    let mut wizard = Wizard::builder(two_step_schema())
        .step(StepDef::keyed("step1"))
        .on_submit(|_| async { Err::<(), _>("server down") })
        .build(Arc::new(RecordingShell::default()))
        .unwrap();

    let err = wizard.submit_step(json!({ "a": 1 })).await.unwrap_err();
    assert!(matches!(err, WizardError::Submit(message) if message == "server down"));
}

#[tokio::test]
async fn submit_form_marks_field_errors_on_the_step_form() {
    let shell = Arc::new(RecordingShell::with_dialog("enroll"));
    let mut wizard = enrollment(shell, Arc::new(Mutex::new(None)));

    let mut form = wizard.current_form().unwrap();
    assert_eq!(form.id(), "student");
    form.set_field("name", json!("A"));
    assert!(wizard.submit_form(&mut form).await.is_err());
    assert!(form.field_error("name").is_some());

    form.set_values(student());
    let outcome = wizard.submit_form(&mut form).await.unwrap();
    assert_eq!(outcome, StepOutcome::Advanced { step: 2 });
    assert!(!form.has_errors());
}

#[tokio::test]
async fn shrinking_steps_clamps_and_republishes_buttons() {
    let shell = Arc::new(RecordingShell::with_dialog("d"));
    let mut wizard = Wizard::builder(two_step_schema())
        .step(StepDef::keyed("step1"))
        .step(StepDef::keyed("step2"))
        .build(shell.clone())
        .unwrap();

    wizard.submit_step(json!({ "a": 1 })).await.unwrap();
    assert_eq!(wizard.current_step(), 2);

    wizard.set_steps(vec![StepDef::keyed("step1")]).unwrap();
    assert_eq!(wizard.total_steps(), 1);
    assert_eq!(wizard.current_step(), 1);
    assert!(wizard.is_last_step());
    assert_eq!(shell.primary().unwrap().label_key, labels::CONFIRM);
    assert_eq!(shell.secondary().unwrap().action, ButtonAction::Cancel);

    assert!(matches!(wizard.set_steps(Vec::new()), Err(WizardError::NoSteps)));
}

#[tokio::test]
async fn reset_keeps_dialog_open() {
    let shell = Arc::new(RecordingShell::with_dialog("d"));
    let mut wizard = Wizard::builder(two_step_schema())
        .step(StepDef::keyed("step1"))
        .step(StepDef::keyed("step2"))
        .build(shell.clone())
        .unwrap();

    wizard.submit_step(json!({ "a": 1 })).await.unwrap();
    wizard.reset();

    assert_eq!(wizard.current_step(), 1);
    assert!(wizard.form_data().is_empty());
    assert!(
        !shell
            .events()
            .iter()
            .any(|e| matches!(e, ShellEvent::Pop { .. }))
    );
}
