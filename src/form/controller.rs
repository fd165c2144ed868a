use std::cell::{Cell, RefCell};

use log::{debug, info, warn};

use super::channel::SubmissionChannel;
use super::field::{ContactPayload, Field};
use super::render::{RenderSink, StatusKind, StatusMessage};
use super::validation::{validate_field, validate_form, FormReport, ValidationResult};
use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// An attempt was already in flight; nothing was dispatched.
    Ignored,
    /// Validation failed; field errors were rendered and nothing was dispatched.
    Invalid(FormReport),
    Succeeded,
    Failed,
}

/// Labels and texts the controller renders.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerOptions {
    pub submit_label: String,
    pub working_label: String,
    pub success_text: String,
    pub error_text: String,
    pub success_dismiss_ms: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            submit_label: "Send request".to_string(),
            working_label: "Sending...".to_string(),
            success_text: "Thank you! We will get back to you shortly.".to_string(),
            error_text: "Something went wrong. Please try again or contact us directly."
                .to_string(),
            success_dismiss_ms: config::STATUS_AUTO_DISMISS_MS,
        }
    }
}

/// Owns the contact form's fields and runs one submit attempt at a time.
///
/// All UI effects go through `R`; delivery goes through `C`. The controller
/// itself never touches the DOM, so it runs the same under a native test
/// executor as in the browser.
pub struct SubmissionController<C, R: RenderSink> {
    fields: RefCell<Vec<Field>>,
    state: Cell<SubmissionState>,
    label: RefCell<String>,
    channel: C,
    sink: R,
    options: ControllerOptions,
}

impl<C, R> SubmissionController<C, R>
where
    C: SubmissionChannel,
    R: RenderSink,
{
    pub fn new(fields: Vec<Field>, channel: C, sink: R, options: ControllerOptions) -> Self {
        let label = RefCell::new(options.submit_label.clone());
        Self {
            fields: RefCell::new(fields),
            state: Cell::new(SubmissionState::Idle),
            label,
            channel,
            sink,
            options,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    #[cfg(test)]
    pub fn fields(&self) -> Vec<Field> {
        self.fields.borrow().clone()
    }

    #[cfg(test)]
    pub fn value(&self, name: &str) -> Option<String> {
        self.fields
            .borrow()
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.clone())
    }

    /// Input event: store the new value and drop any error shown for it.
    pub fn input(&self, name: &str, value: String) {
        {
            let mut fields = self.fields.borrow_mut();
            match fields.iter_mut().find(|field| field.name == name) {
                Some(field) => field.value = value,
                None => {
                    warn!("input for unknown field {}", name);
                    return;
                }
            }
        }
        self.sink.set_field_error(name, None);
    }

    /// Blur event: validate the one field and render the result.
    pub fn blur(&self, name: &str) -> Option<ValidationResult> {
        let result = {
            let fields = self.fields.borrow();
            let field = fields.iter().find(|field| field.name == name)?;
            validate_field(field.trimmed_value(), field.kind, field.required)
        };
        self.render_result(name, &result);
        Some(result)
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self.state.get() != SubmissionState::Idle {
            debug!("submit ignored, an attempt is already in flight");
            return SubmitOutcome::Ignored;
        }

        let report = validate_form(&self.fields.borrow());
        for (name, result) in &report.results {
            self.render_result(name, result);
        }
        if !report.is_valid() {
            return SubmitOutcome::Invalid(report);
        }

        let payload = ContactPayload::from_fields(&self.fields.borrow());
        let _guard = SubmitGuard::enter(self);

        match self.channel.submit(&payload).await {
            Ok(()) => {
                info!("contact form submitted");
                self.state.set(SubmissionState::Succeeded);
                for field in self.fields.borrow_mut().iter_mut() {
                    field.value.clear();
                }
                self.sink.clear_fields();
                self.sink.show_status(StatusMessage {
                    text: self.options.success_text.clone(),
                    kind: StatusKind::Success,
                    auto_dismiss_ms: Some(self.options.success_dismiss_ms),
                });
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                warn!("contact form submission failed: {}", e);
                self.state.set(SubmissionState::Failed);
                self.sink.show_status(StatusMessage {
                    text: self.options.error_text.clone(),
                    kind: StatusKind::Error,
                    auto_dismiss_ms: None,
                });
                SubmitOutcome::Failed
            }
        }
    }

    fn render_result(&self, name: &str, result: &ValidationResult) {
        match result {
            Ok(()) => self.sink.set_field_error(name, None),
            Err(e) => self.sink.set_field_error(name, Some(&e.to_string())),
        }
    }
}

/// Holds the submit control disabled for the life of one attempt and
/// restores it on drop, whether the attempt finished or was abandoned.
struct SubmitGuard<'a, C, R: RenderSink> {
    controller: &'a SubmissionController<C, R>,
    original_label: String,
}

impl<'a, C, R: RenderSink> SubmitGuard<'a, C, R> {
    fn enter(controller: &'a SubmissionController<C, R>) -> Self {
        controller.state.set(SubmissionState::Submitting);
        let working = controller.options.working_label.clone();
        let original_label = controller.label.replace(working.clone());
        controller.sink.set_submit_control(&working, false);
        Self {
            controller,
            original_label,
        }
    }
}

impl<'a, C, R: RenderSink> Drop for SubmitGuard<'a, C, R> {
    fn drop(&mut self) {
        let controller = self.controller;
        controller.state.set(SubmissionState::Idle);
        controller.label.replace(self.original_label.clone());
        controller
            .sink
            .set_submit_control(&self.original_label, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::channel::{SubmissionError, SubmitFuture};
    use crate::form::field::FieldKind;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future;

    #[derive(Clone, Debug, PartialEq)]
    enum RenderEvent {
        FieldError(String, Option<String>),
        SubmitControl(String, bool),
        Status(StatusMessage),
        ClearFields,
    }

    #[derive(Default)]
    struct RecordingSink {
        events: RefCell<Vec<RenderEvent>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<RenderEvent> {
            self.events.borrow().clone()
        }

        fn statuses(&self) -> Vec<StatusMessage> {
            self.events()
                .into_iter()
                .filter_map(|event| match event {
                    RenderEvent::Status(message) => Some(message),
                    _ => None,
                })
                .collect()
        }

        fn last_control(&self) -> Option<(String, bool)> {
            self.events().into_iter().rev().find_map(|event| match event {
                RenderEvent::SubmitControl(label, enabled) => Some((label, enabled)),
                _ => None,
            })
        }

        fn field_errors(&self) -> Vec<(String, String)> {
            self.events()
                .into_iter()
                .filter_map(|event| match event {
                    RenderEvent::FieldError(name, Some(message)) => Some((name, message)),
                    _ => None,
                })
                .collect()
        }
    }

    impl RenderSink for RecordingSink {
        fn set_field_error(&self, field: &str, message: Option<&str>) {
            self.events.borrow_mut().push(RenderEvent::FieldError(
                field.to_string(),
                message.map(str::to_string),
            ));
        }

        fn set_submit_control(&self, label: &str, enabled: bool) {
            self.events
                .borrow_mut()
                .push(RenderEvent::SubmitControl(label.to_string(), enabled));
        }

        fn show_status(&self, message: StatusMessage) {
            self.events.borrow_mut().push(RenderEvent::Status(message));
        }

        fn clear_fields(&self) {
            self.events.borrow_mut().push(RenderEvent::ClearFields);
        }
    }

    struct StubChannel {
        fail: bool,
        calls: Cell<usize>,
        last_payload: RefCell<Option<ContactPayload>>,
    }

    impl StubChannel {
        fn succeeding() -> Self {
            Self {
                fail: false,
                calls: Cell::new(0),
                last_payload: RefCell::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::succeeding()
            }
        }
    }

    impl SubmissionChannel for StubChannel {
        fn submit<'a>(&'a self, payload: &'a ContactPayload) -> SubmitFuture<'a> {
            self.calls.set(self.calls.get() + 1);
            *self.last_payload.borrow_mut() = Some(payload.clone());
            let result = if self.fail {
                Err(SubmissionError::Rejected { status: 500 })
            } else {
                Ok(())
            };
            Box::pin(future::ready(result))
        }
    }

    /// Resolves only once the paired sender fires.
    struct GatedChannel {
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        calls: Cell<usize>,
    }

    impl SubmissionChannel for GatedChannel {
        fn submit<'a>(&'a self, _payload: &'a ContactPayload) -> SubmitFuture<'a> {
            self.calls.set(self.calls.get() + 1);
            let gate = self.gate.borrow_mut().take();
            Box::pin(async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok(())
            })
        }
    }

    fn contact_fields(name: &str, email: &str, tel: &str) -> Vec<Field> {
        vec![
            Field::new("name", FieldKind::Text, true).with_value(name),
            Field::new("email", FieldKind::Email, true).with_value(email),
            Field::new("tel", FieldKind::Tel, true).with_value(tel),
        ]
    }

    fn controller<C: SubmissionChannel>(
        fields: Vec<Field>,
        channel: C,
    ) -> SubmissionController<C, RecordingSink> {
        SubmissionController::new(
            fields,
            channel,
            RecordingSink::default(),
            ControllerOptions::default(),
        )
    }

    #[test]
    fn invalid_form_never_leaves_idle() {
        let controller = controller(contact_fields("", "bad", "123"), StubChannel::succeeding());

        let report = match block_on(controller.submit()) {
            SubmitOutcome::Invalid(report) => report,
            other => panic!("expected invalid outcome, got {other:?}"),
        };
        assert_eq!(report.errors().len(), 3);
        assert_eq!(controller.channel.calls.get(), 0);
        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(
            controller.sink.field_errors(),
            vec![
                ("name".to_string(), "This field is required".to_string()),
                ("email".to_string(), "Enter a valid email address".to_string()),
                ("tel".to_string(), "Enter a valid phone number".to_string()),
            ]
        );
        assert!(controller.sink.statuses().is_empty());
        assert_eq!(controller.sink.last_control(), None);
    }

    #[test]
    fn successful_submit_clears_fields_and_restores_control() {
        let controller = controller(
            contact_fields("Jane", "jane@x.com", "+1 555 000 1111"),
            StubChannel::succeeding(),
        );

        let outcome = block_on(controller.submit());

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(controller.channel.calls.get(), 1);
        let payload = controller.channel.last_payload.borrow().clone().unwrap();
        assert_eq!(payload.get("email"), Some("jane@x.com"));

        assert!(controller.fields().iter().all(|field| field.value.is_empty()));
        assert!(controller.sink.events().contains(&RenderEvent::ClearFields));
        assert_eq!(
            controller.sink.statuses(),
            vec![StatusMessage {
                text: ControllerOptions::default().success_text,
                kind: StatusKind::Success,
                auto_dismiss_ms: Some(5_000),
            }]
        );
        assert_eq!(
            controller.sink.last_control(),
            Some(("Send request".to_string(), true))
        );
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn failed_submit_keeps_values_and_shows_sticky_error() {
        let controller = controller(
            contact_fields("Jane", "jane@x.com", "+1 555 000 1111"),
            StubChannel::failing(),
        );

        let outcome = block_on(controller.submit());

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(controller.value("name").as_deref(), Some("Jane"));
        assert_eq!(controller.value("tel").as_deref(), Some("+1 555 000 1111"));
        assert!(!controller.sink.events().contains(&RenderEvent::ClearFields));

        let statuses = controller.sink.statuses();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].kind, StatusKind::Error);
        assert_eq!(statuses[0].auto_dismiss_ms, None);
        assert_eq!(
            controller.sink.last_control(),
            Some(("Send request".to_string(), true))
        );
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn control_is_disabled_with_working_label_while_in_flight() {
        let controller = controller(
            contact_fields("Jane", "jane@x.com", "+1 555 000 1111"),
            StubChannel::succeeding(),
        );

        block_on(controller.submit());

        let controls: Vec<_> = controller
            .sink
            .events()
            .into_iter()
            .filter(|event| matches!(event, RenderEvent::SubmitControl(..)))
            .collect();
        assert_eq!(
            controls,
            vec![
                RenderEvent::SubmitControl("Sending...".to_string(), false),
                RenderEvent::SubmitControl("Send request".to_string(), true),
            ]
        );
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let (release, gate) = oneshot::channel();
        let controller = controller(
            contact_fields("Jane", "jane@x.com", "+1 555 000 1111"),
            GatedChannel {
                gate: RefCell::new(Some(gate)),
                calls: Cell::new(0),
            },
        );
        let controller = &controller;

        let (first, second) = block_on(async move {
            let first = controller.submit();
            let second = async move {
                assert_eq!(controller.state(), SubmissionState::Submitting);
                let outcome = controller.submit().await;
                let _ = release.send(());
                outcome
            };
            futures::join!(first, second)
        });

        assert_eq!(first, SubmitOutcome::Succeeded);
        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(controller.channel.calls.get(), 1);
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn abandoned_attempt_still_restores_control() {
        let (_release, gate) = oneshot::channel::<()>();
        let controller = controller(
            contact_fields("Jane", "jane@x.com", "+1 555 000 1111"),
            GatedChannel {
                gate: RefCell::new(Some(gate)),
                calls: Cell::new(0),
            },
        );

        block_on(async {
            let mut attempt = Box::pin(controller.submit());
            assert!(futures::poll!(attempt.as_mut()).is_pending());
            assert_eq!(controller.state(), SubmissionState::Submitting);
        });

        assert_eq!(controller.state(), SubmissionState::Idle);
        assert_eq!(
            controller.sink.last_control(),
            Some(("Send request".to_string(), true))
        );
    }

    #[test]
    fn input_clears_error_and_blur_validates_one_field() {
        let controller = controller(contact_fields("", "", ""), StubChannel::succeeding());

        assert_eq!(
            controller.blur("email"),
            Some(Err(crate::form::validation::ValidationError::Required))
        );
        controller.input("email", "jane@x.com".to_string());
        assert_eq!(controller.value("email").as_deref(), Some("jane@x.com"));
        assert_eq!(
            controller.sink.events().last(),
            Some(&RenderEvent::FieldError("email".to_string(), None))
        );
        assert_eq!(controller.blur("email"), Some(Ok(())));
        assert_eq!(controller.blur("missing"), None);
    }

    #[test]
    fn resubmitting_after_failure_dispatches_again() {
        let controller = controller(
            contact_fields("Jane", "jane@x.com", "+1 555 000 1111"),
            StubChannel::failing(),
        );

        assert_eq!(block_on(controller.submit()), SubmitOutcome::Failed);
        assert_eq!(block_on(controller.submit()), SubmitOutcome::Failed);
        assert_eq!(controller.channel.calls.get(), 2);
        assert_eq!(controller.sink.statuses().len(), 2);
    }
}
