use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config::{self, SubmissionMode};
use crate::form::channel::{HttpChannel, SimulatedChannel, SubmissionChannel};
use crate::form::controller::{
    ControllerOptions, SubmissionController, SubmissionState, SubmitOutcome,
};
use crate::form::field::{Field, FieldKind};
use crate::form::render::{RenderSink, StatusMessage};

struct FieldSpec {
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
    multiline: bool,
}

const CONTACT_FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        name: "name",
        label: "Name",
        kind: FieldKind::Text,
        required: true,
        multiline: false,
    },
    FieldSpec {
        name: "email",
        label: "Email",
        kind: FieldKind::Email,
        required: true,
        multiline: false,
    },
    FieldSpec {
        name: "phone",
        label: "Phone",
        kind: FieldKind::Tel,
        required: true,
        multiline: false,
    },
    FieldSpec {
        name: "message",
        label: "Tell us about your event",
        kind: FieldKind::Other,
        required: false,
        multiline: true,
    },
];

pub fn contact_fields() -> Vec<Field> {
    CONTACT_FIELDS
        .iter()
        .map(|spec| Field::new(spec.name, spec.kind, spec.required))
        .collect()
}

/// Everything the contact form renders, driven by the controller's sink.
#[derive(Clone, Debug, PartialEq)]
pub struct FormView {
    pub values: HashMap<String, String>,
    pub errors: HashMap<String, String>,
    pub submit_label: String,
    pub submit_enabled: bool,
    pub status: Option<(u32, StatusMessage)>,
}

impl FormView {
    pub fn new(options: &ControllerOptions) -> Self {
        Self {
            values: HashMap::new(),
            errors: HashMap::new(),
            submit_label: options.submit_label.clone(),
            submit_enabled: true,
            status: None,
        }
    }
}

pub enum FormAction {
    SetValue { field: String, value: String },
    SetError { field: String, message: Option<String> },
    SetSubmitControl { label: String, enabled: bool },
    ShowStatus { id: u32, message: StatusMessage },
    DismissStatus { id: u32 },
    ClearValues,
}

impl Reducible for FormView {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut view = (*self).clone();
        match action {
            FormAction::SetValue { field, value } => {
                view.values.insert(field, value);
            }
            FormAction::SetError { field, message } => match message {
                Some(message) => {
                    view.errors.insert(field, message);
                }
                None => {
                    view.errors.remove(&field);
                }
            },
            FormAction::SetSubmitControl { label, enabled } => {
                view.submit_label = label;
                view.submit_enabled = enabled;
            }
            FormAction::ShowStatus { id, message } => {
                view.status = Some((id, message));
            }
            FormAction::DismissStatus { id } => {
                // A newer message may have replaced the one this timer was for.
                if matches!(view.status, Some((current, _)) if current == id) {
                    view.status = None;
                }
            }
            FormAction::ClearValues => {
                view.values.clear();
            }
        }
        Rc::new(view)
    }
}

pub struct FormViewSink {
    dispatcher: UseReducerDispatcher<FormView>,
    status_seq: Cell<u32>,
}

impl FormViewSink {
    pub fn new(dispatcher: UseReducerDispatcher<FormView>) -> Self {
        Self {
            dispatcher,
            status_seq: Cell::new(0),
        }
    }
}

impl RenderSink for FormViewSink {
    fn set_field_error(&self, field: &str, message: Option<&str>) {
        self.dispatcher.dispatch(FormAction::SetError {
            field: field.to_string(),
            message: message.map(str::to_string),
        });
    }

    fn set_submit_control(&self, label: &str, enabled: bool) {
        self.dispatcher.dispatch(FormAction::SetSubmitControl {
            label: label.to_string(),
            enabled,
        });
    }

    fn show_status(&self, message: StatusMessage) {
        let id = self.status_seq.get().wrapping_add(1);
        self.status_seq.set(id);
        let auto_dismiss_ms = message.auto_dismiss_ms;
        self.dispatcher.dispatch(FormAction::ShowStatus { id, message });

        if let Some(ms) = auto_dismiss_ms {
            let dispatcher = self.dispatcher.clone();
            Timeout::new(ms, move || {
                dispatcher.dispatch(FormAction::DismissStatus { id });
            })
            .forget();
        }
    }

    fn clear_fields(&self) {
        self.dispatcher.dispatch(FormAction::ClearValues);
    }
}

type ContactController = SubmissionController<Box<dyn SubmissionChannel>, FormViewSink>;

fn build_controller(dispatcher: UseReducerDispatcher<FormView>) -> ContactController {
    let channel: Box<dyn SubmissionChannel> = match config::get_submission_mode() {
        SubmissionMode::Simulated => Box::new(SimulatedChannel {
            delay_ms: config::SIMULATED_DELAY_MS,
            failure_rate: config::SIMULATED_FAILURE_RATE,
        }),
        SubmissionMode::Http => Box::new(HttpChannel {
            endpoint: config::get_contact_endpoint().to_string(),
            timeout_ms: config::SUBMISSION_TIMEOUT_MS,
        }),
    };
    SubmissionController::new(
        contact_fields(),
        channel,
        FormViewSink::new(dispatcher),
        ControllerOptions::default(),
    )
}

fn input_value(e: &InputEvent) -> String {
    if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn outcome_summary(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Ignored => "ignored, already sending".to_string(),
        SubmitOutcome::Invalid(report) => {
            let names: Vec<&str> = report.errors().iter().map(|(name, _)| *name).collect();
            format!("invalid fields: {}", names.join(", "))
        }
        SubmitOutcome::Succeeded => "sent".to_string(),
        SubmitOutcome::Failed => "failed".to_string(),
    }
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let view = use_reducer(|| FormView::new(&ControllerOptions::default()));
    let controller = {
        let dispatcher = view.dispatcher();
        use_memo(move |_| build_controller(dispatcher), ())
    };

    let onsubmit = {
        let controller = controller.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if controller.state() != SubmissionState::Idle {
                debug!("contact form busy, submit ignored");
                return;
            }
            let controller = controller.clone();
            spawn_local(async move {
                let outcome = controller.submit().await;
                info!("contact form: {}", outcome_summary(&outcome));
            });
        })
    };

    let fields = CONTACT_FIELDS
        .iter()
        .map(|spec| {
            let name = spec.name;
            let oninput = {
                let controller = controller.clone();
                let dispatcher = view.dispatcher();
                Callback::from(move |e: InputEvent| {
                    let value = input_value(&e);
                    controller.input(name, value.clone());
                    dispatcher.dispatch(FormAction::SetValue {
                        field: name.to_string(),
                        value,
                    });
                })
            };
            let onblur = {
                let controller = controller.clone();
                Callback::from(move |_: FocusEvent| {
                    controller.blur(name);
                })
            };
            let value = view.values.get(name).cloned().unwrap_or_default();
            let error = view.errors.get(name).cloned();
            let class = classes!("form__input", error.is_some().then(|| "form__input--invalid"));
            let aria_required = if spec.required { "true" } else { "false" };

            html! {
                <div class="form__group">
                    <label class="form__label">{spec.label}</label>
                    if spec.multiline {
                        <textarea
                            name={name}
                            class={class}
                            aria-label={spec.label}
                            aria-required={aria_required}
                            value={value}
                            {oninput}
                            {onblur}
                        />
                    } else {
                        <input
                            type={spec.kind.input_type()}
                            name={name}
                            class={class}
                            aria-label={spec.label}
                            aria-required={aria_required}
                            value={value}
                            {oninput}
                            {onblur}
                        />
                    }
                    if let Some(error) = error {
                        <div class="field-error">{error}</div>
                    }
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <form class="form" novalidate=true {onsubmit}>
            {fields}
            <button type="submit" class="form__submit" disabled={!view.submit_enabled}>
                {view.submit_label.clone()}
            </button>
            if let Some((_, status)) = view.status.as_ref() {
                <div class={status.kind.class()} role="status">{&status.text}</div>
            }
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::render::StatusKind;
    use crate::form::validation::validate_form;

    fn reduce(view: Rc<FormView>, action: FormAction) -> Rc<FormView> {
        Reducible::reduce(view, action)
    }

    fn status(kind: StatusKind, auto_dismiss_ms: Option<u32>) -> StatusMessage {
        StatusMessage {
            text: format!("{kind:?}"),
            kind,
            auto_dismiss_ms,
        }
    }

    #[test]
    fn contact_fields_match_the_rendered_inputs() {
        let fields = contact_fields();
        let names: Vec<_> = fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, vec!["name", "email", "phone", "message"]);
        assert_eq!(fields.iter().filter(|field| field.required).count(), 3);
        assert_eq!(fields[2].kind, FieldKind::Tel);
    }

    #[test]
    fn stale_dismiss_does_not_remove_newer_message() {
        let view = Rc::new(FormView::new(&ControllerOptions::default()));
        let view = reduce(
            view,
            FormAction::ShowStatus { id: 1, message: status(StatusKind::Success, Some(5_000)) },
        );
        let view = reduce(
            view,
            FormAction::ShowStatus { id: 2, message: status(StatusKind::Error, None) },
        );
        let view = reduce(view, FormAction::DismissStatus { id: 1 });

        assert_eq!(
            view.status.as_ref().map(|(id, m)| (*id, m.kind)),
            Some((2, StatusKind::Error))
        );

        let view = reduce(view, FormAction::DismissStatus { id: 2 });
        assert!(view.status.is_none());
    }

    #[test]
    fn errors_and_values_track_actions() {
        let view = Rc::new(FormView::new(&ControllerOptions::default()));
        let view = reduce(
            view,
            FormAction::SetError { field: "email".into(), message: Some("bad".into()) },
        );
        let view = reduce(
            view,
            FormAction::SetValue { field: "email".into(), value: "a@b.co".into() },
        );
        assert_eq!(view.errors.get("email").map(String::as_str), Some("bad"));

        let view = reduce(view, FormAction::SetError { field: "email".into(), message: None });
        assert!(view.errors.is_empty());

        let view = reduce(view, FormAction::ClearValues);
        assert!(view.values.is_empty());
    }

    #[test]
    fn submit_control_state_is_replaced() {
        let view = Rc::new(FormView::new(&ControllerOptions::default()));
        assert!(view.submit_enabled);

        let view = reduce(
            view,
            FormAction::SetSubmitControl { label: "Sending...".into(), enabled: false },
        );
        assert_eq!(view.submit_label, "Sending...");
        assert!(!view.submit_enabled);
    }

    #[test]
    fn empty_submit_is_logged_with_missing_fields() {
        let outcome = SubmitOutcome::Invalid(validate_form(&contact_fields()));
        assert_eq!(outcome_summary(&outcome), "invalid fields: name, email, phone");
        assert_eq!(outcome_summary(&SubmitOutcome::Ignored), "ignored, already sending");
    }
}
