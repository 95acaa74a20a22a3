//! Form hook shared by the sign-in and sign-up pages
//!
//! Binds a [`FormModel`] and a [`SubmissionController`] to component state.
//! Both subscriptions are released, and any in-flight request aborted, when
//! the component unmounts.

use crate::api::PortalApi;
use crate::browser::BrowserNavigator;
use crate::config::portal_config;
use portal_core::{
    FieldName, FormKind, FormModel, FormSnapshot, SubmissionController, SubmissionError,
    SubmitOutcome,
};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub type PortalController = SubmissionController<PortalApi, BrowserNavigator>;

/// Handle returned by [`use_auth_form`]
#[derive(Clone)]
pub struct UseAuthFormHandle {
    model: Rc<FormModel>,
    controller: Rc<PortalController>,
    snapshot: UseStateHandle<Rc<FormSnapshot>>,
    submitting: UseStateHandle<bool>,
    submission_error: UseStateHandle<Option<SubmissionError>>,
}

impl UseAuthFormHandle {
    /// Latest validated form state
    pub fn snapshot(&self) -> Rc<FormSnapshot> {
        Rc::clone(&*self.snapshot)
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting
    }

    pub fn submission_error(&self) -> Option<SubmissionError> {
        *self.submission_error
    }

    /// Field message, hidden until the user has left the field or tried to submit
    pub fn visible_error(&self, field: FieldName) -> AttrValue {
        if self.snapshot.is_touched(field) {
            AttrValue::from(self.snapshot.display_error(field).to_string())
        } else {
            AttrValue::default()
        }
    }

    pub fn oninput(&self, field: FieldName) -> Callback<InputEvent> {
        let model = self.model.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            model.set_value(field, input.value());
        })
    }

    pub fn onblur(&self, field: FieldName) -> Callback<FocusEvent> {
        let model = self.model.clone();
        Callback::from(move |_| model.mark_touched(field))
    }

    pub fn onsubmit(&self) -> Callback<SubmitEvent> {
        let handle = self.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            handle.submit();
        })
    }

    /// Submit the current snapshot in the background.
    ///
    /// An invalid form is not sent; its fields are marked touched so their
    /// messages show. Either way the controller clears the previous
    /// submission error.
    pub fn submit(&self) {
        self.submission_error.set(None);

        let snapshot = self.model.snapshot();
        if !snapshot.is_valid() {
            for field in snapshot.kind.fields() {
                self.model.mark_touched(*field);
            }
        }

        let sends = snapshot.is_valid() && !self.controller.is_submitting();
        if sends {
            self.submitting.set(true);
        }

        let controller = self.controller.clone();
        let submitting = self.submitting.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = controller.submit(&snapshot).await;
            if sends && outcome != SubmitOutcome::Cancelled {
                submitting.set(false);
            }
        });
    }
}

/// Form state and submission for `kind`
#[hook]
pub fn use_auth_form(kind: FormKind) -> UseAuthFormHandle {
    let model = use_memo(kind, |kind| FormModel::new(*kind));
    let controller = use_memo(kind, |kind| {
        let config = portal_config();
        SubmissionController::new(
            *kind,
            PortalApi::connect(config),
            BrowserNavigator,
            config.clone(),
        )
    });

    let snapshot = {
        let model = model.clone();
        use_state(move || model.snapshot())
    };
    let submitting = use_state(|| false);
    let submission_error = use_state(|| None::<SubmissionError>);

    {
        let model = model.clone();
        let snapshot = snapshot.clone();
        use_effect_with(kind, move |_| {
            let subscription = model.subscribe(move |next| snapshot.set(Rc::clone(next)));
            move || drop(subscription)
        });
    }

    {
        let controller = controller.clone();
        let submission_error = submission_error.clone();
        use_effect_with(kind, move |_| {
            let subscription =
                controller.subscribe_errors(move |err| submission_error.set(*err));
            move || {
                drop(subscription);
                controller.cancel();
            }
        });
    }

    UseAuthFormHandle {
        model,
        controller,
        snapshot,
        submitting,
        submission_error,
    }
}
