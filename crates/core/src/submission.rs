//! Submission controller
//!
//! `Idle -> Submitting -> {Success, Failed}`. A submit is refused while the
//! form is invalid or a request is already in flight. Failures never
//! surface as errors to the caller; the status code goes to the error
//! channel instead.

use crate::api::{AuthApi, Navigator};
use crate::config::PortalConfig;
use crate::error::SubmissionError;
use crate::form::{FormKind, FormSnapshot};
use crate::observe::{Observers, Subscription};
use crate::redirect::resolve_redirect;
use futures::future::{AbortHandle, Abortable};
use std::cell::{Cell, RefCell};

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Success,
    Failed,
}

/// What a call to [`SubmissionController::submit`] ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No request was sent
    Refused,
    /// The browser was sent to this URL
    Redirected(String),
    /// The endpoint rejected the request; the error was also broadcast
    Failed(SubmissionError),
    /// The request was aborted before it resolved
    Cancelled,
}

/// Drives one form's submission against the authentication API
pub struct SubmissionController<A, N> {
    kind: FormKind,
    api: A,
    navigator: N,
    config: PortalConfig,
    state: Cell<SubmitState>,
    in_flight: RefCell<Option<AbortHandle>>,
    last_error: Cell<Option<SubmissionError>>,
    errors: Observers<Option<SubmissionError>>,
}

/// Resets the controller when a submit future is dropped before it resolves
struct InFlightGuard<'a> {
    state: &'a Cell<SubmitState>,
    in_flight: &'a RefCell<Option<AbortHandle>>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.borrow_mut().take();
        if self.state.get() == SubmitState::Submitting {
            tracing::debug!("Submit future dropped while in flight");
            self.state.set(SubmitState::Idle);
        }
    }
}

impl<A: AuthApi, N: Navigator> SubmissionController<A, N> {
    pub fn new(kind: FormKind, api: A, navigator: N, config: PortalConfig) -> Self {
        Self {
            kind,
            api,
            navigator,
            config,
            state: Cell::new(SubmitState::Idle),
            in_flight: RefCell::new(None),
            last_error: Cell::new(None),
            errors: Observers::new(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn state(&self) -> SubmitState {
        self.state.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.get() == SubmitState::Submitting
    }

    /// Error from the most recent attempt, if it failed
    pub fn last_error(&self) -> Option<SubmissionError> {
        self.last_error.get()
    }

    /// Observe the form-level error: `Some` when a submission fails, `None`
    /// when a new attempt clears the previous one
    pub fn subscribe_errors(
        &self,
        callback: impl Fn(&Option<SubmissionError>) + 'static,
    ) -> Subscription {
        self.errors.subscribe(callback)
    }

    /// Submit the form if it is valid and nothing is in flight.
    ///
    /// Every call counts as an attempt and clears the previous error, even
    /// when the submit is then refused.
    pub async fn submit(&self, form: &FormSnapshot) -> SubmitOutcome {
        self.clear_error();

        if self.is_submitting() {
            tracing::debug!(kind = ?self.kind, "Submit refused: request already in flight");
            return SubmitOutcome::Refused;
        }
        if form.kind != self.kind {
            tracing::warn!(expected = ?self.kind, got = ?form.kind, "Submit refused: wrong form");
            return SubmitOutcome::Refused;
        }
        if !form.is_valid() {
            tracing::debug!(kind = ?self.kind, "Submit refused: form is invalid");
            return SubmitOutcome::Refused;
        }

        let credentials = form.credentials();
        let (handle, registration) = AbortHandle::new_pair();
        *self.in_flight.borrow_mut() = Some(handle);
        self.state.set(SubmitState::Submitting);
        let _guard = InFlightGuard {
            state: &self.state,
            in_flight: &self.in_flight,
        };
        tracing::debug!(kind = ?self.kind, email = %credentials.email, "Submitting");

        let request = match self.kind {
            FormKind::SignIn => self.api.sign_in(&credentials),
            FormKind::SignUp => self.api.sign_up(&credentials),
        };
        let result = Abortable::new(request, registration).await;
        self.in_flight.borrow_mut().take();

        match result {
            Err(_aborted) => {
                tracing::debug!(kind = ?self.kind, "Submission cancelled");
                self.state.set(SubmitState::Idle);
                SubmitOutcome::Cancelled
            }
            Ok(Ok(user)) => {
                self.state.set(SubmitState::Success);
                let target = resolve_redirect(&self.navigator.query(), &self.config);
                tracing::info!(email = %user.email, role = ?user.role, target = %target, "Authenticated, redirecting");
                self.navigator.navigate(&target);
                SubmitOutcome::Redirected(target)
            }
            Ok(Err(err)) => {
                self.state.set(SubmitState::Failed);
                let err = SubmissionError::from(err);
                tracing::warn!(kind = ?self.kind, status = err.status, "Submission failed");
                self.last_error.set(Some(err));
                self.errors.emit(&Some(err));
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Abort the in-flight request, if any. Its response is discarded.
    pub fn cancel(&self) {
        if let Some(handle) = self.in_flight.borrow_mut().take() {
            handle.abort();
        }
    }

    fn clear_error(&self) {
        if self.last_error.take().is_some() {
            self.errors.emit(&None);
        }
    }
}

impl<A, N> Drop for SubmissionController<A, N> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.get_mut().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Credentials, UserMetadata};
    use crate::error::ApiError;
    use crate::form::{FieldName, FormModel};
    use async_trait::async_trait;
    use std::rc::Rc;
    use std::time::Duration;

    /// Fake endpoint returning a fixed result and recording requests
    struct FakeApi {
        result: Result<UserMetadata, ApiError>,
        requests: RefCell<Vec<(FormKind, Credentials)>>,
        gate: Option<Rc<tokio::sync::Notify>>,
    }

    impl FakeApi {
        fn answering(result: Result<UserMetadata, ApiError>) -> Self {
            Self {
                result,
                requests: RefCell::new(Vec::new()),
                gate: None,
            }
        }

        async fn respond(
            &self,
            kind: FormKind,
            credentials: &Credentials,
        ) -> Result<UserMetadata, ApiError> {
            self.requests.borrow_mut().push((kind, credentials.clone()));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.result.clone()
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeApi {
        async fn sign_in(&self, credentials: &Credentials) -> Result<UserMetadata, ApiError> {
            self.respond(FormKind::SignIn, credentials).await
        }

        async fn sign_up(&self, credentials: &Credentials) -> Result<UserMetadata, ApiError> {
            self.respond(FormKind::SignUp, credentials).await
        }

        async fn is_user_logged_in(&self) -> Result<bool, ApiError> {
            Ok(false)
        }
    }

    #[derive(Default)]
    struct FakeNavigator {
        query: String,
        visited: RefCell<Vec<String>>,
    }

    impl Navigator for FakeNavigator {
        fn query(&self) -> String {
            self.query.clone()
        }

        fn navigate(&self, url: &str) {
            self.visited.borrow_mut().push(url.to_string());
        }
    }

    fn success() -> Result<UserMetadata, ApiError> {
        Ok(UserMetadata {
            email: "a@b.com".into(),
            role: None,
        })
    }

    fn controller(
        api: FakeApi,
        query: &str,
    ) -> SubmissionController<FakeApi, FakeNavigator> {
        let navigator = FakeNavigator {
            query: query.to_string(),
            ..FakeNavigator::default()
        };
        SubmissionController::new(FormKind::SignUp, api, navigator, PortalConfig::default())
    }

    fn sign_up_form(email: &str, password: &str, confirm: &str) -> Rc<FormSnapshot> {
        let form = FormModel::new(FormKind::SignUp);
        form.set_value(FieldName::Email, email);
        form.set_value(FieldName::Password, password);
        form.set_value(FieldName::ConfirmPassword, confirm);
        form.snapshot()
    }

    #[tokio::test]
    async fn test_empty_form_is_refused() {
        let controller = controller(FakeApi::answering(success()), "");
        let outcome = controller.submit(&sign_up_form("", "", "")).await;

        assert_eq!(outcome, SubmitOutcome::Refused);
        assert!(controller.api.requests.borrow().is_empty());
        assert_eq!(controller.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn test_mismatched_passwords_are_refused() {
        let controller = controller(FakeApi::answering(success()), "");
        let outcome = controller
            .submit(&sign_up_form("a@b.com", "abc123", "abc124"))
            .await;

        assert_eq!(outcome, SubmitOutcome::Refused);
        assert!(controller.api.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_success_without_param_goes_home() {
        let controller = controller(FakeApi::answering(success()), "");
        let outcome = controller
            .submit(&sign_up_form("a@b.com", "abc123", "abc123"))
            .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Redirected(PortalConfig::DEFAULT_REDIRECT_URL.into())
        );
        assert_eq!(
            *controller.navigator.visited.borrow(),
            vec![PortalConfig::DEFAULT_REDIRECT_URL.to_string()]
        );
        assert_eq!(controller.state(), SubmitState::Success);

        let requests = controller.api.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, FormKind::SignUp);
        assert_eq!(
            requests[0].1,
            Credentials {
                email: "a@b.com".into(),
                password: "abc123".into()
            }
        );
    }

    #[tokio::test]
    async fn test_success_follows_redirect_param() {
        let controller = controller(FakeApi::answering(success()), "?redirect=%2Fdashboard");
        controller
            .submit(&sign_up_form("a@b.com", "abc123", "abc123"))
            .await;

        assert_eq!(*controller.navigator.visited.borrow(), vec!["/dashboard"]);
    }

    #[tokio::test]
    async fn test_failure_emits_status_and_stays_put() {
        let controller = controller(FakeApi::answering(Err(ApiError::Status(409))), "");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _subscription = {
            let seen = seen.clone();
            controller.subscribe_errors(move |err| seen.borrow_mut().push(err.map(|err| err.status)))
        };

        let form = sign_up_form("a@b.com", "abc123", "abc123");
        let outcome = controller.submit(&form).await;

        assert_eq!(outcome, SubmitOutcome::Failed(SubmissionError { status: 409 }));
        assert_eq!(*seen.borrow(), vec![Some(409)]);
        assert_eq!(controller.last_error(), Some(SubmissionError { status: 409 }));
        assert!(controller.navigator.visited.borrow().is_empty());
        assert_eq!(controller.state(), SubmitState::Failed);
        assert_eq!(form.value(FieldName::Email), "a@b.com");
    }

    #[tokio::test]
    async fn test_retry_after_failure_is_allowed() {
        let controller = controller(FakeApi::answering(Err(ApiError::Status(500))), "");
        let form = sign_up_form("a@b.com", "abc123", "abc123");

        controller.submit(&form).await;
        controller.submit(&form).await;
        assert_eq!(controller.api.requests.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_reports_status_zero() {
        let controller = controller(
            FakeApi::answering(Err(ApiError::Transport("offline".into()))),
            "",
        );
        let outcome = controller
            .submit(&sign_up_form("a@b.com", "abc123", "abc123"))
            .await;
        assert_eq!(outcome, SubmitOutcome::Failed(SubmissionError { status: 0 }));
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_refused() {
        let gate = Rc::new(tokio::sync::Notify::new());
        let api = FakeApi {
            gate: Some(gate.clone()),
            ..FakeApi::answering(success())
        };
        let controller = controller(api, "");
        let form = sign_up_form("a@b.com", "abc123", "abc123");

        let first = controller.submit(&form);
        let second = async {
            tokio::task::yield_now().await;
            let outcome = controller.submit(&form).await;
            gate.notify_one();
            outcome
        };
        let (first, second) = futures::join!(first, second);

        assert_eq!(second, SubmitOutcome::Refused);
        assert!(matches!(first, SubmitOutcome::Redirected(_)));
        assert_eq!(controller.api.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_discards_response() {
        let gate = Rc::new(tokio::sync::Notify::new());
        let api = FakeApi {
            gate: Some(gate.clone()),
            ..FakeApi::answering(Err(ApiError::Status(409)))
        };
        let controller = controller(api, "");
        let seen = Rc::new(Cell::new(false));
        let _subscription = {
            let seen = seen.clone();
            controller.subscribe_errors(move |_| seen.set(true))
        };
        let form = sign_up_form("a@b.com", "abc123", "abc123");

        let submit = controller.submit(&form);
        let teardown = async {
            tokio::task::yield_now().await;
            controller.cancel();
            gate.notify_one();
        };
        let (outcome, ()) = futures::join!(submit, teardown);

        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert!(!seen.get());
        assert!(controller.navigator.visited.borrow().is_empty());
        assert_eq!(controller.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn test_dropped_submit_resets_controller() {
        let gate = Rc::new(tokio::sync::Notify::new());
        let api = FakeApi {
            gate: Some(gate.clone()),
            ..FakeApi::answering(success())
        };
        let controller = controller(api, "");
        let form = sign_up_form("a@b.com", "abc123", "abc123");

        let timed_out =
            tokio::time::timeout(Duration::from_millis(10), controller.submit(&form)).await;
        assert!(timed_out.is_err());
        assert_eq!(controller.state(), SubmitState::Idle);
        assert!(controller.in_flight.borrow().is_none());

        gate.notify_one();
        let outcome = controller.submit(&form).await;
        assert!(matches!(outcome, SubmitOutcome::Redirected(_)));
        assert_eq!(controller.api.requests.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_refused_attempt_clears_previous_error() {
        let controller = controller(FakeApi::answering(Err(ApiError::Status(401))), "");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _subscription = {
            let seen = seen.clone();
            controller.subscribe_errors(move |err| seen.borrow_mut().push(*err))
        };

        controller
            .submit(&sign_up_form("a@b.com", "abc123", "abc123"))
            .await;
        assert_eq!(controller.last_error(), Some(SubmissionError { status: 401 }));

        let outcome = controller.submit(&sign_up_form("a@b.com", "", "")).await;

        assert_eq!(outcome, SubmitOutcome::Refused);
        assert_eq!(controller.last_error(), None);
        assert_eq!(
            *seen.borrow(),
            vec![Some(SubmissionError { status: 401 }), None]
        );
        assert_eq!(controller.api.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_form_kind_is_refused() {
        let controller = controller(FakeApi::answering(success()), "");
        let form = FormModel::new(FormKind::SignIn);
        form.set_value(FieldName::Email, "a@b.com");
        form.set_value(FieldName::Password, "abc123");

        assert_eq!(controller.submit(&form.snapshot()).await, SubmitOutcome::Refused);
    }
}
