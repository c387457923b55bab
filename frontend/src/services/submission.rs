//! Submission controller.
//!
//! ```text
//!  Idle ──submit──▶ Pending ──response──▶ Success(artifact) ─┐
//!   ▲                  │                                     │
//!   │                  └──error/non-2xx──▶ Failure(message) ─┤
//!   └────────────────────────────────────────────────────────┘
//! ```
//!
//! While pending the submit trigger is disabled and relabeled. Leaving the
//! pending phase restores it exactly once, on every path.

use std::cell::Cell;

use crate::config::{CALCULATION_METHOD, PROCESSING_LABEL, SUBMIT_LABEL};
use crate::services::artifact::ArtifactFactory;
use crate::services::notify::Notifier;
use crate::{AppError, AppResult, RemoteResponse, SubmissionOutcome, SubmissionRequest, ValidationError};

/// Sends a submission to the calculation endpoint.
#[allow(async_fn_in_trait)]
pub trait CalculationTransport {
    type File;

    async fn send(&self, request: SubmissionRequest<Self::File>) -> AppResult<RemoteResponse>;
}

/// The submit affordance (button) the controller drives.
pub trait SubmitTrigger {
    fn set_enabled(&self, enabled: bool, label: &str);
}

impl<F> SubmissionRequest<F> {
    pub fn new(train_file: F, test_file: F, descriptor_type: &str) -> Self {
        Self {
            train_file,
            test_file,
            method: CALCULATION_METHOD.to_string(),
            descriptor_type: descriptor_type.to_string(),
        }
    }
}

/// Marks the controller pending for its lifetime.
struct PendingGuard<'a, B: SubmitTrigger> {
    pending: &'a Cell<bool>,
    trigger: &'a B,
}

impl<'a, B: SubmitTrigger> PendingGuard<'a, B> {
    fn engage(pending: &'a Cell<bool>, trigger: &'a B) -> Self {
        pending.set(true);
        trigger.set_enabled(false, PROCESSING_LABEL);
        Self { pending, trigger }
    }
}

impl<B: SubmitTrigger> Drop for PendingGuard<'_, B> {
    fn drop(&mut self) {
        self.trigger.set_enabled(true, SUBMIT_LABEL);
        self.pending.set(false);
    }
}

/// Gates, dispatches and settles submissions, one at a time.
pub struct SubmissionController<T, N, B, A> {
    transport: T,
    notifier: N,
    trigger: B,
    artifacts: A,
    pending: Cell<bool>,
}

impl<T, N, B, A> SubmissionController<T, N, B, A>
where
    T: CalculationTransport,
    N: Notifier,
    B: SubmitTrigger,
    A: ArtifactFactory,
{
    pub fn new(transport: T, notifier: N, trigger: B, artifacts: A) -> Self {
        Self {
            transport,
            notifier,
            trigger,
            artifacts,
            pending: Cell::new(false),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Submit both files with the selected descriptor type.
    ///
    /// Returns `None` when nothing was dispatched: a file is missing (the
    /// user is told) or another submission is still pending. Failures are
    /// reported to the user before returning.
    pub async fn submit(
        &self,
        train_file: Option<T::File>,
        test_file: Option<T::File>,
        descriptor_type: &str,
    ) -> Option<SubmissionOutcome> {
        if self.is_pending() {
            log::warn!("Submission already in flight, ignoring click");
            return None;
        }

        let (Some(train_file), Some(test_file)) = (train_file, test_file) else {
            self.notifier.report(&ValidationError::MissingFiles.into());
            return None;
        };

        let request = SubmissionRequest::new(train_file, test_file, descriptor_type);
        log::info!(
            "Submitting calculation (method: {}, descriptors: {})",
            request.method,
            request.descriptor_type
        );

        let settled = {
            let _pending = PendingGuard::engage(&self.pending, &self.trigger);
            self.dispatch(request).await
        };

        match settled {
            Ok(handle) => {
                log::info!("Calculation succeeded ({} bytes)", handle.size());
                Some(SubmissionOutcome::Success(handle))
            }
            Err(err) => {
                log::error!("Calculation failed: {}", err);
                self.notifier.report(&err);
                Some(SubmissionOutcome::Failure(err.to_string()))
            }
        }
    }

    async fn dispatch(&self, request: SubmissionRequest<T::File>) -> AppResult<crate::ArtifactHandle> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(AppError::Remote(response.failure_message()));
        }
        self.artifacts.wrap(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GENERIC_FAILURE;
    use crate::services::fakes::{FakeArtifacts, FakeFile, FakeNotifier, FakeTransport, FakeTrigger};
    use futures::executor::block_on;

    type Controller = SubmissionController<FakeTransport, FakeNotifier, FakeTrigger, FakeArtifacts>;

    fn controller(transport: FakeTransport) -> (Controller, FakeNotifier, FakeTrigger, FakeArtifacts) {
        let notifier = FakeNotifier::default();
        let trigger = FakeTrigger::default();
        let artifacts = FakeArtifacts::default();
        let controller = SubmissionController::new(
            transport,
            notifier.clone(),
            trigger.clone(),
            artifacts.clone(),
        );
        (controller, notifier, trigger, artifacts)
    }

    fn both_files() -> (Option<FakeFile>, Option<FakeFile>) {
        (Some(FakeFile::named("train.xlsx")), Some(FakeFile::named("test.xlsx")))
    }

    fn assert_restored_once(trigger: &FakeTrigger) {
        assert_eq!(
            trigger.calls.borrow().as_slice(),
            &[
                (false, PROCESSING_LABEL.to_string()),
                (true, SUBMIT_LABEL.to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_file_never_dispatches() {
        let transport = FakeTransport::ok(b"xlsx");
        let (controller, notifier, trigger, _) = controller(transport.clone());

        let only_train = block_on(controller.submit(Some(FakeFile::named("train.xlsx")), None, "User Defined Descriptors"));
        let only_test = block_on(controller.submit(None, Some(FakeFile::named("test.xlsx")), "User Defined Descriptors"));

        assert!(only_train.is_none());
        assert!(only_test.is_none());
        assert!(transport.sent.borrow().is_empty());
        assert!(trigger.calls.borrow().is_empty());
        assert_eq!(
            notifier.messages.borrow().as_slice(),
            &["Please upload both training and test files.", "Please upload both training and test files."]
        );
    }

    #[test]
    fn test_request_carries_files_method_and_descriptor() {
        let transport = FakeTransport::ok(b"xlsx");
        let (controller, _, _, _) = controller(transport.clone());
        let (train, test) = both_files();

        block_on(controller.submit(train, test, "Selected RDKit Descriptors"));

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].train_file.name, "train.xlsx");
        assert_eq!(sent[0].test_file.name, "test.xlsx");
        assert_eq!(sent[0].method, CALCULATION_METHOD);
        assert_eq!(sent[0].descriptor_type, "Selected RDKit Descriptors");
    }

    #[test]
    fn test_success_wraps_artifact_and_restores_trigger() {
        let (controller, notifier, trigger, artifacts) = controller(FakeTransport::ok(b"PK\x03\x04"));
        let (train, test) = both_files();

        let outcome = block_on(controller.submit(train, test, "User Defined Descriptors"));

        match outcome {
            Some(SubmissionOutcome::Success(handle)) => {
                assert_eq!(handle.size(), 4);
                assert_eq!(artifacts.counter.count(), 0);
                handle.release();
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(artifacts.counter.count(), 1);
        assert!(notifier.messages.borrow().is_empty());
        assert!(!controller.is_pending());
        assert_restored_once(&trigger);
    }

    #[test]
    fn test_remote_error_message_is_surfaced_verbatim() {
        let transport = FakeTransport::replying(Ok(RemoteResponse {
            status: 400,
            body: br#"{"error": "bad descriptor"}"#.to_vec(),
        }));
        let (controller, notifier, trigger, artifacts) = controller(transport);
        let (train, test) = both_files();

        let outcome = block_on(controller.submit(train, test, "User Defined Descriptors"));

        assert!(matches!(outcome, Some(SubmissionOutcome::Failure(ref m)) if m == "bad descriptor"));
        assert_eq!(notifier.messages.borrow().as_slice(), &["bad descriptor"]);
        assert_eq!(artifacts.counter.count(), 0);
        assert_restored_once(&trigger);
    }

    #[test]
    fn test_remote_error_without_body_uses_generic_message() {
        let transport = FakeTransport::replying(Ok(RemoteResponse { status: 500, body: Vec::new() }));
        let (controller, notifier, trigger, _) = controller(transport);
        let (train, test) = both_files();

        let outcome = block_on(controller.submit(train, test, "User Defined Descriptors"));

        assert!(matches!(outcome, Some(SubmissionOutcome::Failure(ref m)) if m == GENERIC_FAILURE));
        assert_eq!(notifier.messages.borrow().as_slice(), &[GENERIC_FAILURE]);
        assert_restored_once(&trigger);
    }

    #[test]
    fn test_transport_error_is_prefixed_and_restores_trigger() {
        let transport = FakeTransport::replying(Err(AppError::Transport("Failed to fetch".into())));
        let (controller, notifier, trigger, _) = controller(transport);
        let (train, test) = both_files();

        let outcome = block_on(controller.submit(train, test, "User Defined Descriptors"));

        assert!(matches!(outcome, Some(SubmissionOutcome::Failure(ref m)) if m == "Error: Failed to fetch"));
        assert_eq!(notifier.messages.borrow().as_slice(), &["Error: Failed to fetch"]);
        assert!(!controller.is_pending());
        assert_restored_once(&trigger);
    }

    #[test]
    fn test_submit_while_pending_is_ignored() {
        let transport = FakeTransport::ok(b"xlsx");
        let (controller, notifier, trigger, _) = controller(transport.clone());
        controller.pending.set(true);

        let (train, test) = both_files();
        let outcome = block_on(controller.submit(train, test, "User Defined Descriptors"));

        assert!(outcome.is_none());
        assert!(transport.sent.borrow().is_empty());
        assert!(trigger.calls.borrow().is_empty());
        assert!(notifier.messages.borrow().is_empty());
        assert!(controller.is_pending());

        controller.pending.set(false);
        let (train, test) = both_files();
        let outcome = block_on(controller.submit(train, test, "User Defined Descriptors"));
        assert!(matches!(outcome, Some(SubmissionOutcome::Success(_))));
        assert_eq!(transport.sent.borrow().len(), 1);
        assert_restored_once(&trigger);
    }

    #[test]
    fn test_controller_is_reusable_after_failure() {
        let transport = FakeTransport::replying(Ok(RemoteResponse { status: 500, body: Vec::new() }));
        let (controller, _, trigger, _) = controller(transport.clone());

        let (train, test) = both_files();
        block_on(controller.submit(train, test, "User Defined Descriptors"));
        *transport.reply.borrow_mut() = Ok(RemoteResponse { status: 200, body: b"ok".to_vec() });
        let (train, test) = both_files();
        let outcome = block_on(controller.submit(train, test, "User Defined Descriptors"));

        assert!(matches!(outcome, Some(SubmissionOutcome::Success(_))));
        assert_eq!(transport.sent.borrow().len(), 2);
        assert_eq!(trigger.calls.borrow().len(), 4);
    }
}
