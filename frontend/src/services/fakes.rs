//! Test doubles for the browser-facing capabilities.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::services::{
    ArtifactFactory, ArtifactHandle, ArtifactSaver, CalculationTransport, FileLike, Notifier,
    SubmitTrigger,
};
use crate::{AppError, AppResult, RemoteResponse, SubmissionRequest};

#[derive(Clone, Debug, PartialEq)]
pub struct FakeFile {
    pub name: String,
}

impl FakeFile {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl FileLike for FakeFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }
}

/// Counts releases of the handles it creates.
#[derive(Clone, Default)]
pub struct ReleaseCounter(Rc<Cell<usize>>);

impl ReleaseCounter {
    pub fn handle(&self, url: &str, size: usize) -> ArtifactHandle {
        let count = Rc::clone(&self.0);
        ArtifactHandle::new(url, size, move |_| count.set(count.get() + 1))
    }

    pub fn count(&self) -> usize {
        self.0.get()
    }
}

#[derive(Clone, Default)]
pub struct RecordingSaver {
    pub saved: Rc<RefCell<Vec<(String, String)>>>,
    pub fail: bool,
}

impl ArtifactSaver for RecordingSaver {
    fn save(&self, handle: &ArtifactHandle, filename: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Browser("download blocked".into()));
        }
        self.saved
            .borrow_mut()
            .push((handle.url().to_string(), filename.to_string()));
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakeTransport {
    pub reply: Rc<RefCell<AppResult<RemoteResponse>>>,
    pub sent: Rc<RefCell<Vec<SubmissionRequest<FakeFile>>>>,
}

impl FakeTransport {
    pub fn replying(reply: AppResult<RemoteResponse>) -> Self {
        Self {
            reply: Rc::new(RefCell::new(reply)),
            sent: Rc::default(),
        }
    }

    pub fn ok(body: &[u8]) -> Self {
        Self::replying(Ok(RemoteResponse { status: 200, body: body.to_vec() }))
    }
}

impl CalculationTransport for FakeTransport {
    type File = FakeFile;

    async fn send(&self, request: SubmissionRequest<FakeFile>) -> AppResult<RemoteResponse> {
        self.sent.borrow_mut().push(request);
        self.reply.borrow().clone()
    }
}

#[derive(Clone, Default)]
pub struct FakeNotifier {
    pub messages: Rc<RefCell<Vec<String>>>,
}

impl Notifier for FakeNotifier {
    fn alert(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[derive(Clone, Default)]
pub struct FakeTrigger {
    pub calls: Rc<RefCell<Vec<(bool, String)>>>,
}

impl SubmitTrigger for FakeTrigger {
    fn set_enabled(&self, enabled: bool, label: &str) {
        self.calls.borrow_mut().push((enabled, label.to_string()));
    }
}

#[derive(Clone, Default)]
pub struct FakeArtifacts {
    pub counter: ReleaseCounter,
}

impl ArtifactFactory for FakeArtifacts {
    fn wrap(&self, bytes: Vec<u8>) -> AppResult<ArtifactHandle> {
        Ok(self.counter.handle("blob:result", bytes.len()))
    }
}
