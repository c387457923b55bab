//! Result artifact lifecycle.
//!
//! The workbook returned by the backend is held behind an
//! [`ArtifactHandle`], a revocable reference (an object URL in the
//! browser). The handle is consumed by [`ArtifactHandle::release`], so it
//! cannot be released twice; dropping an unreleased handle releases it.

use std::collections::VecDeque;
use std::fmt;

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::config::{ARTIFACT_MIME, OUTPUT_FILENAME};
use crate::{AppError, AppResult};

/// Revocable reference to the returned workbook.
pub struct ArtifactHandle {
    url: String,
    size: usize,
    revoke: Option<Box<dyn FnOnce(&str)>>,
}

impl ArtifactHandle {
    pub fn new(url: impl Into<String>, size: usize, revoke: impl FnOnce(&str) + 'static) -> Self {
        Self {
            url: url.into(),
            size,
            revoke: Some(Box::new(revoke)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Size of the artifact in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn release(mut self) {
        self.revoke_now();
    }

    fn revoke_now(&mut self) {
        if let Some(revoke) = self.revoke.take() {
            log::debug!("Releasing artifact {}", self.url);
            revoke(&self.url);
        }
    }
}

impl Drop for ArtifactHandle {
    fn drop(&mut self) {
        if self.revoke.is_some() {
            log::warn!("Artifact {} dropped without a decision", self.url);
            self.revoke_now();
        }
    }
}

impl fmt::Debug for ArtifactHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactHandle")
            .field("url", &self.url)
            .field("size", &self.size)
            .field("released", &self.revoke.is_none())
            .finish()
    }
}

/// Wraps returned bytes into a revocable handle.
pub trait ArtifactFactory {
    fn wrap(&self, bytes: Vec<u8>) -> AppResult<ArtifactHandle>;
}

/// Persists an artifact on the user's machine.
pub trait ArtifactSaver {
    fn save(&self, handle: &ArtifactHandle, filename: &str) -> AppResult<()>;
}

/// The user's decision about a successful result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultChoice {
    /// Close without saving ("OK").
    Discard,
    /// Save under [`OUTPUT_FILENAME`].
    Export,
}

/// Resolves the single discard/export decision for a result.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResultPresenter<S> {
    saver: S,
}

impl<S: ArtifactSaver> ResultPresenter<S> {
    pub fn new(saver: S) -> Self {
        Self { saver }
    }

    /// Apply `choice` and release the handle, whatever the save outcome.
    pub fn resolve(&self, handle: ArtifactHandle, choice: ResultChoice) -> AppResult<()> {
        let saved = match choice {
            ResultChoice::Discard => {
                log::info!("Result discarded");
                Ok(())
            }
            ResultChoice::Export => {
                log::info!("Exporting result as {}", OUTPUT_FILENAME);
                self.saver.save(&handle, OUTPUT_FILENAME)
            }
        };
        handle.release();
        saved
    }
}

/// Successful results still awaiting a decision, oldest first.
///
/// Each handle leaves the queue only through [`PendingResults::take_front`],
/// so a newer result never releases an older one.
#[derive(Debug, Default)]
pub struct PendingResults {
    queue: VecDeque<ArtifactHandle>,
}

impl PendingResults {
    pub fn push(&mut self, handle: ArtifactHandle) {
        log::debug!("Result {} queued ({} waiting)", handle.url(), self.queue.len() + 1);
        self.queue.push_back(handle);
    }

    /// The result the user decides on next.
    pub fn take_front(&mut self) -> Option<ArtifactHandle> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Object-URL backed artifacts and anchor downloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlobUrls;

impl ArtifactFactory for BlobUrls {
    fn wrap(&self, bytes: Vec<u8>) -> AppResult<ArtifactHandle> {
        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let options = BlobPropertyBag::new();
        options.set_type(ARTIFACT_MIME);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| AppError::Browser(format!("Failed to create blob: {:?}", e)))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| AppError::Browser(format!("Failed to create object URL: {:?}", e)))?;

        Ok(ArtifactHandle::new(url, bytes.len(), |url| {
            if let Err(e) = Url::revoke_object_url(url) {
                log::warn!("Failed to revoke {}: {:?}", url, e);
            }
        }))
    }
}

impl ArtifactSaver for BlobUrls {
    fn save(&self, handle: &ArtifactHandle, filename: &str) -> AppResult<()> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| AppError::Browser("Document unavailable".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| AppError::Browser("Missing body".to_string()))?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|e| AppError::Browser(format!("Failed to create anchor: {:?}", e)))?
            .dyn_into()
            .map_err(|_| AppError::Browser("Anchor cast failed".to_string()))?;
        anchor.set_href(handle.url());
        anchor.set_download(filename);

        body.append_child(&anchor)
            .map_err(|e| AppError::Browser(format!("Failed to attach anchor: {:?}", e)))?;
        anchor.click();
        anchor.remove();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{RecordingSaver, ReleaseCounter};

    #[test]
    fn test_discard_releases_without_saving() {
        let counter = ReleaseCounter::default();
        let saver = RecordingSaver::default();
        let presenter = ResultPresenter::new(saver.clone());

        presenter
            .resolve(counter.handle("blob:1", 10), ResultChoice::Discard)
            .unwrap();

        assert_eq!(counter.count(), 1);
        assert!(saver.saved.borrow().is_empty());
    }

    #[test]
    fn test_export_saves_with_fixed_name_then_releases() {
        let counter = ReleaseCounter::default();
        let saver = RecordingSaver::default();
        let presenter = ResultPresenter::new(saver.clone());

        presenter
            .resolve(counter.handle("blob:2", 10), ResultChoice::Export)
            .unwrap();

        assert_eq!(counter.count(), 1);
        assert_eq!(
            saver.saved.borrow().as_slice(),
            &[("blob:2".to_string(), OUTPUT_FILENAME.to_string())]
        );
    }

    #[test]
    fn test_failed_export_still_releases_once() {
        let counter = ReleaseCounter::default();
        let presenter = ResultPresenter::new(RecordingSaver { fail: true, ..Default::default() });

        let err = presenter
            .resolve(counter.handle("blob:3", 10), ResultChoice::Export)
            .unwrap_err();

        assert_eq!(err, AppError::Browser("download blocked".into()));
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_handle_is_not_released_until_asked() {
        let counter = ReleaseCounter::default();
        let handle = counter.handle("blob:4", 3);
        assert_eq!(counter.count(), 0);
        assert_eq!(handle.size(), 3);

        handle.release();
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_later_result_waits_behind_undecided_one() {
        let counter = ReleaseCounter::default();
        let saver = RecordingSaver::default();
        let presenter = ResultPresenter::new(saver.clone());
        let mut pending = PendingResults::default();

        pending.push(counter.handle("blob:first", 1));
        pending.push(counter.handle("blob:second", 2));
        assert_eq!(pending.len(), 2);
        assert_eq!(counter.count(), 0);

        let first = pending.take_front().unwrap();
        assert_eq!(first.url(), "blob:first");
        presenter.resolve(first, ResultChoice::Export).unwrap();
        assert_eq!(counter.count(), 1);

        let second = pending.take_front().unwrap();
        assert_eq!(second.url(), "blob:second");
        presenter.resolve(second, ResultChoice::Discard).unwrap();
        assert_eq!(counter.count(), 2);

        assert!(pending.is_empty());
        assert!(pending.take_front().is_none());
        assert_eq!(
            saver.saved.borrow().as_slice(),
            &[("blob:first".to_string(), OUTPUT_FILENAME.to_string())]
        );
    }

    #[test]
    fn test_dropped_handle_is_released_once() {
        let counter = ReleaseCounter::default();
        drop(counter.handle("blob:5", 1));
        assert_eq!(counter.count(), 1);
    }
}
