//! Upload slot state machine.
//!
//! One [`UploadSlot`] backs one upload widget. It turns the two input
//! channels (file picker, drag & drop) into a single "file chosen" event,
//! validates the extension and tracks the preview of the current file.
//!
//! Decoding is asynchronous and may overlap with a newer selection. Every
//! accepted selection gets a fresh [`SelectionTicket`]; only the result
//! carrying the latest ticket is applied (last write wins).

use crate::config::ACCEPTED_EXTENSION;
use crate::services::preview::{render_preview, RenderedPreview};
use crate::{AppResult, DragState, PreviewGrid, SlotId, ValidationError};

/// Anything that looks like a browser file: a name and some bytes.
pub trait FileLike: Clone {
    fn file_name(&self) -> String;
}

impl FileLike for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }
}

/// Returns true when the last `.`-separated segment is `xlsx`, ignoring case.
pub fn has_accepted_extension(file_name: &str) -> bool {
    file_name
        .rsplit('.')
        .next()
        .map(|ext| ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
        .unwrap_or(false)
}

/// Proof that a selection was accepted, used to match decode results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionTicket(u64);

/// What the preview surface currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PreviewState {
    #[default]
    Blank,
    Loading,
    Ready(RenderedPreview),
    Failed(String),
}

/// State of one upload widget.
#[derive(Clone, Debug)]
pub struct UploadSlot<F> {
    id: SlotId,
    selected: Option<F>,
    drag: DragState,
    preview: PreviewState,
    generation: u64,
}

impl<F: FileLike> UploadSlot<F> {
    pub fn new(id: SlotId) -> Self {
        Self {
            id,
            selected: None,
            drag: DragState::Idle,
            preview: PreviewState::Blank,
            generation: 0,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn selected_file(&self) -> Option<&F> {
        self.selected.as_ref()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Text for the filename surface, empty when nothing is selected.
    pub fn file_label(&self) -> String {
        self.selected
            .as_ref()
            .map(|file| format!("📄 Selected file: {}", file.file_name()))
            .unwrap_or_default()
    }

    /// Handle a file coming from the picker or a drop.
    ///
    /// On a wrong extension the slot is reset to its blank baseline and the
    /// error is returned for the caller to report. On success the preview
    /// switches to loading and the returned ticket must accompany the
    /// decode result.
    pub fn choose(&mut self, file: F) -> Result<SelectionTicket, ValidationError> {
        let file_name = file.file_name();
        // Any pending decode is stale from here on, accepted or not.
        self.generation += 1;

        if !has_accepted_extension(&file_name) {
            log::warn!("[{}] rejected '{}': not an .{} file", self.id, file_name, ACCEPTED_EXTENSION);
            self.selected = None;
            self.preview = PreviewState::Blank;
            return Err(ValidationError::InvalidExtension { file_name });
        }

        log::info!("[{}] selected '{}'", self.id, file_name);
        self.selected = Some(file);
        self.preview = PreviewState::Loading;
        Ok(SelectionTicket(self.generation))
    }

    pub fn drag_over(&mut self) {
        self.drag = DragState::Hovering;
    }

    pub fn drag_leave(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Handle a drop: the first file is chosen, the rest are ignored.
    ///
    /// Returns `None` when the drop carried no file.
    pub fn drop_files(
        &mut self,
        files: impl IntoIterator<Item = F>,
    ) -> Option<Result<SelectionTicket, ValidationError>> {
        self.drag = DragState::Idle;
        let first = files.into_iter().next()?;
        Some(self.choose(first))
    }

    /// Apply the result of decoding the file selected with `ticket`.
    ///
    /// Results for superseded selections are dropped silently. A decode
    /// failure leaves the file selected and is returned for reporting.
    pub fn finish_preview(
        &mut self,
        ticket: SelectionTicket,
        decoded: AppResult<PreviewGrid>,
    ) -> AppResult<()> {
        if ticket.0 != self.generation {
            log::debug!("[{}] dropping stale preview (ticket {})", self.id, ticket.0);
            return Ok(());
        }

        match decoded {
            Ok(grid) => {
                log::debug!("[{}] preview ready ({} rows)", self.id, grid.len());
                self.preview = PreviewState::Ready(render_preview(&grid));
                Ok(())
            }
            Err(err) => {
                log::error!("[{}] preview failed: {}", self.id, err);
                self.preview = PreviewState::Failed(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeFile;
    use crate::{AppError, Cell};

    fn grid(rows: usize) -> PreviewGrid {
        PreviewGrid::new(
            (0..rows)
                .map(|i| vec![Cell::Text(format!("r{}", i))])
                .collect(),
        )
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(has_accepted_extension("data.xlsx"));
        assert!(has_accepted_extension("DATA.XLSX"));
        assert!(has_accepted_extension("train.set.Xlsx"));
        assert!(!has_accepted_extension("data.csv"));
        assert!(!has_accepted_extension("data"));
        assert!(!has_accepted_extension("data."));
        assert!(!has_accepted_extension("data.xlsx.bak"));
    }

    #[test]
    fn test_valid_choice_sets_file_and_loading() {
        let mut slot = UploadSlot::new(SlotId::Train);
        assert!(slot.selected_file().is_none());
        assert_eq!(slot.file_label(), "");

        slot.choose(FakeFile::named("train.xlsx")).unwrap();

        assert_eq!(slot.selected_file().unwrap().name, "train.xlsx");
        assert_eq!(slot.file_label(), "📄 Selected file: train.xlsx");
        assert_eq!(slot.preview(), &PreviewState::Loading);
    }

    #[test]
    fn test_invalid_choice_resets_previous_selection() {
        let mut slot = UploadSlot::new(SlotId::Test);
        let ticket = slot.choose(FakeFile::named("test.xlsx")).unwrap();
        slot.finish_preview(ticket, Ok(grid(3))).unwrap();

        let err = slot.choose(FakeFile::named("test.csv")).unwrap_err();

        assert_eq!(err, ValidationError::InvalidExtension { file_name: "test.csv".into() });
        assert!(slot.selected_file().is_none());
        assert_eq!(slot.file_label(), "");
        assert_eq!(slot.preview(), &PreviewState::Blank);
    }

    #[test]
    fn test_drag_states() {
        let mut slot: UploadSlot<FakeFile> = UploadSlot::new(SlotId::Train);
        assert_eq!(slot.drag_state(), DragState::Idle);
        slot.drag_over();
        assert_eq!(slot.drag_state(), DragState::Hovering);
        slot.drag_leave();
        assert_eq!(slot.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drop_uses_first_file_only() {
        let mut slot = UploadSlot::new(SlotId::Train);
        slot.drag_over();

        let result = slot.drop_files(vec![
            FakeFile::named("first.xlsx"),
            FakeFile::named("second.xlsx"),
        ]);

        assert!(matches!(result, Some(Ok(_))));
        assert_eq!(slot.drag_state(), DragState::Idle);
        assert_eq!(slot.selected_file().unwrap().name, "first.xlsx");
    }

    #[test]
    fn test_empty_drop_only_clears_hover() {
        let mut slot: UploadSlot<FakeFile> = UploadSlot::new(SlotId::Train);
        slot.drag_over();
        assert!(slot.drop_files(Vec::new()).is_none());
        assert_eq!(slot.drag_state(), DragState::Idle);
        assert_eq!(slot.preview(), &PreviewState::Blank);
    }

    #[test]
    fn test_repicking_file_after_drop_reselects_it() {
        let mut slot = UploadSlot::new(SlotId::Train);
        slot.choose(FakeFile::named("a.xlsx")).unwrap();
        slot.drop_files(vec![FakeFile::named("b.xlsx")]);
        assert_eq!(slot.selected_file().unwrap().name, "b.xlsx");

        let ticket = slot.choose(FakeFile::named("a.xlsx")).unwrap();
        slot.finish_preview(ticket, Ok(grid(2))).unwrap();

        assert_eq!(slot.selected_file().unwrap().name, "a.xlsx");
        assert_eq!(slot.file_label(), "📄 Selected file: a.xlsx");
    }

    #[test]
    fn test_drop_of_invalid_file_is_rejected() {
        let mut slot = UploadSlot::new(SlotId::Test);
        let result = slot.drop_files(vec![FakeFile::named("notes.txt")]);
        assert!(matches!(result, Some(Err(ValidationError::InvalidExtension { .. }))));
        assert!(slot.selected_file().is_none());
    }

    #[test]
    fn test_stale_decode_is_ignored() {
        let mut slot = UploadSlot::new(SlotId::Train);
        let first = slot.choose(FakeFile::named("a.xlsx")).unwrap();
        let second = slot.choose(FakeFile::named("b.xlsx")).unwrap();

        slot.finish_preview(first, Ok(grid(5))).unwrap();
        assert_eq!(slot.preview(), &PreviewState::Loading);

        slot.finish_preview(second, Ok(grid(2))).unwrap();
        match slot.preview() {
            PreviewState::Ready(RenderedPreview::Table(table)) => {
                assert_eq!(table.header, vec!["r0"]);
                assert_eq!(table.body.len(), 1);
            }
            other => panic!("unexpected preview: {:?}", other),
        }
    }

    #[test]
    fn test_decode_after_rejection_is_ignored() {
        let mut slot = UploadSlot::new(SlotId::Train);
        let ticket = slot.choose(FakeFile::named("a.xlsx")).unwrap();
        slot.choose(FakeFile::named("a.csv")).unwrap_err();

        slot.finish_preview(ticket, Ok(grid(4))).unwrap();
        assert_eq!(slot.preview(), &PreviewState::Blank);
    }

    #[test]
    fn test_decode_failure_keeps_file_and_reports() {
        let mut slot = UploadSlot::new(SlotId::Test);
        let ticket = slot.choose(FakeFile::named("broken.xlsx")).unwrap();

        let err = slot
            .finish_preview(ticket, Err(AppError::Decode("not a zip".into())))
            .unwrap_err();

        assert_eq!(err, AppError::Decode("not a zip".into()));
        assert!(slot.selected_file().is_some());
        assert_eq!(
            slot.preview(),
            &PreviewState::Failed("Could not read spreadsheet: not a zip".into())
        );
    }
}
