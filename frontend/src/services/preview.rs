//! Preview rendering: decoded grid to a bounded, markup-agnostic table.

use crate::config::PREVIEW_BODY_ROWS;
use crate::{Cell, PreviewGrid};

/// Header and body cells, already converted to display strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewTable {
    pub header: Vec<String>,
    pub body: Vec<Vec<String>>,
}

/// What a preview surface shows for a decoded workbook.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderedPreview {
    /// The sheet has no rows at all.
    Empty,
    Table(PreviewTable),
}

impl RenderedPreview {
    pub const EMPTY_NOTICE: &'static str = "No data found in the file.";
}

/// Render the header row and at most [`PREVIEW_BODY_ROWS`] rows after it.
///
/// Rows past the limit are dropped without any indication. Each row keeps
/// its own width; missing cells render as empty strings.
pub fn render_preview(grid: &PreviewGrid) -> RenderedPreview {
    let Some((header, rest)) = grid.rows().split_first() else {
        return RenderedPreview::Empty;
    };

    RenderedPreview::Table(PreviewTable {
        header: row_strings(header),
        body: rest
            .iter()
            .take(PREVIEW_BODY_ROWS)
            .map(|row| row_strings(row))
            .collect(),
    })
}

fn row_strings(row: &[Cell]) -> Vec<String> {
    row.iter().map(ToString::to_string).collect()
}
