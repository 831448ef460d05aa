//! Display-row model and shared renderer for the picker's sectioned list.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Widget;

use crate::scroll_state::ScrollState;

/// Maximum number of rows the picker list attempts to display at once.
pub(crate) const MAX_POPUP_ROWS: usize = 8;

/// One renderable list row: a section header or a selectable tag.
pub(crate) struct TagRow {
    pub name: String,
    /// Dim trailing note, e.g. a recipe count.
    pub annotation: Option<String>,
    pub is_header: bool,
}

impl TagRow {
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            name: label.into(),
            annotation: None,
            is_header: true,
        }
    }

    pub fn tag(name: impl Into<String>, annotation: Option<String>) -> Self {
        Self {
            name: name.into(),
            annotation,
            is_header: false,
        }
    }

    fn as_line(&self, is_selected: bool) -> Line<'static> {
        if self.is_header {
            return Line::from(self.name.clone().bold());
        }
        let marker: Span<'static> = if is_selected {
            "› ".bold()
        } else {
            "  ".into()
        };
        let mut spans: Vec<Span<'static>> = vec![marker, self.name.clone().into()];
        if let Some(annotation) = &self.annotation {
            spans.push(format!("  {annotation}").dim());
        }
        Line::from(spans)
    }
}

/// Flat indices of the selectable (non-header) rows.
pub(crate) fn selectable_indices(rows: &[TagRow]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter_map(|(idx, row)| (!row.is_header).then_some(idx))
        .collect()
}

/// Renders the visible window of `rows` with the highlight marker, or the
/// empty-state message when there is nothing to list.
pub(crate) fn render_rows(
    area: Rect,
    buf: &mut Buffer,
    rows: &[TagRow],
    state: &ScrollState,
    max_rows: usize,
    empty_message: &str,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    if rows.is_empty() {
        Line::from(empty_message.italic().dim()).render(area, buf);
        return;
    }

    let capacity = (area.height as usize).min(max_rows);
    let start = state.scroll_top.min(rows.len().saturating_sub(1));
    let end = rows.len().min(start + capacity);

    for (offset, row) in rows[start..end].iter().enumerate() {
        let is_selected = state.selected_idx == Some(start + offset);
        let row_area = Rect {
            x: area.x,
            y: area.y + offset as u16,
            width: area.width,
            height: 1,
        };
        row.as_line(is_selected).render(row_area, buf);
    }
}
