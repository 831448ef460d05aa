//! Scroll and selection bookkeeping for the picker's row list.
//!
//! The picker list mixes section-header rows with selectable tag rows, so
//! selection tracking cannot assume every row can be highlighted. This module
//! keeps the highlighted flat row index and the first visible row of the
//! scroll window; navigation walks the caller-supplied list of selectable row
//! indices, wrapping around its ends and skipping headers by construction.
//!
//! Callers re-clamp whenever the row list is rebuilt and call
//! [`ScrollState::ensure_visible`] after navigation so `scroll_top` tracks
//! the highlighted row.

/// Scroll and selection state for the sectioned tag list.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ScrollState {
    /// Highlighted row as an index into the full (headers included) row
    /// list, or `None` when nothing is selectable.
    pub selected_idx: Option<usize>,
    /// Index of the first visible row in the list viewport.
    pub scroll_top: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            selected_idx: None,
            scroll_top: 0,
        }
    }

    /// Resets selection and scroll position back to the initial state.
    pub fn reset(&mut self) {
        self.selected_idx = None;
        self.scroll_top = 0;
    }

    /// Clamps the selection onto `selectable` (ascending flat row indices).
    ///
    /// A selection pointing at a vanished or header row snaps to the first
    /// selectable row; an empty list clears the selection entirely.
    pub fn clamp_selection(&mut self, selectable: &[usize]) {
        if selectable.is_empty() {
            self.selected_idx = None;
            self.scroll_top = 0;
            return;
        }
        let current = self
            .selected_idx
            .filter(|idx| selectable.contains(idx));
        self.selected_idx = current.or_else(|| selectable.first().copied());
    }

    /// Moves the highlight to the previous selectable row, wrapping to the
    /// last one from the top. Does not adjust `scroll_top`; call
    /// [`ScrollState::ensure_visible`] after moving.
    pub fn move_up_wrap(&mut self, selectable: &[usize]) {
        let (Some(&first), Some(&last)) = (selectable.first(), selectable.last()) else {
            self.selected_idx = None;
            self.scroll_top = 0;
            return;
        };
        let position = self
            .selected_idx
            .and_then(|idx| selectable.iter().position(|&i| i == idx));
        self.selected_idx = Some(match position {
            Some(pos) if pos > 0 => selectable[pos - 1],
            Some(_) => last,
            None => first,
        });
    }

    /// Moves the highlight to the next selectable row, wrapping to the first
    /// one from the bottom.
    pub fn move_down_wrap(&mut self, selectable: &[usize]) {
        let Some(&first) = selectable.first() else {
            self.selected_idx = None;
            self.scroll_top = 0;
            return;
        };
        let position = self
            .selected_idx
            .and_then(|idx| selectable.iter().position(|&i| i == idx));
        self.selected_idx = Some(match position {
            Some(pos) if pos + 1 < selectable.len() => selectable[pos + 1],
            _ => first,
        });
    }

    /// Adjusts `scroll_top` so the highlighted row stays within a viewport of
    /// `visible_rows` over a list of `len` flat rows.
    pub fn ensure_visible(&mut self, len: usize, visible_rows: usize) {
        if len == 0 || visible_rows == 0 {
            self.scroll_top = 0;
            return;
        }
        if let Some(sel) = self.selected_idx {
            if sel < self.scroll_top {
                self.scroll_top = sel;
            } else {
                let bottom = self.scroll_top + visible_rows - 1;
                if sel > bottom {
                    self.scroll_top = sel + 1 - visible_rows;
                }
            }
        } else {
            self.scroll_top = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollState;
    use pretty_assertions::assert_eq;

    #[test]
    fn wrap_navigation_skips_header_rows() {
        // Rows 0 and 3 are headers; 1, 2, 4 are tags.
        let selectable = [1usize, 2, 4];
        let mut s = ScrollState::new();

        s.clamp_selection(&selectable);
        assert_eq!(s.selected_idx, Some(1));

        s.move_down_wrap(&selectable);
        assert_eq!(s.selected_idx, Some(2));
        s.move_down_wrap(&selectable);
        assert_eq!(s.selected_idx, Some(4));
        s.move_down_wrap(&selectable);
        assert_eq!(s.selected_idx, Some(1));

        s.move_up_wrap(&selectable);
        assert_eq!(s.selected_idx, Some(4));
    }

    #[test]
    fn clamp_snaps_stale_selection_to_first_selectable() {
        let mut s = ScrollState::new();
        s.selected_idx = Some(7);
        s.clamp_selection(&[2, 5]);
        assert_eq!(s.selected_idx, Some(2));

        s.clamp_selection(&[]);
        assert_eq!(s.selected_idx, None);
        assert_eq!(s.scroll_top, 0);
    }

    #[test]
    fn ensure_visible_tracks_the_highlight() {
        let selectable: Vec<usize> = (0..10).collect();
        let mut s = ScrollState::new();
        let len = 10;
        let vis = 5;

        s.clamp_selection(&selectable);
        s.ensure_visible(len, vis);
        assert_eq!(s.scroll_top, 0);

        s.move_up_wrap(&selectable);
        s.ensure_visible(len, vis);
        assert_eq!(s.selected_idx, Some(len - 1));
        match s.selected_idx {
            Some(sel) => assert!(s.scroll_top <= sel && sel < s.scroll_top + vis),
            None => panic!("expected Some(selected_idx) after wrap"),
        }

        s.move_down_wrap(&selectable);
        s.ensure_visible(len, vis);
        assert_eq!(s.selected_idx, Some(0));
        assert_eq!(s.scroll_top, 0);
    }
}
