//! Interactive widget around [`TagPicker`].
//!
//! The view owns the picker plus the purely visual state: the flat row list
//! built from the picker's sections, the scroll/highlight position, and the
//! optional host-supplied error line. Key events mutate the picker and then
//! rebuild the rows; opening may hand back a [`PendingLoad`] that the caller
//! is expected to drive to completion.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use ladle_tags::PendingLoad;
use ladle_tags::PickerPhase;
use ladle_tags::Tag;
use ladle_tags::TagPicker;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Widget;

use crate::key_hint;
use crate::scroll_state::ScrollState;
use crate::selection_rows::MAX_POPUP_ROWS;
use crate::selection_rows::TagRow;
use crate::selection_rows::render_rows;
use crate::selection_rows::selectable_indices;
use crate::text_formatting::truncate_text;

const ITEM_NAME_TRUNCATE_LEN: usize = 21;
const SEARCH_PLACEHOLDER: &str = "Type to search";
const SEARCH_PROMPT_PREFIX: &str = "> ";
const RECENT_SECTION_LABEL: &str = "Recently used";
const POPULAR_SECTION_LABEL: &str = "Popular";

pub(crate) struct TagPickerView {
    picker: TagPicker,
    state: ScrollState,
    rows: Vec<TagRow>,
    /// Flat indices of the selectable rows, ascending.
    selectable: Vec<usize>,
    /// The tag behind each selectable row, in the same order.
    listed_tags: Vec<Tag>,
    error_text: Option<String>,
}

impl TagPickerView {
    pub(crate) fn new(picker: TagPicker, error_text: Option<String>) -> Self {
        let mut view = Self {
            picker,
            state: ScrollState::new(),
            rows: Vec::new(),
            selectable: Vec::new(),
            listed_tags: Vec::new(),
            error_text,
        };
        view.refresh();
        view
    }

    pub(crate) fn is_open(&self) -> bool {
        self.picker.is_open()
    }

    pub(crate) fn selection(&self) -> &[Tag] {
        self.picker.selection()
    }

    /// Owner pushes its selection back in after a selection-changed event.
    pub(crate) fn set_selection(&mut self, selection: Vec<Tag>) {
        self.picker.set_selection(selection);
        self.refresh();
    }

    pub(crate) fn handle_catalog_loaded(
        &mut self,
        generation: u64,
        result: anyhow::Result<Vec<Tag>>,
    ) {
        self.picker.finish_load(generation, result);
        self.refresh();
    }

    /// Routes one key press. Returns a pending catalog fetch when the press
    /// opened the picker over an empty cache.
    pub(crate) fn handle_key_event(&mut self, key_event: KeyEvent) -> Option<PendingLoad> {
        if self.picker.is_disabled() {
            return None;
        }
        if !self.picker.is_open() {
            return match key_event.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.open(),
                _ => None,
            };
        }

        match key_event {
            KeyEvent {
                code: KeyCode::Up, ..
            } => self.move_up(),
            KeyEvent {
                code: KeyCode::Down,
                ..
            } => self.move_down(),
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => {
                let mut query = self.picker.query().to_string();
                if query.is_empty() {
                    self.picker.remove_last();
                } else {
                    query.pop();
                    self.picker.set_query(query);
                }
                self.refresh();
            }
            KeyEvent {
                code: KeyCode::Char(' '),
                modifiers: KeyModifiers::NONE,
                ..
            } => {
                self.pick_highlighted();
                self.refresh();
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => {
                if !self.picker.commit_query_match() {
                    self.pick_highlighted();
                }
                self.refresh();
            }
            KeyEvent {
                code: KeyCode::Char('d'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => {
                self.picker.clear_selection();
                self.refresh();
            }
            KeyEvent {
                code: KeyCode::Esc, ..
            } => {
                self.picker.close();
                self.refresh();
            }
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                ..
            } if !key_hint::has_ctrl_or_alt(modifiers) => {
                if self.picker.show_search() {
                    let mut query = self.picker.query().to_string();
                    query.push(c);
                    self.picker.set_query(query);
                    self.refresh();
                }
            }
            _ => {}
        }
        None
    }

    fn open(&mut self) -> Option<PendingLoad> {
        let pending = self.picker.open();
        self.state.reset();
        self.refresh();
        pending
    }

    fn pick_highlighted(&mut self) {
        let Some(tag) = self.highlighted_tag().cloned() else {
            return;
        };
        self.picker.pick(&tag);
    }

    fn highlighted_tag(&self) -> Option<&Tag> {
        let flat_idx = self.state.selected_idx?;
        let pos = self.selectable.iter().position(|idx| *idx == flat_idx)?;
        self.listed_tags.get(pos)
    }

    fn move_up(&mut self) {
        self.state.move_up_wrap(&self.selectable);
        self.ensure_visible();
    }

    fn move_down(&mut self) {
        self.state.move_down_wrap(&self.selectable);
        self.ensure_visible();
    }

    fn ensure_visible(&mut self) {
        let len = self.rows.len();
        self.state.ensure_visible(len, MAX_POPUP_ROWS.min(len.max(1)));
    }

    /// Rebuilds the flat row list from the picker's sections, keeping the
    /// highlight on the same tag when it survives the rebuild. Call after
    /// every picker mutation.
    fn refresh(&mut self) {
        let previously_highlighted = self.highlighted_tag().map(|tag| tag.id);
        let (rows, listed_tags) = self.build_rows();
        self.rows = rows;
        self.listed_tags = listed_tags;
        self.selectable = selectable_indices(&self.rows);
        self.state.selected_idx = previously_highlighted
            .and_then(|id| self.listed_tags.iter().position(|tag| tag.id == id))
            .and_then(|pos| self.selectable.get(pos).copied());
        self.state.clamp_selection(&self.selectable);
        self.ensure_visible();
    }

    fn build_rows(&self) -> (Vec<TagRow>, Vec<Tag>) {
        let mut rows: Vec<TagRow> = Vec::new();
        let mut listed_tags: Vec<Tag> = Vec::new();
        if self.picker.phase() == PickerPhase::Loading {
            return (rows, listed_tags);
        }

        let sections = self.picker.sections();
        if !sections.recent.is_empty() {
            rows.push(TagRow::header(RECENT_SECTION_LABEL));
            for tag in &sections.recent {
                rows.push(tag_row(tag));
                listed_tags.push(tag.clone());
            }
        }
        if !sections.popular.is_empty() {
            rows.push(TagRow::header(POPULAR_SECTION_LABEL));
            for tag in &sections.popular {
                rows.push(tag_row(tag));
                listed_tags.push(tag.clone());
            }
        }
        for (category, tags) in &sections.categories {
            if tags.is_empty() {
                continue;
            }
            rows.push(TagRow::header(category.clone()));
            for tag in tags {
                rows.push(tag_row(tag));
                listed_tags.push(tag.clone());
            }
        }
        (rows, listed_tags)
    }

    fn list_height(&self) -> u16 {
        self.rows.len().clamp(1, MAX_POPUP_ROWS).try_into().unwrap_or(1)
    }

    fn empty_message(&self) -> &'static str {
        if self.picker.phase() == PickerPhase::Loading {
            "loading tags…"
        } else {
            "no matching tags"
        }
    }

    fn selection_line(&self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = vec!["Tags: ".bold()];
        if self.picker.selection().is_empty() {
            spans.push("none".dim().italic());
        } else {
            for tag in self.picker.selection() {
                spans.push(format!("[{}] ", tag.name).cyan());
            }
        }
        let line = Line::from(spans);
        if self.picker.is_disabled() {
            line.dim()
        } else {
            line
        }
    }

    fn footer_hint(&self) -> Line<'static> {
        if self.picker.is_disabled() {
            return Line::from("tag editing is disabled".dim().italic());
        }
        let spans: Vec<Span<'static>> = if self.picker.is_open() {
            vec![
                key_hint::plain(KeyCode::Char(' ')).into(),
                " pick  ".into(),
                key_hint::plain(KeyCode::Enter).into(),
                " commit  ".into(),
                key_hint::ctrl(KeyCode::Char('d')).into(),
                " clear  ".into(),
                key_hint::plain(KeyCode::Esc).into(),
                " close".into(),
            ]
        } else {
            vec![
                key_hint::plain(KeyCode::Enter).into(),
                " edit tags  ".into(),
                key_hint::plain(KeyCode::Char('q')).into(),
                " quit".into(),
            ]
        };
        Line::from(spans)
    }

    pub(crate) fn desired_height(&self) -> u16 {
        let mut height: u16 = 1;
        if self.picker.is_open() {
            if self.picker.show_search() {
                height = height.saturating_add(2);
            }
            height = height.saturating_add(self.list_height());
        }
        if self.error_text.is_some() {
            height = height.saturating_add(1);
        }
        height.saturating_add(1)
    }
}

fn tag_row(tag: &Tag) -> TagRow {
    let annotation = if tag.recipe_counter == 1 {
        "1 recipe".to_string()
    } else {
        format!("{} recipes", tag.recipe_counter)
    };
    TagRow::tag(
        truncate_text(&tag.name, ITEM_NAME_TRUNCATE_LEN),
        Some(annotation),
    )
}

impl Widget for &TagPickerView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let open = self.picker.is_open();
        let composer_height = if open && self.picker.show_search() {
            2
        } else {
            0
        };
        let list_height = if open { self.list_height() } else { 0 };
        let error_height = if self.error_text.is_some() { 1 } else { 0 };
        let [selection_area, composer_area, list_area, error_area, footer_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(composer_height),
                Constraint::Length(list_height),
                Constraint::Length(error_height),
                Constraint::Length(1),
            ])
            .areas(area);

        self.selection_line().render(selection_area, buf);

        // Render the search prompt as two lines to mimic the composer.
        if composer_area.height >= 2 {
            let [placeholder_area, input_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
                    .areas(composer_area);
            Line::from(SEARCH_PLACEHOLDER.dim()).render(placeholder_area, buf);
            let query = self.picker.query();
            let line = if query.is_empty() {
                Line::from(vec![SEARCH_PROMPT_PREFIX.dim()])
            } else {
                Line::from(vec![SEARCH_PROMPT_PREFIX.dim(), query.to_string().into()])
            };
            line.render(input_area, buf);
        }

        if list_area.height > 0 {
            render_rows(
                list_area,
                buf,
                &self.rows,
                &self.state,
                MAX_POPUP_ROWS,
                self.empty_message(),
            );
        }

        if error_area.height > 0
            && let Some(error_text) = &self.error_text
        {
            Line::from(error_text.clone().red()).render(error_area, buf);
        }

        if footer_area.height > 0 {
            self.footer_hint().dim().render(footer_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladle_tags::TagPickerBuilder;
    use pretty_assertions::assert_eq;

    fn tag(id: i64, name: &str, category: &str, recipe_counter: i64) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            category: category.to_string(),
            recipe_counter,
            uuid: uuid::Uuid::nil(),
            created_at: chrono::DateTime::UNIX_EPOCH,
            updated_at: chrono::DateTime::UNIX_EPOCH,
        }
    }

    fn sample_catalog() -> Vec<Tag> {
        vec![
            tag(1, "breakfast", "Meal Types", 15),
            tag(2, "quick", "Cooking Methods", 30),
            tag(3, "vegan", "Diets", 25),
        ]
    }

    fn ready_view() -> TagPickerView {
        let picker = TagPickerBuilder::new().catalog(sample_catalog()).build();
        let mut view = TagPickerView::new(picker, None);
        view.handle_key_event(key(KeyCode::Enter));
        view
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render_to_strings(view: &TagPickerView, width: u16) -> Vec<String> {
        let height = view.desired_height();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().chars().next().unwrap_or(' '))
                    .collect()
            })
            .collect()
    }

    fn rendered(view: &TagPickerView) -> String {
        render_to_strings(view, 48).join("\n")
    }

    #[test]
    fn closed_view_shows_the_selection_and_an_open_hint() {
        let picker = TagPickerBuilder::new()
            .catalog(sample_catalog())
            .selection(vec![tag(2, "quick", "Cooking Methods", 30)])
            .build();
        let view = TagPickerView::new(picker, None);

        let screen = rendered(&view);
        assert!(screen.contains("Tags: "));
        assert!(screen.contains("[quick]"));
        assert!(screen.contains("edit tags"));
        assert!(!screen.contains(SEARCH_PLACEHOLDER));
    }

    #[test]
    fn open_view_lists_sections_with_popular_shortcut() {
        let mut view = ready_view();
        assert!(view.is_open());

        let screen = rendered(&view);
        assert!(screen.contains(SEARCH_PLACEHOLDER));
        assert!(screen.contains(POPULAR_SECTION_LABEL));
        assert!(screen.contains("quick"));
        assert!(screen.contains("30 recipes"));
        // Three categories plus the popular shortcut flatten to ten rows, so
        // the lowest-ranked category sits below the eight-row window.
        assert!(!screen.contains("Meal Types"));

        for _ in 0..5 {
            view.handle_key_event(key(KeyCode::Down));
        }
        let screen = rendered(&view);
        assert!(screen.contains("Meal Types"));
        assert!(screen.contains("› breakfast"));
        assert!(!screen.contains(POPULAR_SECTION_LABEL));
    }

    #[test]
    fn typing_filters_the_list_and_collapses_shortcuts() {
        let mut view = ready_view();
        for c in ['b', 'r', 'e', 'a'] {
            view.handle_key_event(key(KeyCode::Char(c)));
        }

        let screen = rendered(&view);
        assert!(screen.contains("> brea"));
        assert!(screen.contains("breakfast"));
        assert!(!screen.contains(POPULAR_SECTION_LABEL));
        assert!(!screen.contains("quick"));
    }

    #[test]
    fn space_picks_the_highlight_and_stays_open() {
        let mut view = ready_view();
        view.handle_key_event(key(KeyCode::Char(' ')));

        assert!(view.is_open());
        assert_eq!(
            view.selection().iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["quick"]
        );
    }

    #[test]
    fn enter_commits_an_exact_query_match_and_closes() {
        let mut view = ready_view();
        for c in ['v', 'e', 'g', 'a', 'n'] {
            view.handle_key_event(key(KeyCode::Char(c)));
        }
        view.handle_key_event(key(KeyCode::Enter));

        assert!(!view.is_open());
        assert_eq!(view.selection().len(), 1);
        assert_eq!(view.selection()[0].name, "vegan");
    }

    #[test]
    fn backspace_on_an_empty_query_removes_the_newest_chip() {
        let mut view = ready_view();
        view.handle_key_event(key(KeyCode::Char(' ')));
        assert_eq!(view.selection().len(), 1);

        view.handle_key_event(key(KeyCode::Backspace));
        assert!(view.selection().is_empty());
    }

    #[test]
    fn navigation_skips_header_rows() {
        let mut view = ready_view();
        let first = view.highlighted_tag().map(|t| t.name.clone());
        view.handle_key_event(key(KeyCode::Down));
        let second = view.highlighted_tag().map(|t| t.name.clone());

        assert!(first.is_some());
        assert_ne!(first, second);
        for _ in 0..32 {
            view.handle_key_event(key(KeyCode::Down));
            let highlighted = view.highlighted_tag();
            assert!(highlighted.is_some(), "highlight left the selectable rows");
        }
    }

    #[test]
    fn highlight_follows_the_same_tag_across_rebuilds() {
        let mut view = ready_view();
        view.handle_key_event(key(KeyCode::Char(' ')));
        assert_eq!(
            view.highlighted_tag().map(|t| t.name.as_str()),
            Some("vegan")
        );

        // Undoing the pick restores the tag and grows a recent section above
        // the highlight; the highlight follows the tag, not the row index.
        view.handle_key_event(key(KeyCode::Backspace));
        assert_eq!(
            view.highlighted_tag().map(|t| t.name.as_str()),
            Some("vegan")
        );
    }

    #[test]
    fn loading_suppresses_the_list_until_the_fetch_lands() {
        let picker = TagPickerBuilder::new()
            .loader(|| Box::pin(async { Ok(Vec::new()) }))
            .build();
        let mut view = TagPickerView::new(picker, None);
        let pending = view.handle_key_event(key(KeyCode::Enter));
        let generation = match &pending {
            Some(pending) => pending.generation,
            None => panic!("opening over an empty cache should start a fetch"),
        };

        assert!(rendered(&view).contains("loading tags…"));

        view.handle_catalog_loaded(generation, Ok(sample_catalog()));
        let screen = rendered(&view);
        assert!(!screen.contains("loading tags…"));
        assert!(screen.contains("quick"));
    }

    #[test]
    fn disabled_view_ignores_every_key() {
        let picker = TagPickerBuilder::new()
            .catalog(sample_catalog())
            .disabled(true)
            .build();
        let mut view = TagPickerView::new(picker, None);

        assert!(view.handle_key_event(key(KeyCode::Enter)).is_none());
        view.handle_key_event(key(KeyCode::Char(' ')));
        assert!(!view.is_open());
        assert!(view.selection().is_empty());
        assert!(rendered(&view).contains("tag editing is disabled"));
    }

    #[test]
    fn error_text_renders_verbatim_beneath_the_widget() {
        let picker = TagPickerBuilder::new().catalog(sample_catalog()).build();
        let view = TagPickerView::new(picker, Some("Pick at most 3 tags".to_string()));

        assert!(rendered(&view).contains("Pick at most 3 tags"));
    }
}
