//! Application event loop.
//!
//! All state changes flow through one unbounded [`AppEvent`] channel: terminal
//! key presses are re-posted onto it, catalog fetches complete onto it, and
//! the picker reports selection changes onto it. The loop body is the only
//! place that mutates the view, so completions and key presses are applied
//! strictly one at a time.

use color_eyre::eyre::Result;
use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use ladle_tags::PendingLoad;
use ladle_tags::Tag;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::style::Stylize;
use ratatui::text::Line;
use tokio::select;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::StreamExt;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::key_hint;
use crate::tag_picker_view::TagPickerView;
use crate::tui;

pub(crate) struct App {
    view: TagPickerView,
    app_event_tx: AppEventSender,
    /// Selection as last reported by the picker. Printed on exit.
    selection: Vec<Tag>,
}

impl App {
    pub(crate) fn new(view: TagPickerView, app_event_tx: AppEventSender) -> Self {
        let selection = view.selection().to_vec();
        Self {
            view,
            app_event_tx,
            selection,
        }
    }

    pub(crate) async fn run(
        mut self,
        tui: &mut tui::Tui,
        mut app_event_rx: UnboundedReceiver<AppEvent>,
    ) -> Result<Vec<Tag>> {
        let mut terminal_events = EventStream::new();

        loop {
            self.draw(tui)?;
            let keep_running = select! {
                Some(event) = app_event_rx.recv() => self.handle_event(event),
                Some(Ok(event)) = terminal_events.next() => {
                    self.handle_terminal_event(event);
                    true
                }
            };
            if !keep_running {
                break;
            }
        }
        Ok(self.selection)
    }

    fn draw(&mut self, tui: &mut tui::Tui) -> Result<()> {
        tui.draw(|frame| {
            let [title_area, _, view_area, _] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(self.view.desired_height()),
                Constraint::Fill(1),
            ])
            .areas(frame.area());
            frame.render_widget(Line::from("Ladle recipe tags".bold()), title_area);
            frame.render_widget(&self.view, view_area);
        })?;
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                if matches!(key_event.kind, KeyEventKind::Release) {
                    return;
                }
                self.app_event_tx.send(AppEvent::Key(key_event));
            }
            // A resize is picked up by the next draw.
            _ => {}
        }
    }

    /// Applies one event. Returns `false` when the loop should stop.
    fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Key(key_event) => self.handle_key_event(key_event),
            AppEvent::CatalogLoaded { generation, result } => {
                self.view.handle_catalog_loaded(generation, result);
            }
            AppEvent::SelectionChanged(selection) => {
                // The app owns the selection; push it back into the widget.
                self.view.set_selection(selection.clone());
                self.selection = selection;
            }
            AppEvent::ExitRequest => return false,
        }
        true
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        let ctrl_c = key_hint::ctrl(KeyCode::Char('c')).is_press(key_event);
        let quit_while_closed = !self.view.is_open()
            && matches!(key_event.code, KeyCode::Char('q') | KeyCode::Esc);
        if ctrl_c || quit_while_closed {
            self.app_event_tx.send(AppEvent::ExitRequest);
            return;
        }

        if let Some(pending) = self.view.handle_key_event(key_event) {
            self.spawn_catalog_load(pending);
        }
    }

    fn spawn_catalog_load(&self, pending: PendingLoad) {
        let app_event_tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            let PendingLoad { generation, future } = pending;
            let result = future.await;
            app_event_tx.send(AppEvent::CatalogLoaded { generation, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ladle_tags::TagPickerBuilder;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::unbounded_channel;

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            category: "Meal Types".to_string(),
            recipe_counter: 10,
            uuid: uuid::Uuid::nil(),
            created_at: chrono::DateTime::UNIX_EPOCH,
            updated_at: chrono::DateTime::UNIX_EPOCH,
        }
    }

    fn app_with_catalog() -> (App, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = unbounded_channel();
        let picker = TagPickerBuilder::new()
            .catalog(vec![tag(1, "breakfast"), tag(2, "vegan")])
            .build();
        let app = App::new(TagPickerView::new(picker, None), AppEventSender::new(tx));
        (app, rx)
    }

    #[test]
    fn selection_changed_replaces_the_owned_copy() {
        let (mut app, _rx) = app_with_catalog();
        assert!(app.handle_event(AppEvent::SelectionChanged(vec![tag(2, "vegan")])));
        assert_eq!(app.selection.len(), 1);
        assert_eq!(app.selection[0].name, "vegan");
    }

    #[test]
    fn exit_request_stops_the_loop() {
        let (mut app, _rx) = app_with_catalog();
        assert!(!app.handle_event(AppEvent::ExitRequest));
    }

    #[test]
    fn quit_keys_request_exit_only_while_the_picker_is_closed() {
        let (mut app, mut rx) = app_with_catalog();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::ExitRequest)));

        app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(app.view.is_open());
        app.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(rx.try_recv().is_err(), "q while open should type into the query");
    }

    #[tokio::test]
    async fn opening_over_an_empty_cache_spawns_the_fetch() {
        let (tx, mut rx) = unbounded_channel();
        let picker = TagPickerBuilder::new()
            .loader(|| Box::pin(async { Ok(vec![tag(1, "breakfast")]) }))
            .build();
        let mut app = App::new(TagPickerView::new(picker, None), AppEventSender::new(tx));

        app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        match rx.recv().await {
            Some(AppEvent::CatalogLoaded {
                generation,
                result: Ok(tags),
            }) => {
                assert_eq!(tags.len(), 1);
                app.view.handle_catalog_loaded(generation, Ok(tags));
            }
            other => panic!("expected a catalog completion, got {other:?}"),
        }
        assert!(app.view.is_open());
    }
}
