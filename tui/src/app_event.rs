use crossterm::event::KeyEvent;
use ladle_tags::Tag;

#[derive(Debug)]
pub(crate) enum AppEvent {
    /// A key press forwarded from the terminal event stream.
    Key(KeyEvent),

    /// Result of a completed asynchronous catalog fetch. The `generation`
    /// echoes the token handed out when the fetch began so the cache can
    /// decide whether the payload is still relevant.
    CatalogLoaded {
        generation: u64,
        result: anyhow::Result<Vec<Tag>>,
    },

    /// The picker accepted a change to the selected tag sequence.
    SelectionChanged(Vec<Tag>),

    /// Request to exit the application gracefully.
    ExitRequest,
}
