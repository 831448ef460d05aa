//! Terminal UI for browsing and selecting recipe tags.
//!
//! The binary hosts the tag picker widget from `ladle-tags`: it owns the
//! terminal, drives the event loop, and fetches the tag catalog lazily the
//! first time the picker opens.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use color_eyre::eyre::WrapErr;
use ladle_tags::Tag;
use ladle_tags::TagPickerBuilder;
use ladle_tags::catalog_from_str;
use tokio::sync::mpsc::unbounded_channel;
use tracing_subscriber::EnvFilter;

mod app;
mod app_event;
mod app_event_sender;
pub mod cli;
mod key_hint;
mod scroll_state;
mod selection_rows;
mod tag_picker_view;
mod text_formatting;
pub mod tui;

pub use cli::Cli;

use crate::app::App;
use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::tag_picker_view::TagPickerView;

/// Catalog used when no `--catalog` file is given.
const SAMPLE_CATALOG: &str = include_str!("../sample_tags.json");

/// Runs the picker to completion and returns the final tag selection.
pub async fn run_main(cli: Cli) -> Result<Vec<Tag>> {
    color_eyre::install()?;
    init_logging(&cli.log_file)?;

    let catalog_source = match &cli.catalog {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read tag catalog {}", path.display()))?,
        None => SAMPLE_CATALOG.to_string(),
    };
    let load_delay = Duration::from_millis(cli.load_delay_ms);

    let (app_event_tx, app_event_rx) = unbounded_channel();
    let app_event_tx = AppEventSender::new(app_event_tx);

    let selection_tx = app_event_tx.clone();
    let mut builder = TagPickerBuilder::new()
        .loader(move || {
            let source = catalog_source.clone();
            Box::pin(async move {
                tokio::time::sleep(load_delay).await;
                Ok(catalog_from_str(&source))
            })
        })
        .on_selection_change(move |selection| {
            selection_tx.send(AppEvent::SelectionChanged(selection.to_vec()));
        })
        .group_by_category(!cli.flat)
        .show_search(!cli.no_search)
        .disabled(cli.disabled);
    if let Some(max_tags) = cli.max_tags {
        builder = builder.max_selected(max_tags);
    }
    let picker = builder.build();

    let mut tui = tui::init()?;
    let app = App::new(TagPickerView::new(picker, cli.error_text), app_event_tx);
    let result = app.run(&mut tui, app_event_rx).await;
    tui::restore()?;
    result
}

fn init_logging(log_file: &Path) -> std::io::Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(Arc::new(log_file))
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();
    Ok(())
}
