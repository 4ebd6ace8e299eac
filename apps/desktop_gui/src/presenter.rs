//! Presenter and clipboard backed by the egui frame loop.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use converter_core::{Clipboard, Presenter};
use shared::domain::{Field, MessageKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub short_text: String,
    pub long_text: String,
    pub short_invalid: bool,
    pub long_invalid: bool,
    pub busy: bool,
    pub message: Option<(MessageKind, String)>,
}

/// Writes into a shared [`ViewState`] read by the next frame. Hide timers
/// call in from a runtime thread, hence the repaint request on every change.
pub struct EguiPresenter {
    view: Arc<Mutex<ViewState>>,
    ctx: egui::Context,
}

impl EguiPresenter {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            view: Arc::new(Mutex::new(ViewState::default())),
            ctx,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
            .lock()
            .map(|view| view.clone())
            .unwrap_or_default()
    }

    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        if let Ok(mut view) = self.view.lock() {
            f(&mut view);
        }
        self.ctx.request_repaint();
    }
}

impl Presenter for EguiPresenter {
    fn set_field_text(&self, field: Field, text: &str) {
        self.update(|view| match field {
            Field::Short => view.short_text = text.to_string(),
            Field::Long => view.long_text = text.to_string(),
        });
    }

    fn set_field_invalid(&self, field: Field, invalid: bool) {
        self.update(|view| match field {
            Field::Short => view.short_invalid = invalid,
            Field::Long => view.long_invalid = invalid,
        });
    }

    fn set_busy(&self, busy: bool) {
        self.update(|view| view.busy = busy);
    }

    fn show_message(&self, kind: MessageKind, text: &str) {
        self.update(|view| view.message = Some((kind, text.to_string())));
    }

    fn hide_messages(&self) {
        self.update(|view| view.message = None);
    }
}

pub struct ArboardClipboard;

impl Clipboard for ArboardClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard
            .set_text(text)
            .context("failed to write clipboard text")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presenter_updates_view_state() {
        let presenter = EguiPresenter::new(egui::Context::default());
        presenter.set_field_text(Field::Short, "H9cNmGXLEc8NWcZzSThA9S");
        presenter.set_field_invalid(Field::Long, true);
        presenter.show_message(MessageKind::Error, "Invalid UUID: nope");

        let view = presenter.view();
        assert_eq!(view.short_text, "H9cNmGXLEc8NWcZzSThA9S");
        assert!(view.long_invalid);
        assert_eq!(
            view.message,
            Some((MessageKind::Error, "Invalid UUID: nope".to_string()))
        );

        presenter.hide_messages();
        assert_eq!(presenter.view().message, None);
    }
}
