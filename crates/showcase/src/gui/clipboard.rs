use carousel::{ClipboardError, ClipboardSink};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

/// The clipboard of the default GDK display.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayClipboard;

impl ClipboardSink for DisplayClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let display = gdk::Display::default().ok_or(ClipboardError::Unavailable)?;
        display.clipboard().set_text(text);
        Ok(())
    }
}
