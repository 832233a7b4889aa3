use carousel::Item;
use gtk::prelude::*;
use gtk4 as gtk;

pub const DEFAULT_WIDTH: i32 = 960;
pub const DEFAULT_HEIGHT: i32 = 640;

/// The desktop's "reduce animations" switch.
pub fn prefers_reduced_motion() -> bool {
    gtk::Settings::default().is_some_and(|s| !s.is_gtk_enable_animations())
}

pub fn init_window(window: &gtk::ApplicationWindow) {
    window.set_default_size(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    window.set_focusable(true);
}

pub fn set_title_for(window: &gtk::ApplicationWindow, item: &Item) {
    window.set_title(Some(&format!("{} · Showcase", item.title)));
}
