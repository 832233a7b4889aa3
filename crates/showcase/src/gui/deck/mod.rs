use std::time::Duration;

pub mod layout;
pub mod model;
pub mod view;

pub use layout::{DeckLayout, Hit, Point, Rect};
pub use model::{Deck, DeckCommand};
pub use view::draw;

pub const TICK_INTERVAL: Duration = Duration::from_millis(70);

pub const PADDING: f64 = 24.0;
pub const HEADER_HEIGHT: f64 = 36.0;
pub const CONTROL_SIZE: f64 = 32.0;
pub const CONTROL_GAP: f64 = 8.0;
pub const PROGRESS_HEIGHT: f64 = 4.0;
pub const PROGRESS_GAP: f64 = 6.0;
pub const SECTION_GAP: f64 = 16.0;
pub const PEEK_WIDTH: f64 = 56.0; // visible sliver of the neighbouring cards
pub const CARD_RADIUS: f64 = 18.0;
pub const MEDIA_FRACTION: f64 = 0.42; // share of the card height used by the thumbnail
pub const PILL_WIDTH: f64 = 96.0;
pub const PILL_HEIGHT: f64 = 32.0;
pub const DOT_RADIUS: f64 = 4.0;
pub const DOT_SPACING: f64 = 20.0;
pub const FILM_HEIGHT: f64 = 64.0;
pub const THUMB_WIDTH: f64 = 104.0;
pub const THUMB_GAP: f64 = 12.0;
pub const NEIGHBOR_ALPHA: f64 = 0.35;

pub const THUMB_LOAD_WIDTH: i32 = 960;
pub const THUMB_LOAD_HEIGHT: i32 = 540;
