//! Toolkit-free state machine behind the showcase project carousel.
//!
//! Everything that moves the active slide goes through [`Carousel`]; the
//! window layer only translates toolkit events into [`Gesture`]s and performs
//! the side effects a [`CarouselAction`] asks for.

pub mod macros;

pub mod badge;
pub mod clipboard;
pub mod controller;
pub mod gesture;
pub mod item;
pub mod opener;
pub mod pause;

pub use badge::{Badge, TagStyle, TagStyles};
pub use clipboard::{ClipboardError, ClipboardSink, CommandClipboard, CopyStatus};
pub use controller::{Carousel, CarouselAction, CarouselSettings, Direction, Playback};
pub use gesture::{DragTracker, Gesture, Key};
pub use item::{Accent, Item, ItemError, ItemId, ItemUrl};
pub use opener::{CommandOpener, OpenError, UrlOpener};
pub use pause::{PauseReason, PauseSet};
