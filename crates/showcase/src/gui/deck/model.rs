use super::layout::{DeckLayout, Hit, Point};
use super::{THUMB_LOAD_HEIGHT, THUMB_LOAD_WIDTH};
use carousel::{
    Badge, Carousel, CarouselAction, DragTracker, Gesture, Item, ItemError, Key, TagStyles,
};
use gdk_pixbuf::Pixbuf;
use std::time::Instant;

/// What a pointer release on the deck asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeckCommand {
    Gesture(Gesture),
    Copy,
}

pub struct Deck {
    pub carousel: Carousel,
    pub tags: TagStyles,
    pub thumbnails: Vec<Option<Pixbuf>>,
    pub layout: DeckLayout,
    pub drag: DragTracker,
    pub hovering: bool,
}

impl Deck {
    pub fn new(carousel: Carousel, tags: TagStyles) -> Self {
        let thumbnails = load_thumbnails(carousel.items());
        Self {
            carousel,
            tags,
            thumbnails,
            layout: DeckLayout::default(),
            drag: DragTracker::new(),
            hovering: false,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.layout = DeckLayout::compute(width, height, self.carousel.len());
    }

    pub fn reload(
        &mut self,
        items: Vec<Item>,
        tags: TagStyles,
    ) -> Result<CarouselAction, ItemError> {
        let action = self.carousel.replace_items(items)?;
        self.thumbnails = load_thumbnails(self.carousel.items());
        self.tags = tags;
        self.resize(self.layout.width, self.layout.height);
        Ok(action)
    }

    pub fn thumbnail(&self, index: usize) -> Option<&Pixbuf> {
        self.thumbnails.get(index).and_then(Option::as_ref)
    }

    pub fn badges(&self, item: &Item) -> Vec<Badge> {
        self.tags.badges(item)
    }

    /// Emits enter/leave only when the pointer crosses the card edge.
    pub fn update_hover(&mut self, p: Point) -> Option<Gesture> {
        let inside = self.layout.card.contains(p);
        self.set_hover(inside)
    }

    pub fn clear_hover(&mut self) -> Option<Gesture> {
        self.set_hover(false)
    }

    fn set_hover(&mut self, inside: bool) -> Option<Gesture> {
        if inside == self.hovering {
            return None;
        }
        self.hovering = inside;
        Some(if inside {
            Gesture::PointerEnter
        } else {
            Gesture::PointerLeave
        })
    }

    pub fn command_at(&self, p: Point, n_press: i32, now: Instant) -> Option<DeckCommand> {
        if self.drag.suppresses_click(now) {
            return None;
        }

        let active = self.carousel.active_index();
        let pick = |index: usize| {
            if n_press >= 2 {
                Gesture::DoubleClick(index)
            } else {
                Gesture::Click(index)
            }
        };

        let gesture = match self.layout.hit(p) {
            Hit::Copy => return Some(DeckCommand::Copy),
            Hit::Open => Gesture::Key(Key::Enter),
            Hit::Prev => Gesture::Key(Key::Left),
            Hit::Next => Gesture::Key(Key::Right),
            Hit::Toggle => Gesture::Key(Key::Space),
            Hit::Card => pick(active),
            Hit::Thumb(i) => pick(i),
            Hit::Dot(i) => Gesture::Click(i),
            Hit::Outside => Gesture::PressOutside,
        };
        Some(DeckCommand::Gesture(gesture))
    }
}

fn load_thumbnails(items: &[Item]) -> Vec<Option<Pixbuf>> {
    items.iter().map(load_thumbnail).collect()
}

/// A thumbnail that fails to load is hidden; the card falls back to its accent color.
fn load_thumbnail(item: &Item) -> Option<Pixbuf> {
    let path = item.thumbnail.as_ref()?;
    match Pixbuf::from_file_at_scale(path, THUMB_LOAD_WIDTH, THUMB_LOAD_HEIGHT, true) {
        Ok(pixbuf) => Some(pixbuf),
        Err(e) => {
            log::warn!(
                "Hiding thumbnail for '{}' ({}): {}",
                item.id,
                path.display(),
                e
            );
            None
        }
    }
}
