use crate::controller::{Carousel, CarouselAction, Direction};
use crate::pause::PauseReason;
use std::time::{Duration, Instant};
use strum::EnumString;

/// Pointer travel before a press turns into a drag.
pub const DRAG_START_DISTANCE: f64 = 7.0;
/// Clicks arriving this soon after a drag are swallowed.
pub const CLICK_GUARD: Duration = Duration::from_millis(240);

/// Keys the carousel reacts to, parsed from toolkit key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Key {
    #[strum(serialize = "Left", serialize = "ArrowLeft", serialize = "KP_Left")]
    Left,
    #[strum(serialize = "Right", serialize = "ArrowRight", serialize = "KP_Right")]
    Right,
    #[strum(serialize = "Return", serialize = "Enter", serialize = "KP_Enter")]
    Enter,
    #[strum(serialize = "space", serialize = " ")]
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Click(usize),
    DoubleClick(usize),
    Key(Key),
    DragStart,
    /// Horizontal distance of a finished drag. Negative means the content moved left.
    Swipe(f64),
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    Visibility(bool),
    PressOutside,
}

impl Carousel {
    /// Routes every user gesture onto the controller's operations.
    pub fn handle(&mut self, gesture: Gesture) -> CarouselAction {
        match gesture {
            Gesture::Click(index) => self.select(index as isize),
            Gesture::DoubleClick(index) if self.settings().double_click_opens => {
                self.activate(index as isize)
            }
            Gesture::DoubleClick(index) => self.select(index as isize),
            Gesture::Key(Key::Left) => self.step(Direction::Previous),
            Gesture::Key(Key::Right) => self.step(Direction::Next),
            Gesture::Key(Key::Enter) => self.activate(self.active_index() as isize),
            Gesture::Key(Key::Space) => self.toggle(),
            Gesture::DragStart => self.hold_navigation(),
            Gesture::Swipe(dx) => match swipe_direction(dx, self.settings().drag_threshold) {
                Some(direction) => self.step(direction),
                None => CarouselAction::none(),
            },
            Gesture::PointerEnter => self.pause(PauseReason::Hover),
            Gesture::PointerLeave => self.resume(PauseReason::Hover),
            Gesture::FocusIn => self.pause(PauseReason::Focus),
            Gesture::FocusOut => self.resume(PauseReason::Focus),
            Gesture::Visibility(true) => self.resume(PauseReason::Hidden),
            Gesture::Visibility(false) => self.pause(PauseReason::Hidden),
            Gesture::PressOutside => self.unpin(),
        }
    }
}

/// Dragging content to the left reveals the next slide.
pub fn swipe_direction(dx: f64, threshold: f64) -> Option<Direction> {
    if !dx.is_finite() || dx.abs() < threshold {
        return None;
    }
    Some(if dx < 0.0 {
        Direction::Next
    } else {
        Direction::Previous
    })
}

/// Index of the slide whose center is closest to `target`.
pub fn nearest_slide(centers: &[f64], target: f64) -> Option<usize> {
    centers
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .map(|(i, _)| i)
}

/// Turns raw pointer drag updates into at most one [`Gesture::DragStart`] and one [`Gesture::Swipe`].
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    pressed: bool,
    dragging: bool,
    offset: f64,
    ended_at: Option<Instant>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.pressed = true;
        self.dragging = false;
        self.offset = 0.0;
    }

    pub fn update(&mut self, dx: f64) -> Option<Gesture> {
        if !self.pressed {
            return None;
        }
        self.offset = dx;
        if !self.dragging && dx.abs() >= DRAG_START_DISTANCE {
            self.dragging = true;
            return Some(Gesture::DragStart);
        }
        None
    }

    pub fn end(&mut self, dx: f64, now: Instant) -> Option<Gesture> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        self.offset = 0.0;

        if !self.dragging {
            return None;
        }
        self.dragging = false;
        self.ended_at = Some(now);
        Some(Gesture::Swipe(dx))
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current horizontal drag offset, zero unless a drag is in progress.
    pub fn offset(&self) -> f64 {
        if self.dragging { self.offset } else { 0.0 }
    }

    pub fn suppresses_click(&self, now: Instant) -> bool {
        self.ended_at
            .is_some_and(|at| now.saturating_duration_since(at) < CLICK_GUARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{CarouselSettings, Playback};
    use crate::item::{Item, ItemUrl};

    fn carousel(n: usize) -> Carousel {
        let items = (0..n)
            .map(|i| Item::new(format!("p{i}"), format!("P{i}"), format!("https://p.dev/{i}")))
            .collect();
        Carousel::new(items, CarouselSettings::default()).unwrap()
    }

    #[test]
    fn test_key_names() {
        let cases = vec![
            ("Left", Key::Left),
            ("ArrowLeft", Key::Left),
            ("right", Key::Right),
            ("Return", Key::Enter),
            ("KP_Enter", Key::Enter),
            ("space", Key::Space),
            (" ", Key::Space),
        ];

        for (name, expected) in cases {
            assert_eq!(name.parse::<Key>().unwrap(), expected, "{name}");
        }
        assert!("Escape".parse::<Key>().is_err());
    }

    #[test]
    fn test_keyboard_navigation() {
        let mut c = carousel(4);

        c.handle(Gesture::Key(Key::Left));
        assert_eq!(c.active_index(), 3);
        c.handle(Gesture::Key(Key::Right));
        c.handle(Gesture::Key(Key::Right));
        assert_eq!(c.active_index(), 1);

        let action = c.handle(Gesture::Key(Key::Enter));
        assert_eq!(action.open, Some(ItemUrl::new("https://p.dev/1")));
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_space_toggles_playback() {
        let mut c = carousel(4);
        c.handle(Gesture::Key(Key::Space));
        assert_eq!(c.playback(), Playback::Paused);
        c.handle(Gesture::Key(Key::Space));
        assert_eq!(c.playback(), Playback::Playing);
    }

    #[test]
    fn test_click_selects_and_double_click_opens() {
        let mut c = carousel(4);

        let click = c.handle(Gesture::Click(2));
        assert_eq!(click.open, None);
        assert_eq!(c.active_index(), 2);
        assert_eq!(c.playback(), Playback::Paused);

        let double = c.handle(Gesture::DoubleClick(3));
        assert_eq!(double.open, Some(ItemUrl::new("https://p.dev/3")));
        assert_eq!(c.active_index(), 3);
    }

    #[test]
    fn test_double_click_can_be_disabled() {
        let items = vec![Item::new("a", "A", "https://a.dev"), Item::new("b", "B", "https://b.dev")];
        let settings = CarouselSettings {
            double_click_opens: false,
            ..CarouselSettings::default()
        };
        let mut c = Carousel::new(items, settings).unwrap();

        let action = c.handle(Gesture::DoubleClick(1));
        assert_eq!(action.open, None);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_swipe_threshold() {
        let mut c = carousel(4);

        c.handle(Gesture::Swipe(-20.0));
        assert_eq!(c.active_index(), 0);

        c.handle(Gesture::Swipe(-60.0));
        assert_eq!(c.active_index(), 1);

        c.handle(Gesture::Swipe(80.0));
        c.handle(Gesture::Swipe(80.0));
        assert_eq!(c.active_index(), 3);

        assert_eq!(swipe_direction(f64::NAN, 10.0), None);
    }

    #[test]
    fn test_hover_and_visibility() {
        let mut c = carousel(3);
        c.handle(Gesture::PointerEnter);
        c.handle(Gesture::Visibility(false));
        c.handle(Gesture::PointerLeave);
        assert_eq!(c.playback(), Playback::Paused);
        c.handle(Gesture::Visibility(true));
        assert_eq!(c.playback(), Playback::Playing);
    }

    #[test]
    fn test_press_outside_unpins() {
        let mut c = carousel(3);
        c.handle(Gesture::Click(1));
        c.handle(Gesture::PressOutside);
        assert_eq!(c.playback(), Playback::Playing);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_drag_tracker_emits_start_once_and_swipe_on_release() {
        let mut tracker = DragTracker::new();
        let t0 = Instant::now();

        assert_eq!(tracker.update(30.0), None);

        tracker.begin();
        assert_eq!(tracker.update(-3.0), None);
        assert_eq!(tracker.update(-9.0), Some(Gesture::DragStart));
        assert_eq!(tracker.update(-50.0), None);
        assert_eq!(tracker.offset(), -50.0);

        assert_eq!(tracker.end(-64.0, t0), Some(Gesture::Swipe(-64.0)));
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.offset(), 0.0);
    }

    #[test]
    fn test_short_press_is_not_a_drag() {
        let mut tracker = DragTracker::new();
        let t0 = Instant::now();
        tracker.begin();
        tracker.update(4.0);
        assert_eq!(tracker.end(4.0, t0), None);
        assert!(!tracker.suppresses_click(t0));
    }

    #[test]
    fn test_click_guard_after_drag() {
        let mut tracker = DragTracker::new();
        let t0 = Instant::now();
        tracker.begin();
        tracker.update(100.0);
        tracker.end(100.0, t0);

        assert!(tracker.suppresses_click(t0 + Duration::from_millis(100)));
        assert!(!tracker.suppresses_click(t0 + CLICK_GUARD));
    }

    #[test]
    fn test_nearest_slide() {
        let centers = [50.0, 150.0, 250.0, 350.0];
        assert_eq!(nearest_slide(&centers, 0.0), Some(0));
        assert_eq!(nearest_slide(&centers, 190.0), Some(1));
        assert_eq!(nearest_slide(&centers, 210.0), Some(2));
        assert_eq!(nearest_slide(&centers, 9000.0), Some(3));
        assert_eq!(nearest_slide(&[], 10.0), None);
    }
}
