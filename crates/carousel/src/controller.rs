use crate::clipboard::{self, ClipboardSink, CopyStatus};
use crate::item::{self, Item, ItemError, ItemUrl};
use crate::pause::{PauseReason, PauseSet};
use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(4000);
pub const DEFAULT_RESUME_AFTER: Duration = Duration::from_millis(1800);
pub const DEFAULT_FEEDBACK_TTL: Duration = Duration::from_millis(1100);
pub const DEFAULT_DRAG_THRESHOLD: f64 = 48.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    /// Time a slide stays up before auto-advance. Zero disables auto-advance.
    pub interval: Duration,
    /// Grace period after manual stepping before auto-advance resumes.
    pub resume_after: Duration,
    /// How long the "Copied" / "Copy failed" label stays up.
    pub feedback_ttl: Duration,
    pub reduced_motion: bool,
    /// Horizontal distance in pixels a drag must cover to count as a swipe.
    pub drag_threshold: f64,
    pub double_click_opens: bool,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            resume_after: DEFAULT_RESUME_AFTER,
            feedback_ttl: DEFAULT_FEEDBACK_TTL,
            reduced_motion: false,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            double_click_opens: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn offset(&self) -> isize {
        match self {
            Self::Next => 1,
            Self::Previous => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Playing,
    Paused,
}

/// What the presentation layer has to do after a state change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselAction {
    pub should_redraw: bool,
    pub open: Option<ItemUrl>,
}

impl CarouselAction {
    pub fn new(should_redraw: bool, open: Option<ItemUrl>) -> Self {
        Self {
            should_redraw,
            open,
        }
    }

    pub fn redraw() -> Self {
        Self::new(true, None)
    }

    pub fn none() -> Self {
        Self::default()
    }

    fn merge(mut self, other: Self) -> Self {
        self.should_redraw |= other.should_redraw;
        self.open = self.open.or(other.open);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CopyFeedback {
    status: CopyStatus,
    remaining: Duration,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    items: Vec<Item>,
    settings: CarouselSettings,
    active: usize,
    pauses: PauseSet,
    /// Time accumulated towards the next auto-advance.
    elapsed: Duration,
    /// Sum of every tick; the carousel's notion of "now".
    clock: Duration,
    last_interaction: Option<Duration>,
    feedback: Option<CopyFeedback>,
}

impl Carousel {
    pub fn new(items: Vec<Item>, settings: CarouselSettings) -> Result<Self, ItemError> {
        item::validate(&items)?;

        let mut pauses = PauseSet::new();
        if settings.reduced_motion || settings.interval.is_zero() {
            pauses.insert(PauseReason::ReducedMotion);
        }

        Ok(Self {
            items,
            settings,
            active: 0,
            pauses,
            elapsed: Duration::ZERO,
            clock: Duration::ZERO,
            last_interaction: None,
            feedback: None,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_item(&self) -> &Item {
        &self.items[self.active]
    }

    /// Item `offset` slots away from the active one, wrapping around both ends.
    pub fn item_at_offset(&self, offset: isize) -> &Item {
        &self.items[self.normalize(self.active as isize + offset)]
    }

    pub fn playback(&self) -> Playback {
        if self.pauses.is_empty() {
            Playback::Playing
        } else {
            Playback::Paused
        }
    }

    pub fn is_paused(&self) -> bool {
        self.playback() == Playback::Paused
    }

    pub fn pauses(&self) -> &PauseSet {
        &self.pauses
    }

    pub fn auto_advance_enabled(&self) -> bool {
        !self.pauses.contains(PauseReason::ReducedMotion)
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn last_interaction(&self) -> Option<Duration> {
        self.last_interaction
    }

    /// Fraction of the current interval that has elapsed, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        if self.settings.interval.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.settings.interval.as_secs_f64()).min(1.0)
    }

    /// Fill of progress segment `index`: full before the active slide, partial on it, empty after.
    pub fn segment_fill(&self, index: usize) -> f64 {
        match index.cmp(&self.active) {
            std::cmp::Ordering::Less => 1.0,
            std::cmp::Ordering::Equal => self.progress(),
            std::cmp::Ordering::Greater => 0.0,
        }
    }

    pub fn copy_feedback(&self) -> Option<CopyStatus> {
        self.feedback.map(|f| f.status)
    }

    /// Single place that maps any index onto `0..len`.
    pub fn normalize(&self, index: isize) -> usize {
        index.rem_euclid(self.items.len() as isize) as usize
    }

    fn set_active(&mut self, index: isize) {
        let next = self.normalize(index);
        if next != self.active {
            log::debug!("Active slide {} -> {}", self.active, next);
        }
        self.active = next;
        self.elapsed = Duration::ZERO;
    }

    pub fn advance(&mut self, direction: Direction) -> CarouselAction {
        self.set_active(self.active as isize + direction.offset());
        CarouselAction::redraw()
    }

    /// An explicit pick. Holds auto-advance until the user resumes it.
    pub fn select(&mut self, index: isize) -> CarouselAction {
        self.set_active(index);
        self.pauses.insert(PauseReason::Pinned);
        self.last_interaction = Some(self.clock);
        CarouselAction::redraw()
    }

    pub fn activate(&mut self, index: isize) -> CarouselAction {
        let action = self.select(index);
        let url = self.active_item().url.clone();
        log::info!("Opening '{}'", url);
        action.merge(CarouselAction::new(true, Some(url)))
    }

    /// Manual previous/next. Auto-advance picks up again after the grace period.
    pub fn step(&mut self, direction: Direction) -> CarouselAction {
        let action = self.advance(direction);
        self.hold_navigation();
        action
    }

    /// Starts (or restarts) the navigation grace period.
    pub fn hold_navigation(&mut self) -> CarouselAction {
        let added = self.pauses.insert(PauseReason::Navigation);
        self.last_interaction = Some(self.clock);
        CarouselAction::new(added, None)
    }

    pub fn pause(&mut self, reason: PauseReason) -> CarouselAction {
        let added = self.pauses.insert(reason);
        if added {
            log::debug!("Paused by {}", reason);
        }
        CarouselAction::new(added, None)
    }

    pub fn resume(&mut self, reason: PauseReason) -> CarouselAction {
        let removed = self.pauses.remove(reason);
        if removed {
            log::debug!("Pause reason {} cleared", reason);
            self.restart_if_playing();
        }
        CarouselAction::new(removed, None)
    }

    /// Play/pause control. Playing again also lifts a pin and any navigation grace.
    pub fn toggle(&mut self) -> CarouselAction {
        if !self.auto_advance_enabled() {
            return CarouselAction::none();
        }

        let held = self.pauses.iter().any(|r| r.is_user_hold());
        if held {
            self.pauses.clear_user_holds();
            self.restart_if_playing();
        } else {
            self.pauses.insert(PauseReason::Toggled);
            self.elapsed = Duration::ZERO;
        }
        CarouselAction::redraw()
    }

    pub fn unpin(&mut self) -> CarouselAction {
        self.resume(PauseReason::Pinned)
    }

    fn restart_if_playing(&mut self) {
        if !self.is_paused() {
            self.elapsed = Duration::ZERO;
        }
    }

    /// Drives auto-advance, the navigation grace period and copy feedback expiry.
    pub fn tick(&mut self, elapsed: Duration) -> CarouselAction {
        self.clock += elapsed;
        let mut action = CarouselAction::new(self.age_feedback(elapsed), None);

        if self.expire_navigation_grace() {
            return action.merge(CarouselAction::redraw());
        }

        if self.is_paused() {
            return action;
        }

        self.elapsed += elapsed;
        if self.elapsed >= self.settings.interval {
            action = action.merge(self.advance(Direction::Next));
        } else {
            action.should_redraw = true;
        }
        action
    }

    fn expire_navigation_grace(&mut self) -> bool {
        let due = self
            .last_interaction
            .is_some_and(|at| self.clock.saturating_sub(at) >= self.settings.resume_after);

        if due && self.pauses.contains(PauseReason::Navigation) {
            self.resume(PauseReason::Navigation);
            return true;
        }
        false
    }

    fn age_feedback(&mut self, elapsed: Duration) -> bool {
        match self.feedback.as_mut() {
            Some(f) if f.remaining > elapsed => {
                f.remaining -= elapsed;
                false
            }
            Some(_) => {
                self.feedback = None;
                true
            }
            None => false,
        }
    }

    /// Copies the active item's url. The outcome stays readable through [`Self::copy_feedback`]
    /// until it expires.
    pub fn copy_active_link(
        &mut self,
        primary: &dyn ClipboardSink,
        fallback: &dyn ClipboardSink,
    ) -> CopyStatus {
        let url = self.active_item().url.clone();
        let status = clipboard::copy_with_fallback(primary, fallback, &url);
        log::info!("Copy '{}': {}", url, status);

        self.feedback = Some(CopyFeedback {
            status,
            remaining: self.settings.feedback_ttl,
        });
        status
    }

    /// Swaps in a new item list, keeping the active item when its id survives.
    pub fn replace_items(&mut self, items: Vec<Item>) -> Result<CarouselAction, ItemError> {
        item::validate(&items)?;

        let current = self.active_item().id.clone();
        let kept = items.iter().position(|i| i.id == current);
        let fallback = self.active as isize;

        self.items = items;
        match kept {
            Some(index) => self.active = index,
            None => self.set_active(fallback),
        }
        Ok(CarouselAction::redraw())
    }
}
