use std::collections::BTreeSet;
use strum::{Display as StrumDisplay, EnumIter};

/// Independent conditions that hold auto-advance. Auto-advance runs only while none is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum PauseReason {
    Hover,
    Focus,
    /// Grace period after the user stepped through the slides.
    Navigation,
    /// The user picked a slide explicitly.
    Pinned,
    /// The user pressed the play/pause control.
    Toggled,
    Hidden,
    /// Never cleared; auto-advance is off for the whole session.
    ReducedMotion,
}

impl PauseReason {
    /// Reasons the play/pause control is allowed to clear.
    pub fn is_user_hold(&self) -> bool {
        matches!(self, Self::Navigation | Self::Pinned | Self::Toggled)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PauseSet(BTreeSet<PauseReason>);

impl PauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the reason was not already set.
    pub fn insert(&mut self, reason: PauseReason) -> bool {
        self.0.insert(reason)
    }

    /// Returns `true` when the reason was set. `ReducedMotion` is sticky.
    pub fn remove(&mut self, reason: PauseReason) -> bool {
        if reason == PauseReason::ReducedMotion {
            return false;
        }
        self.0.remove(&reason)
    }

    pub fn clear_user_holds(&mut self) -> bool {
        let before = self.0.len();
        self.0.retain(|r| !r.is_user_hold());
        before != self.0.len()
    }

    pub fn contains(&self, reason: PauseReason) -> bool {
        self.0.contains(&reason)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PauseReason> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_reasons_accumulate() {
        let mut set = PauseSet::new();
        assert!(set.insert(PauseReason::Hover));
        assert!(set.insert(PauseReason::Navigation));
        assert!(!set.insert(PauseReason::Hover));

        assert!(set.remove(PauseReason::Hover));
        assert!(!set.is_empty());
        assert!(set.remove(PauseReason::Navigation));
        assert!(set.is_empty());
    }

    #[test]
    fn test_reduced_motion_is_sticky() {
        let mut set = PauseSet::new();
        set.insert(PauseReason::ReducedMotion);
        assert!(!set.remove(PauseReason::ReducedMotion));
        assert!(!set.clear_user_holds());
        assert!(set.contains(PauseReason::ReducedMotion));
    }

    #[test]
    fn test_clear_user_holds_keeps_environment_reasons() {
        let mut set = PauseSet::new();
        for reason in PauseReason::iter() {
            set.insert(reason);
        }

        assert!(set.clear_user_holds());
        let left: Vec<_> = set.iter().collect();
        assert_eq!(
            left,
            vec![
                PauseReason::Hover,
                PauseReason::Focus,
                PauseReason::Hidden,
                PauseReason::ReducedMotion
            ]
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(PauseReason::ReducedMotion.to_string(), "reduced-motion");
        assert_eq!(PauseReason::Hover.to_string(), "hover");
    }
}
