#![forbid(unsafe_code)]

//! Keyboard activation over the top-level action list.
//!
//! The navigator tracks which entry of the *top-level filtered-and-enabled*
//! list is keyboard-activated. Nested sub-actions are not part of the
//! activation list — they are reachable by pointer only, a scope inherited
//! from the source behavior and preserved as-is.
//!
//! `None` means no activation (the menu just opened, or the list changed
//! under the activation and it was re-clamped).

/// Directional activation state over a flattened list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationNavigator {
    activated: Option<usize>,
}

impl ActivationNavigator {
    /// A navigator with no activation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The activated index, if any.
    #[must_use]
    pub fn activated(&self) -> Option<usize> {
        self.activated
    }

    /// Move the activation up one entry.
    ///
    /// A no-op when nothing is activated or the first entry is.
    pub fn move_up(&mut self) {
        if let Some(index) = self.activated
            && index > 0
        {
            self.activated = Some(index - 1);
        }
    }

    /// Move the activation down one entry in a list of `len` entries.
    ///
    /// Enters the list at the first entry when nothing is activated;
    /// a no-op at the last entry or when the list is empty.
    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.activated = Some(match self.activated {
            None => 0,
            Some(index) => (index + 1).min(len - 1),
        });
    }

    /// Drop any activation that no longer addresses the list.
    ///
    /// When the filtered list shrinks past the activated index, the
    /// activation resets rather than silently pointing at a different
    /// action.
    pub fn reclamp(&mut self, len: usize) {
        if let Some(index) = self.activated
            && index >= len
        {
            self.activated = None;
        }
    }

    /// Clear the activation.
    pub fn reset(&mut self) {
        self.activated = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn move_down_walks_and_saturates() {
        let mut nav = ActivationNavigator::new();
        nav.move_down(3);
        assert_eq!(nav.activated(), Some(0));
        nav.move_down(3);
        nav.move_down(3);
        assert_eq!(nav.activated(), Some(2));
        nav.move_down(3);
        assert_eq!(nav.activated(), Some(2));
    }

    #[test]
    fn move_up_from_none_stays_none() {
        let mut nav = ActivationNavigator::new();
        nav.move_up();
        assert_eq!(nav.activated(), None);
    }

    #[test]
    fn move_up_saturates_at_first_entry() {
        let mut nav = ActivationNavigator::new();
        nav.move_down(2);
        nav.move_up();
        assert_eq!(nav.activated(), Some(0));
        nav.move_up();
        assert_eq!(nav.activated(), Some(0));
    }

    #[test]
    fn move_down_on_empty_list_is_inert() {
        let mut nav = ActivationNavigator::new();
        nav.move_down(0);
        assert_eq!(nav.activated(), None);
    }

    #[test]
    fn reclamp_resets_out_of_range() {
        let mut nav = ActivationNavigator::new();
        nav.move_down(5);
        nav.move_down(5);
        nav.move_down(5);
        assert_eq!(nav.activated(), Some(2));
        nav.reclamp(2);
        assert_eq!(nav.activated(), None);
    }

    #[test]
    fn reclamp_keeps_in_range_activation() {
        let mut nav = ActivationNavigator::new();
        nav.move_down(5);
        nav.move_down(5);
        nav.reclamp(3);
        assert_eq!(nav.activated(), Some(1));
    }

    #[test]
    fn reset_clears() {
        let mut nav = ActivationNavigator::new();
        nav.move_down(4);
        nav.reset();
        assert_eq!(nav.activated(), None);
    }

    proptest! {
        #[test]
        fn activation_always_addresses_the_list(
            ops in proptest::collection::vec(0u8..4, 0..64),
            lens in proptest::collection::vec(0usize..6, 64),
        ) {
            let mut nav = ActivationNavigator::new();
            let mut len = 3usize;
            for (i, op) in ops.iter().enumerate() {
                match op {
                    0 => nav.move_up(),
                    1 => nav.move_down(len),
                    2 => {
                        len = lens[i];
                        nav.reclamp(len);
                    }
                    _ => nav.reset(),
                }
                if let Some(index) = nav.activated() {
                    prop_assert!(index < len);
                }
            }
        }
    }
}
