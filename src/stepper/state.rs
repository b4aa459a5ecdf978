//! Step registers and their read-only projection.

/// The two registers owned by the controller.
///
/// `active_step` is signed: direct `move_prev` / `move_to` calls are not
/// range checked and may leave it negative or past the last panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepperState {
    pub active_step: i64,
    pub items_count: usize,
}

impl StepperState {
    pub fn new(initial_step: i64) -> Self {
        Self {
            active_step: initial_step,
            items_count: 0,
        }
    }

    pub fn snapshot(&self) -> StepperSnapshot {
        StepperSnapshot {
            active_step: self.active_step,
            items_count: self.items_count,
        }
    }
}

/// Point-in-time copy of the stepper registers handed to views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperSnapshot {
    /// Zero-based index of the visible panel
    pub active_step: i64,
    /// Number of panels reported by the step list
    pub items_count: usize,
}

impl StepperSnapshot {
    /// Index of the terminal step, `-1` when there are no panels
    pub fn last_index(&self) -> i64 {
        self.items_count as i64 - 1
    }

    pub fn is_first(&self) -> bool {
        self.active_step == 0
    }

    /// Terminal condition: the active step is the last panel
    pub fn is_last(&self) -> bool {
        self.active_step == self.last_index()
    }

    pub fn has_prev(&self) -> bool {
        self.active_step > 0
    }

    pub fn has_next(&self) -> bool {
        self.active_step < self.last_index()
    }

    /// Whether some panel matches the active step
    pub fn is_in_range(&self) -> bool {
        self.active_step >= 0 && self.active_step < self.items_count as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(active_step: i64, items_count: usize) -> StepperSnapshot {
        StepperSnapshot {
            active_step,
            items_count,
        }
    }

    #[test]
    fn test_new_state_has_no_items() {
        let state = StepperState::new(2);
        assert_eq!(state.active_step, 2);
        assert_eq!(state.items_count, 0);
    }

    #[test]
    fn test_last_index_with_no_items_is_negative() {
        assert_eq!(snap(0, 0).last_index(), -1);
        assert!(!snap(0, 0).has_next());
        assert!(!snap(0, 0).is_last());
        assert!(snap(-1, 0).is_last());
    }

    #[test]
    fn test_middle_step() {
        let s = snap(1, 3);
        assert!(s.has_prev());
        assert!(s.has_next());
        assert!(!s.is_first());
        assert!(!s.is_last());
        assert!(s.is_in_range());
    }

    #[test]
    fn test_out_of_range_steps() {
        assert!(!snap(-1, 3).is_in_range());
        assert!(!snap(3, 3).is_in_range());
        assert!(!snap(7, 3).has_next());
        assert!(!snap(7, 3).is_last());
    }
}
