/// A d-pad direction the player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// Which direction, if any, acts this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arbitration {
    /// Nothing held.
    Idle,
    /// Exactly one direction held.
    Active(Direction),
    /// More than one direction held; movement is suppressed this frame.
    Conflict,
}

/// Currently-held d-pad flags. One instance is shared by every device
/// feeding the same player; the last writer wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldState {
    pub left_held: bool,
    pub right_held: bool,
    pub down_held: bool,
}

impl HeldState {
    pub fn set_held(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left_held = held,
            Direction::Right => self.right_held = held,
            Direction::Down => self.down_held = held,
        }
    }

    /// Decide the single active direction for this frame. Holding more than
    /// one direction yields [`Arbitration::Conflict`] rather than picking an
    /// arbitrary winner.
    pub fn arbitrate(&self) -> Arbitration {
        let held = [
            (Direction::Left, self.left_held),
            (Direction::Right, self.right_held),
            (Direction::Down, self.down_held),
        ];
        let mut active = held.iter().filter(|(_, h)| *h).map(|(d, _)| *d);
        match (active.next(), active.next()) {
            (None, _) => Arbitration::Idle,
            (Some(direction), None) => Arbitration::Active(direction),
            (Some(_), Some(_)) => Arbitration::Conflict,
        }
    }
}

/// Soft drop bookkeeping for the current piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftDropState {
    /// The drop key is engaged and pulling the piece down.
    pub active: bool,
    /// Cells dropped for the current piece, for scoring.
    pub cells_dropped: u32,
    /// Set when the tick already dropped the piece; alternates drop frames
    /// with rest frames.
    pub dropped_last_frame: bool,
}

impl SoftDropState {
    /// Stop dropping and forget the per-piece counter.
    pub fn cancel(&mut self) {
        self.active = false;
        self.cells_dropped = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arbitrate_idle() {
        assert_eq!(HeldState::default().arbitrate(), Arbitration::Idle);
    }

    #[test]
    fn test_arbitrate_single_direction() {
        let mut held = HeldState::default();
        held.set_held(Direction::Left, true);
        assert_eq!(held.arbitrate(), Arbitration::Active(Direction::Left));

        held.set_held(Direction::Left, false);
        held.set_held(Direction::Down, true);
        assert_eq!(held.arbitrate(), Arbitration::Active(Direction::Down));
    }

    #[test]
    fn test_arbitrate_conflict() {
        let mut held = HeldState::default();
        held.set_held(Direction::Left, true);
        held.set_held(Direction::Right, true);
        assert_eq!(held.arbitrate(), Arbitration::Conflict);

        held.set_held(Direction::Down, true);
        assert_eq!(held.arbitrate(), Arbitration::Conflict);
    }

    #[test]
    fn test_cancel_clears_drop_but_keeps_frame_marker() {
        let mut drop = SoftDropState {
            active: true,
            cells_dropped: 7,
            dropped_last_frame: true,
        };
        drop.cancel();
        assert!(!drop.active);
        assert_eq!(drop.cells_dropped, 0);
        assert!(drop.dropped_last_frame);
    }
}
