use serde::{Deserialize, Serialize};

/// Tuning knobs for the delayed auto shift state machine.
///
/// The initial delay of a fresh hold is `trigger_threshold` minus the current
/// charge; the repeat interval once shifting is `trigger_threshold -
/// charged_floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DasTuning {
    /// Charge level at which a held direction fires a shift.
    pub trigger_threshold: u16,
    /// Charge level restored after a successful auto shift.
    pub charged_floor: u16,
    /// Charge level set by a directional tap.
    pub charge_after_tap: u16,
    /// Charge level granted around a piece lock.
    pub wall_charge_amount: u16,
    /// When true, every piece lock sets the charge to the wall amount.
    /// When false, the lock only caps the charge at the wall amount.
    pub charge_on_piece_start: bool,
}

impl Default for DasTuning {
    fn default() -> Self {
        Self {
            trigger_threshold: 16,
            charged_floor: 10,
            charge_after_tap: 0,
            wall_charge_amount: 16,
            charge_on_piece_start: false,
        }
    }
}

/// DAS charge level, kept within `[0, trigger_threshold]`.
///
/// The charge is the whole story of auto-repeat timing: it climbs once per
/// frame while a direction is held and fires a shift attempt exactly when it
/// sits at the trigger threshold. Taps, piece locks, and wall collisions jump
/// it to policy-defined levels instead of climbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DasCharge(u16);

impl DasCharge {
    /// Fully charged; the first piece of a game starts ready to shift.
    pub fn charged(tuning: &DasTuning) -> Self {
        Self(tuning.trigger_threshold)
    }

    pub(crate) fn clamped(value: u16, tuning: &DasTuning) -> Self {
        Self(value.min(tuning.trigger_threshold))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// A shift fires only while the charge sits at the threshold.
    pub fn is_triggered(self, tuning: &DasTuning) -> bool {
        self.0 == tuning.trigger_threshold
    }

    /// Piece lock: either start the next piece at the wall amount, or cap the
    /// carried-over charge at it. The cap handicaps high-repeat tunings that
    /// would otherwise enter every piece fully charged.
    pub fn on_piece_lock(self, tuning: &DasTuning) -> Self {
        if tuning.charge_on_piece_start {
            Self::clamped(tuning.wall_charge_amount, tuning)
        } else {
            Self::clamped(tuning.wall_charge_amount.min(self.0), tuning)
        }
    }

    /// One frame of holding a direction.
    pub fn on_held_tick(self, tuning: &DasTuning) -> Self {
        Self::clamped(self.0.saturating_add(1), tuning)
    }

    /// A successful auto shift drops back to the floor, so the next repeat
    /// takes `trigger_threshold - charged_floor` frames.
    pub fn on_shift_succeeded(self, tuning: &DasTuning) -> Self {
        Self::clamped(tuning.charged_floor, tuning)
    }

    /// A blocked shift recharges fully: the piece re-attempts the wall every
    /// frame and is ready the instant it comes free.
    pub fn on_shift_blocked(self, tuning: &DasTuning) -> Self {
        Self(tuning.trigger_threshold)
    }

    /// A directional tap sets the charge independent of held accounting.
    pub fn on_tap(self, tuning: &DasTuning) -> Self {
        Self::clamped(tuning.charge_after_tap, tuning)
    }

    /// Debug readout: `"<charge>/<threshold>"` over a bar of `|` marks,
    /// `"."` when empty so the readout keeps its height.
    pub fn meter(self, tuning: &DasTuning) -> String {
        let bar = if self.0 == 0 {
            ".".to_string()
        } else {
            "|".repeat(self.0 as usize)
        };
        format!("{}/{}\n{}", self.0, tuning.trigger_threshold, bar)
    }
}
