use std::collections::HashSet;

use tracing::debug;

use crate::game::{GameActions, GameState};
use crate::input::action::LogicalAction;
use crate::input::bindings::{BindingProfiles, BindingTable};
use crate::input::das::{DasCharge, DasTuning};
use crate::input::gamepad::PadEvent;
use crate::input::held::{Arbitration, Direction, HeldState, SoftDropState};
use crate::input::raw_input::RawInput;

/// Input source identity: one keyboard plus numbered gamepad slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceId {
    Keyboard,
    Gamepad(usize),
}

/// Observer notified whenever a rebind is applied, so the host can persist
/// the profiles and refresh any binding menu.
pub trait BindingListener {
    fn bindings_changed(&mut self, device: DeviceId, table: &BindingTable);
}

/// Pending rebind: the next raw input event is consumed as the new binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EditTarget {
    action: LogicalAction,
    device: DeviceId,
}

/// Routes raw device events into game commands and runs the per-frame DAS
/// tick.
///
/// One instance owns all input state for one player: binding tables, the
/// shared held flags, the DAS charge, and the rebind edit target. Events and
/// frame ticks must arrive serialized from the host loop; within a frame,
/// all events are expected before the tick.
pub struct InputManager {
    profiles: BindingProfiles,
    tuning: DasTuning,
    held: HeldState,
    soft_drop: SoftDropState,
    das_charge: DasCharge,
    edit_target: Option<EditTarget>,
    /// Raw inputs currently down, per device. A down event for an input
    /// already in this set is an OS auto-repeat and is dropped before
    /// rebinding or routing sees it.
    down_inputs: HashSet<(DeviceId, RawInput)>,
    listener: Option<Box<dyn BindingListener>>,
}

impl InputManager {
    /// Create a manager with default binding profiles.
    pub fn new(tuning: DasTuning) -> Self {
        Self::with_profiles(tuning, BindingProfiles::default())
    }

    /// Create a manager with previously persisted binding profiles.
    pub fn with_profiles(tuning: DasTuning, profiles: BindingProfiles) -> Self {
        Self {
            profiles,
            tuning,
            held: HeldState::default(),
            soft_drop: SoftDropState::default(),
            das_charge: DasCharge::charged(&tuning),
            edit_target: None,
            down_inputs: HashSet::new(),
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn BindingListener>) {
        self.listener = Some(listener);
    }

    /// Swap the DAS tuning, clamping the current charge into the new range.
    pub fn set_tuning(&mut self, tuning: DasTuning) {
        self.tuning = tuning;
        self.das_charge = DasCharge::clamped(self.das_charge.value(), &tuning);
    }

    pub fn tuning(&self) -> &DasTuning {
        &self.tuning
    }

    pub fn profiles(&self) -> &BindingProfiles {
        &self.profiles
    }

    pub fn bindings(&self, device: DeviceId) -> Option<&BindingTable> {
        match device {
            DeviceId::Keyboard => Some(&self.profiles.keyboard),
            DeviceId::Gamepad(slot) => self.profiles.gamepad(slot),
        }
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop.active
    }

    pub fn cells_soft_dropped(&self) -> u32 {
        self.soft_drop.cells_dropped
    }

    pub fn das_charge(&self) -> DasCharge {
        self.das_charge
    }

    pub fn held(&self) -> HeldState {
        self.held
    }

    pub fn pending_rebind(&self) -> Option<(LogicalAction, DeviceId)> {
        self.edit_target.map(|t| (t.action, t.device))
    }

    /// Forget all transient input state and start the charge full, as at the
    /// beginning of a game.
    pub fn reset(&mut self) {
        self.held = HeldState::default();
        self.soft_drop = SoftDropState::default();
        self.das_charge = DasCharge::charged(&self.tuning);
        self.edit_target = None;
        self.down_inputs.clear();
    }

    /// Ensure a binding table exists for a gamepad slot, seeding defaults on
    /// first connection. Reconnections keep the existing table.
    pub fn connect_gamepad(&mut self, slot: usize) {
        self.profiles.gamepad_mut(slot);
    }

    /// Arm a rebind: the next raw input event from any device is consumed as
    /// the new binding for `action` in `device`'s table.
    pub fn begin_rebind(&mut self, action: LogicalAction, device: DeviceId) {
        self.edit_target = Some(EditTarget { action, device });
    }

    /// The new piece's starting charge depends on the wall-charge policy.
    pub fn piece_locked(&mut self) {
        self.das_charge = self.das_charge.on_piece_lock(&self.tuning);
    }

    /// Route one down edge from a device.
    pub fn handle_input_down(
        &mut self,
        device: DeviceId,
        raw: RawInput,
        game: &mut dyn GameActions,
    ) {
        // An OS auto-repeat delivers a second down without an up in between.
        if !self.down_inputs.insert((device, raw.clone())) {
            return;
        }

        if let Some(target) = self.edit_target.take() {
            self.apply_rebind(target, raw);
            return;
        }

        let Some(action) = self.bindings(device).and_then(|t| t.resolve(&raw)) else {
            return;
        };

        match action {
            LogicalAction::Restart => game.restart(),
            LogicalAction::Rewind => game.rewind(),
            LogicalAction::FastForward => game.fast_forward(),
            LogicalAction::StartPause => game.start_pause(),
            LogicalAction::Quit => game.quit(),
            _ => self.piece_action_down(action, game),
        }
    }

    /// Route one up edge from a device.
    pub fn handle_input_up(&mut self, device: DeviceId, raw: &RawInput) {
        self.down_inputs.remove(&(device, raw.clone()));

        let Some(action) = self.bindings(device).and_then(|t| t.resolve(raw)) else {
            return;
        };

        match action {
            LogicalAction::MoveLeft => self.held.left_held = false,
            LogicalAction::MoveRight => self.held.right_held = false,
            LogicalAction::SoftDrop => {
                self.held.down_held = false;
                // Releasing the drop key stops the drop in any game state.
                self.soft_drop.cancel();
            }
            _ => {}
        }
    }

    /// Apply a gamepad pump event.
    pub fn apply_pad_event(&mut self, event: PadEvent, game: &mut dyn GameActions) {
        match event {
            PadEvent::Connected { slot, .. } => self.connect_gamepad(slot),
            PadEvent::Disconnected { slot } => self.release_device(DeviceId::Gamepad(slot)),
            PadEvent::Down { slot, input } => {
                self.handle_input_down(DeviceId::Gamepad(slot), input, game);
            }
            PadEvent::Up { slot, input } => {
                self.handle_input_up(DeviceId::Gamepad(slot), &input);
            }
        }
    }

    /// Run the once-per-frame arbitration and DAS step. Call after all of the
    /// frame's events have been routed.
    pub fn frame_tick(&mut self, game: &mut dyn GameActions) {
        let direction = match self.held.arbitrate() {
            Arbitration::Conflict => {
                // Ambiguous d-pad input moves nothing at all.
                self.soft_drop.cancel();
                return;
            }
            Arbitration::Idle => None,
            Arbitration::Active(direction) => Some(direction),
        };

        // Soft drop owns the frame: horizontal DAS never fires on a frame
        // that also moved the piece down.
        if self.soft_drop.active && !self.soft_drop.dropped_last_frame {
            if game.move_piece_down() {
                self.soft_drop.cells_dropped += 1;
            } else {
                // The piece locked under the drop.
                self.soft_drop.cancel();
            }
            self.soft_drop.dropped_last_frame = true;
            return;
        }
        self.soft_drop.dropped_last_frame = false;

        match direction {
            Some(direction @ (Direction::Left | Direction::Right)) => {
                self.held_direction_tick(direction, game);
            }
            _ => {}
        }
    }

    fn piece_action_down(&mut self, action: LogicalAction, game: &mut dyn GameActions) {
        // Held flags track in every game state so DAS feels the same across
        // pauses.
        match action {
            LogicalAction::MoveLeft => self.held.left_held = true,
            LogicalAction::MoveRight => self.held.right_held = true,
            LogicalAction::SoftDrop => self.held.down_held = true,
            _ => {}
        }

        let state = game.game_state();
        let paused = game.is_paused();
        if can_shift_or_rotate(state, paused) {
            match action {
                LogicalAction::MoveLeft => self.tap_direction(Direction::Left, game),
                LogicalAction::MoveRight => self.tap_direction(Direction::Right, game),
                LogicalAction::RotateLeft => game.rotate_piece_left(),
                LogicalAction::RotateRight => game.rotate_piece_right(),
                _ => {}
            }
        } else if matches!(action, LogicalAction::RotateLeft | LogicalAction::RotateRight) {
            debug!("rotate rejected, state: {state:?}");
        }

        if action == LogicalAction::SoftDrop && can_soft_drop(state, paused) {
            self.soft_drop.active = true;
        }
    }

    /// A directional tap consumes the charge, then shifts immediately.
    fn tap_direction(&mut self, direction: Direction, game: &mut dyn GameActions) {
        self.das_charge = self.das_charge.on_tap(&self.tuning);
        self.try_shift(direction, game);
    }

    fn held_direction_tick(&mut self, direction: Direction, game: &mut dyn GameActions) {
        self.das_charge = self.das_charge.on_held_tick(&self.tuning);
        if self.das_charge.is_triggered(&self.tuning) && self.try_shift(direction, game) {
            self.das_charge = self.das_charge.on_shift_succeeded(&self.tuning);
        }
    }

    /// Ask the game to shift; a blocked shift recharges against the wall.
    fn try_shift(&mut self, direction: Direction, game: &mut dyn GameActions) -> bool {
        let moved = if direction == Direction::Left {
            game.move_piece_left()
        } else {
            game.move_piece_right()
        };
        if !moved {
            self.das_charge = self.das_charge.on_shift_blocked(&self.tuning);
        }
        moved
    }

    fn apply_rebind(&mut self, target: EditTarget, raw: RawInput) {
        debug!("rebinding {:?} on {:?} to {raw}", target.action, target.device);
        let table = match target.device {
            DeviceId::Keyboard => &mut self.profiles.keyboard,
            DeviceId::Gamepad(slot) => self.profiles.gamepad_mut(slot),
        };
        table.rebind(target.action, raw);
        let table = &*table;
        if let Some(listener) = self.listener.as_mut() {
            listener.bindings_changed(target.device, table);
        }
    }

    /// Release everything a device was holding, as when it disconnects
    /// mid-hold.
    fn release_device(&mut self, device: DeviceId) {
        let stuck: Vec<RawInput> = self
            .down_inputs
            .iter()
            .filter(|(d, _)| *d == device)
            .map(|(_, raw)| raw.clone())
            .collect();
        for raw in stuck {
            self.handle_input_up(device, &raw);
        }
    }
}

/// Sideways movement and rotation are allowed while pieces are in play.
fn can_shift_or_rotate(state: GameState, paused: bool) -> bool {
    !paused && matches!(state, GameState::Running | GameState::FirstPiece)
}

/// Soft drop is only allowed once the game is fully running.
fn can_soft_drop(state: GameState, paused: bool) -> bool {
    !paused && state == GameState::Running
}
