use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use gilrs::{Axis, Button};
use serde::{Deserialize, Serialize};

use crate::input::action::LogicalAction;
use crate::input::raw_input::{AxisDir, RawInput};

const BINDINGS_FILE: &str = "bindings.json";

/// Action bindings for one physical device.
///
/// Persisted as a flat map from action name to the raw input's canonical
/// string. An action absent from the map is unbound and never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingTable {
    bindings: HashMap<LogicalAction, RawInput>,
}

impl BindingTable {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Default keyboard layout.
    pub fn keyboard_defaults() -> Self {
        Self {
            bindings: HashMap::from([
                (LogicalAction::MoveLeft, RawInput::key("ArrowLeft")),
                (LogicalAction::MoveRight, RawInput::key("ArrowRight")),
                (LogicalAction::SoftDrop, RawInput::key("ArrowDown")),
                (LogicalAction::RotateLeft, RawInput::key("z")),
                (LogicalAction::RotateRight, RawInput::key("x")),
                (LogicalAction::Restart, RawInput::key("r")),
                (LogicalAction::Rewind, RawInput::key("v")),
                (LogicalAction::FastForward, RawInput::key("b")),
                (LogicalAction::StartPause, RawInput::key("Enter")),
                (LogicalAction::Quit, RawInput::key("q")),
            ]),
        }
    }

    /// Default gamepad layout: left stick for movement, face buttons for
    /// rotation. Rewind, fast-forward, and quit start unbound.
    pub fn gamepad_defaults() -> Self {
        Self {
            bindings: HashMap::from([
                (
                    LogicalAction::MoveLeft,
                    RawInput::axis(Axis::LeftStickX, AxisDir::Negative),
                ),
                (
                    LogicalAction::MoveRight,
                    RawInput::axis(Axis::LeftStickX, AxisDir::Positive),
                ),
                (
                    LogicalAction::SoftDrop,
                    RawInput::axis(Axis::LeftStickY, AxisDir::Negative),
                ),
                (LogicalAction::RotateLeft, RawInput::button(Button::South)),
                (LogicalAction::RotateRight, RawInput::button(Button::East)),
                (LogicalAction::Restart, RawInput::button(Button::Select)),
                (LogicalAction::StartPause, RawInput::button(Button::Start)),
            ]),
        }
    }

    /// Exact-match lookup. Actions are scanned in declaration order, so if
    /// two actions share a raw input the earlier one wins.
    pub fn resolve(&self, raw: &RawInput) -> Option<LogicalAction> {
        LogicalAction::all()
            .iter()
            .copied()
            .find(|action| self.bindings.get(action) == Some(raw))
    }

    /// Overwrite the binding for `action`. No collision check: two actions
    /// may end up sharing a raw input, and `resolve` breaks the tie.
    pub fn rebind(&mut self, action: LogicalAction, raw: RawInput) {
        self.bindings.insert(action, raw);
    }

    pub fn binding(&self, action: LogicalAction) -> Option<&RawInput> {
        self.bindings.get(&action)
    }
}

/// Persisted binding profiles: one keyboard table plus one table per gamepad
/// slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingProfiles {
    pub keyboard: BindingTable,
    #[serde(default)]
    pub gamepads: Vec<BindingTable>,
}

impl Default for BindingProfiles {
    fn default() -> Self {
        Self {
            keyboard: BindingTable::keyboard_defaults(),
            gamepads: Vec::new(),
        }
    }
}

impl BindingProfiles {
    /// Load profiles from the default file.
    pub fn load() -> Result<Self> {
        Self::load_from(BINDINGS_FILE)
    }

    /// Load profiles from a specific path. A missing file yields defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save profiles to the default file.
    pub fn save(&self) -> Result<()> {
        self.save_to(BINDINGS_FILE)
    }

    /// Save profiles to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Table for a gamepad slot, seeding defaults for slots seen for the
    /// first time.
    pub fn gamepad_mut(&mut self, slot: usize) -> &mut BindingTable {
        while self.gamepads.len() <= slot {
            self.gamepads.push(BindingTable::gamepad_defaults());
        }
        &mut self.gamepads[slot]
    }

    pub fn gamepad(&self, slot: usize) -> Option<&BindingTable> {
        self.gamepads.get(slot)
    }
}
