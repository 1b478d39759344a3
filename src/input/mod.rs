//! Input handling: device bindings, DAS timing, and per-frame arbitration.
//!
//! This module provides:
//! - [`InputManager`]: routes raw device events and runs the frame tick
//! - [`BindingTable`] / [`BindingProfiles`]: per-device action bindings with save/load
//! - [`DasCharge`] / [`DasTuning`]: the delayed auto shift charge model
//! - [`GamepadSource`]: gilrs-backed gamepad event pump

mod action;
mod bindings;
mod das;
mod gamepad;
mod held;
mod input_manager;
mod raw_input;

pub use action::LogicalAction;
pub use bindings::{BindingProfiles, BindingTable};
pub use das::{DasCharge, DasTuning};
pub use gamepad::{DEFAULT_AXIS_THRESHOLD, GamepadSource, PadEvent};
pub use held::{Arbitration, Direction, HeldState, SoftDropState};
pub use input_manager::{BindingListener, DeviceId, InputManager};
pub use raw_input::{AxisDir, RawInput, display_label};
