use std::collections::HashMap;

use gilrs::{Axis, Event, EventType, GamepadId, Gilrs};
use tracing::{debug, warn};

use crate::input::raw_input::{AxisDir, RawInput};

/// How far an axis must move before it counts as a d-pad press.
pub const DEFAULT_AXIS_THRESHOLD: f32 = 0.5;

/// Edge produced by the gamepad pump, addressed by slot.
#[derive(Debug, Clone, PartialEq)]
pub enum PadEvent {
    Connected { slot: usize, name: String },
    Disconnected { slot: usize },
    Down { slot: usize, input: RawInput },
    Up { slot: usize, input: RawInput },
}

/// A gamepad slot. Slots are assigned at first connection and kept across
/// disconnects, so a reconnecting pad gets its bindings back.
#[derive(Debug)]
struct PadSlot {
    id: GamepadId,
    name: String,
    connected: bool,
}

/// Polls gilrs and converts button and axis motion into raw input edges.
///
/// Axis handling treats each axis as a pair of virtual buttons: pushing past
/// the threshold in one direction is a down edge, returning inside it is an
/// up edge. Snapping straight from one extreme to the other releases the old
/// direction before pressing the new one.
pub struct GamepadSource {
    gilrs: Gilrs,
    slots: Vec<PadSlot>,
    axis_values: HashMap<(usize, Axis), f32>,
    axis_threshold: f32,
}

impl GamepadSource {
    pub fn new() -> Option<Self> {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(e) => {
                warn!("failed to initialize gamepad support: {e}");
                return None;
            }
        };
        Some(Self {
            gilrs,
            slots: Vec::new(),
            axis_values: HashMap::new(),
            axis_threshold: DEFAULT_AXIS_THRESHOLD,
        })
    }

    pub fn with_axis_threshold(mut self, threshold: f32) -> Self {
        self.axis_threshold = threshold;
        self
    }

    /// Drain pending gilrs events into raw input edges. Call once per frame,
    /// before the frame tick, and feed the result to the input manager.
    pub fn poll(&mut self) -> Vec<PadEvent> {
        let mut events = Vec::new();
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => self.connect(id, &mut events),
                EventType::Disconnected => self.disconnect(id, &mut events),
                EventType::ButtonPressed(button, _) => {
                    if let Some(slot) = self.slot_of(id) {
                        events.push(PadEvent::Down {
                            slot,
                            input: RawInput::button(button),
                        });
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(slot) = self.slot_of(id) {
                        events.push(PadEvent::Up {
                            slot,
                            input: RawInput::button(button),
                        });
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    if let Some(slot) = self.slot_of(id) {
                        self.axis_motion(slot, axis, value, &mut events);
                    }
                }
                _ => {}
            }
        }
        events
    }

    pub fn connected_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.connected).count()
    }

    fn slot_of(&self, id: GamepadId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    fn connect(&mut self, id: GamepadId, events: &mut Vec<PadEvent>) {
        if let Some(slot) = self.slot_of(id) {
            self.slots[slot].connected = true;
            debug!("gamepad reconnected: {} (slot {slot})", self.slots[slot].name);
            events.push(PadEvent::Connected {
                slot,
                name: self.slots[slot].name.clone(),
            });
            return;
        }
        let name = self.gilrs.gamepad(id).name().to_string();
        let slot = self.slots.len();
        debug!("gamepad connected: {name} (slot {slot})");
        self.slots.push(PadSlot {
            id,
            name: name.clone(),
            connected: true,
        });
        events.push(PadEvent::Connected { slot, name });
    }

    fn disconnect(&mut self, id: GamepadId, events: &mut Vec<PadEvent>) {
        let Some(slot) = self.slot_of(id) else { return };
        self.slots[slot].connected = false;
        self.axis_values.retain(|(s, _), _| *s != slot);
        debug!("gamepad disconnected: {} (slot {slot})", self.slots[slot].name);
        events.push(PadEvent::Disconnected { slot });
    }

    fn axis_motion(&mut self, slot: usize, axis: Axis, value: f32, events: &mut Vec<PadEvent>) {
        let prev = self
            .axis_values
            .insert((slot, axis), value)
            .unwrap_or(0.0);
        let (released, pressed) = axis_edges(prev, value, self.axis_threshold);
        if let Some(dir) = released {
            events.push(PadEvent::Up {
                slot,
                input: RawInput::axis(axis, dir),
            });
        }
        if let Some(dir) = pressed {
            events.push(PadEvent::Down {
                slot,
                input: RawInput::axis(axis, dir),
            });
        }
    }
}

/// Threshold-crossing edges between two samples of one axis, as
/// `(released, pressed)`.
fn axis_edges(prev: f32, value: f32, threshold: f32) -> (Option<AxisDir>, Option<AxisDir>) {
    let was = active_dir(prev, threshold);
    let now = active_dir(value, threshold);
    if was == now { (None, None) } else { (was, now) }
}

fn active_dir(value: f32, threshold: f32) -> Option<AxisDir> {
    if value > threshold {
        Some(AxisDir::Positive)
    } else if value < -threshold {
        Some(AxisDir::Negative)
    } else {
        None
    }
}
