use serde::{Deserialize, Serialize};

/// Abstract game commands a device input can be bound to.
///
/// The serialized snake_case names are the key set of persisted binding
/// profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateLeft,
    RotateRight,
    Restart,
    Rewind,
    FastForward,
    StartPause,
    Quit,
}

impl LogicalAction {
    /// All actions in declaration order. When two actions are bound to the
    /// same raw input, resolution picks the earlier entry.
    pub fn all() -> &'static [LogicalAction] {
        &[
            LogicalAction::MoveLeft,
            LogicalAction::MoveRight,
            LogicalAction::SoftDrop,
            LogicalAction::RotateLeft,
            LogicalAction::RotateRight,
            LogicalAction::Restart,
            LogicalAction::Rewind,
            LogicalAction::FastForward,
            LogicalAction::StartPause,
            LogicalAction::Quit,
        ]
    }

    /// Global controls fire on the down edge regardless of game state.
    pub fn is_global(self) -> bool {
        matches!(
            self,
            LogicalAction::Restart
                | LogicalAction::Rewind
                | LogicalAction::FastForward
                | LogicalAction::StartPause
                | LogicalAction::Quit
        )
    }
}
