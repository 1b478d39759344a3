use stacker_input::game::{GameActions, GameState};

/// Every command the engine can issue to the game core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    MoveLeft,
    MoveRight,
    MoveDown,
    RotateLeft,
    RotateRight,
    Restart,
    Rewind,
    FastForward,
    StartPause,
    Quit,
}

/// Scripted game core: records every command and answers movement requests
/// from preset flags.
pub struct ScriptedGame {
    pub state: GameState,
    pub paused: bool,
    /// Whether horizontal shifts succeed.
    pub allow_horizontal: bool,
    /// Whether downward moves succeed (false simulates a lock).
    pub allow_down: bool,
    pub calls: Vec<Call>,
}

impl ScriptedGame {
    pub fn running() -> Self {
        Self {
            state: GameState::Running,
            paused: false,
            allow_horizontal: true,
            allow_down: true,
            calls: Vec::new(),
        }
    }

    pub fn in_state(state: GameState) -> Self {
        Self {
            state,
            paused: state == GameState::Paused,
            ..Self::running()
        }
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl GameActions for ScriptedGame {
    fn game_state(&self) -> GameState {
        self.state
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn move_piece_left(&mut self) -> bool {
        self.calls.push(Call::MoveLeft);
        self.allow_horizontal
    }

    fn move_piece_right(&mut self) -> bool {
        self.calls.push(Call::MoveRight);
        self.allow_horizontal
    }

    fn move_piece_down(&mut self) -> bool {
        self.calls.push(Call::MoveDown);
        self.allow_down
    }

    fn rotate_piece_left(&mut self) {
        self.calls.push(Call::RotateLeft);
    }

    fn rotate_piece_right(&mut self) {
        self.calls.push(Call::RotateRight);
    }

    fn restart(&mut self) {
        self.calls.push(Call::Restart);
    }

    fn rewind(&mut self) {
        self.calls.push(Call::Rewind);
    }

    fn fast_forward(&mut self) {
        self.calls.push(Call::FastForward);
    }

    fn start_pause(&mut self) {
        self.calls.push(Call::StartPause);
    }

    fn quit(&mut self) {
        self.calls.push(Call::Quit);
    }
}
