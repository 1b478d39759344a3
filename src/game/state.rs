/// Coarse game phase as reported by the game core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    StartScreen,
    /// The first piece of a new game is falling.
    FirstPiece,
    Running,
    Paused,
    GameOver,
}
