use crate::game::state::GameState;

/// Command and query surface of the game core.
///
/// The input engine drives the game exclusively through this trait; it has no
/// knowledge of boards, pieces, or movement legality. The `move_*` methods
/// report whether the piece actually changed position, which feeds the DAS
/// wall-charge behavior.
pub trait GameActions {
    fn game_state(&self) -> GameState;
    fn is_paused(&self) -> bool;

    /// Returns true if the piece moved.
    fn move_piece_left(&mut self) -> bool;
    /// Returns true if the piece moved.
    fn move_piece_right(&mut self) -> bool;
    /// Returns true if the piece moved (false means it locked).
    fn move_piece_down(&mut self) -> bool;

    fn rotate_piece_left(&mut self);
    fn rotate_piece_right(&mut self);

    fn restart(&mut self);
    fn rewind(&mut self);
    fn fast_forward(&mut self);
    fn start_pause(&mut self);
    fn quit(&mut self);
}
