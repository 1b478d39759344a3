mod actions;
mod state;

pub use actions::GameActions;
pub use state::GameState;
