pub mod game;
pub mod match_id;
pub mod position;

pub use game::Backgammon;
pub use match_id::{GameState, Match, MatchError, Player, Resign, STARTING_MATCH_ID};
pub use position::{Position, PositionError, STARTING_POSITION_ID};

/// checkers per side, always
pub(crate) const CHECKERS: u8 = 15;
/// points on the board
pub(crate) const POINTS: usize = 24;
