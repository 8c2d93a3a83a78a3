//! GNU Backgammon Position ID.
//!
//! A position is carried on the wire as a 14 character base64 identifier,
//! expanded to an 80 bit binary "position key" in between, and modelled in
//! memory as signed per-point checker counts plus bar/off tallies.
//!
//! <https://www.gnu.org/software/gnubg/manual/html_node/A-technical-description-of-the-Position-ID.html>

pub mod codec;
mod model;

use thiserror::Error;

pub use model::Position;

/// Position ID of the standard starting position.
pub const STARTING_POSITION_ID: &str = "4HPwATDgc/ABMA";

/// checker runs in a position key: 24 points + bar, for each side
pub(crate) const SLOTS: usize = 50;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    #[error("position key must be exactly 80 characters of '0' and '1'")]
    InvalidKey,
    #[error("position ID does not decode to exactly 10 bytes")]
    InvalidIdentifier,
}
