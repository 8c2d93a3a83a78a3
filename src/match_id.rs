//! GNU Backgammon Match ID.
//!
//! The whole match state (cube, turn, dice, score) travels as a 12
//! character base64 identifier over a 9 byte little-endian key. Fields are
//! packed least-significant-bit first, in the order given by
//! <https://www.gnu.org/software/gnubg/manual/html_node/A-technical-description-of-the-Match-ID.html>
//!
//! Dice values are stored and transported only; rolling them and ruling on
//! cube actions belong to the caller.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Match ID of a fresh, unstarted money game session.
pub const STARTING_MATCH_ID: &str = "cAgAAAAAAAAA";

const PACKED_LEN: usize = 9;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    #[error("match ID does not decode to exactly 9 bytes")]
    InvalidIdentifier,
    #[error("match ID contains an invalid {0} field")]
    InvalidField(&'static str),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Player {
    Zero = 0b00,
    One = 0b01,
    /// cube holder when nobody has doubled yet
    Centered = 0b11,
}

impl Player {
    fn from_bits(bits: u16) -> Option<Player> {
        match bits {
            0b00 => Some(Player::Zero),
            0b01 => Some(Player::One),
            0b11 => Some(Player::Centered),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum GameState {
    NotStarted = 0b000,
    Playing = 0b001,
    GameOver = 0b010,
    Resigned = 0b011,
    DroppedCube = 0b100,
}

impl GameState {
    fn from_bits(bits: u16) -> Option<GameState> {
        match bits {
            0b000 => Some(GameState::NotStarted),
            0b001 => Some(GameState::Playing),
            0b010 => Some(GameState::GameOver),
            0b011 => Some(GameState::Resigned),
            0b100 => Some(GameState::DroppedCube),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Resign {
    None = 0b00,
    SingleGame = 0b01,
    Gammon = 0b10,
    Backgammon = 0b11,
}

impl Resign {
    fn from_bits(bits: u16) -> Resign {
        match bits {
            0b01 => Resign::SingleGame,
            0b10 => Resign::Gammon,
            0b11 => Resign::Backgammon,
            _ => Resign::None,
        }
    }
}

/// Decoded match state.
///
/// `cube_value` is the face value (1, 2, 4, ...); the key stores its log2.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Match {
    pub cube_value: u16,
    pub cube_holder: Player,
    pub player: Player,
    pub crawford: bool,
    pub game_state: GameState,
    pub turn: Player,
    pub double: bool,
    pub resign: Resign,
    pub dice_1: u8,
    pub dice_2: u8,
    pub length: u16,
    pub player_0_score: u16,
    pub player_1_score: u16,
}

/// field widths in key order, least significant first
const CUBE_VALUE_BITS: u32 = 4;
const PLAYER_BITS: u32 = 2;
const FLAG_BITS: u32 = 1;
const GAME_STATE_BITS: u32 = 3;
const RESIGN_BITS: u32 = 2;
const DIE_BITS: u32 = 3;
const SCORE_BITS: u32 = 15;

struct KeyReader {
    key: u128,
    cursor: u32,
}

impl KeyReader {
    fn new(packed: &[u8]) -> KeyReader {
        let mut raw = [0u8; 16];
        raw[..PACKED_LEN].copy_from_slice(packed);
        KeyReader {
            key: u128::from_le_bytes(raw),
            cursor: 0,
        }
    }

    fn take(&mut self, bits: u32) -> u16 {
        let field = self.key >> self.cursor & ((1u128 << bits) - 1);
        self.cursor += bits;
        field as u16
    }
}

struct KeyWriter {
    key: u128,
    cursor: u32,
}

impl KeyWriter {
    fn new() -> KeyWriter {
        KeyWriter { key: 0, cursor: 0 }
    }

    fn put(&mut self, field: u16, bits: u32) {
        debug_assert!(u32::from(field) < 1 << bits);
        self.key |= u128::from(field) << self.cursor;
        self.cursor += bits;
    }

    fn into_bytes(self) -> [u8; PACKED_LEN] {
        let raw = self.key.to_le_bytes();
        let mut packed = [0u8; PACKED_LEN];
        packed.copy_from_slice(&raw[..PACKED_LEN]);
        packed
    }
}

/// Decode a Match ID and return the match state.
pub fn decode(match_id: &str) -> Result<Match, MatchError> {
    let packed = STANDARD
        .decode(match_id)
        .map_err(|_| MatchError::InvalidIdentifier)?;
    if packed.len() != PACKED_LEN {
        return Err(MatchError::InvalidIdentifier);
    }
    let mut key = KeyReader::new(&packed);
    Ok(Match {
        cube_value: 1 << key.take(CUBE_VALUE_BITS),
        cube_holder: Player::from_bits(key.take(PLAYER_BITS))
            .ok_or(MatchError::InvalidField("cube holder"))?,
        player: Player::from_bits(key.take(FLAG_BITS))
            .ok_or(MatchError::InvalidField("player"))?,
        crawford: key.take(FLAG_BITS) != 0,
        game_state: GameState::from_bits(key.take(GAME_STATE_BITS))
            .ok_or(MatchError::InvalidField("game state"))?,
        turn: Player::from_bits(key.take(FLAG_BITS))
            .ok_or(MatchError::InvalidField("turn"))?,
        double: key.take(FLAG_BITS) != 0,
        resign: Resign::from_bits(key.take(RESIGN_BITS)),
        dice_1: key.take(DIE_BITS) as u8,
        dice_2: key.take(DIE_BITS) as u8,
        length: key.take(SCORE_BITS),
        player_0_score: key.take(SCORE_BITS),
        player_1_score: key.take(SCORE_BITS),
    })
}

/// Encode the match state and return its Match ID.
///
/// `cube_value` must be a power of two; everything else is range-checked
/// only in debug builds.
pub fn encode(m: &Match) -> String {
    debug_assert!(m.cube_value.is_power_of_two());
    let mut key = KeyWriter::new();
    key.put(m.cube_value.trailing_zeros() as u16, CUBE_VALUE_BITS);
    key.put(m.cube_holder as u16, PLAYER_BITS);
    key.put(m.player as u16, FLAG_BITS);
    key.put(m.crawford as u16, FLAG_BITS);
    key.put(m.game_state as u16, GAME_STATE_BITS);
    key.put(m.turn as u16, FLAG_BITS);
    key.put(m.double as u16, FLAG_BITS);
    key.put(m.resign as u16, RESIGN_BITS);
    key.put(m.dice_1 as u16, DIE_BITS);
    key.put(m.dice_2 as u16, DIE_BITS);
    key.put(m.length, SCORE_BITS);
    key.put(m.player_0_score, SCORE_BITS);
    key.put(m.player_1_score, SCORE_BITS);
    STANDARD.encode(key.into_bytes())
}

#[cfg(test)]
mod test_match {
    use super::*;

    // cube at 2 held by player 0, player 1 on roll with a 5-2,
    // 9 point match at 2-4
    const MID_MATCH_ID: &str = "QYkqASAAIAAA";

    fn mid_match() -> Match {
        Match {
            cube_value: 2,
            cube_holder: Player::Zero,
            player: Player::One,
            crawford: false,
            game_state: GameState::Playing,
            turn: Player::One,
            double: false,
            resign: Resign::None,
            dice_1: 5,
            dice_2: 2,
            length: 9,
            player_0_score: 2,
            player_1_score: 4,
        }
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(MID_MATCH_ID).unwrap(), mid_match());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&mid_match()), MID_MATCH_ID);
    }

    #[test]
    fn test_starting_match() {
        let m = decode(STARTING_MATCH_ID).unwrap();
        assert_eq!(m.cube_value, 1);
        assert_eq!(m.cube_holder, Player::Centered);
        assert_eq!(m.game_state, GameState::NotStarted);
        assert_eq!(m.dice_1, 0);
        assert_eq!(m.dice_2, 0);
        assert_eq!(m.length, 0);
        assert_eq!(encode(&m), STARTING_MATCH_ID);
    }

    #[test]
    fn test_bad_identifier() {
        assert_eq!(decode("AAAA"), Err(MatchError::InvalidIdentifier));
        assert_eq!(decode("not base64!!"), Err(MatchError::InvalidIdentifier));
    }
}
