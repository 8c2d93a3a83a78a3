use crate::position::{codec, PositionError, SLOTS};
use crate::{CHECKERS, POINTS};

/// A board as seen by the player on roll.
///
/// `board_points[0]` is the player's ace point; positive counts are the
/// player's checkers, negative counts the opponent's. Bar and off tallies
/// are unsigned magnitudes for both sides (the original source keeps the
/// opponent's as non-positive; that sign is applied at the display
/// boundary instead, see `game`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub board_points: [i8; POINTS],
    pub player_bar: u8,
    pub player_off: u8,
    pub opponent_bar: u8,
    pub opponent_off: u8,
}

impl Position {
    /// Decode a Position ID.
    pub fn decode(position_id: &str) -> Result<Position, PositionError> {
        Position::from_key(&codec::decode(position_id)?)
    }

    /// Encode this position and return its Position ID.
    pub fn encode(&self) -> String {
        codec::pack_key(&self.key())
    }

    /// Build a position from an 80 bit position key.
    ///
    /// The key is a sequence of 50 checker runs, each terminated by a `'0'`:
    /// the opponent's 24 points (from their ace point outward) and bar, then
    /// the player's 24 points and bar. Borne-off checkers are whatever is
    /// left of the 15 per side.
    ///
    /// Only structure is checked. Physically impossible boards (more than
    /// 15 checkers a side, say) decode without complaint, as in GNU
    /// Backgammon itself.
    pub fn from_key(position_key: &str) -> Result<Position, PositionError> {
        if !codec::is_key(position_key) {
            return Err(PositionError::InvalidKey);
        }
        let mut runs = [0u8; SLOTS];
        let mut slot = 0;
        for b in position_key.bytes() {
            if slot == SLOTS {
                break;
            }
            match b {
                b'1' => runs[slot] += 1,
                _ => slot += 1,
            }
        }

        let opponent_points = &runs[..POINTS];
        let opponent_bar = runs[POINTS];
        let player_points = &runs[POINTS + 1..2 * POINTS + 1];
        let player_bar = runs[2 * POINTS + 1];

        // the two ace points sit on opposite physical ends of the board
        let mut board_points = [0i8; POINTS];
        for (i, point) in board_points.iter_mut().enumerate() {
            *point = player_points[i] as i8 - opponent_points[POINTS - 1 - i] as i8;
        }

        Ok(Position {
            board_points,
            player_bar,
            player_off: borne_off(player_points, player_bar),
            opponent_bar,
            opponent_off: borne_off(opponent_points, opponent_bar),
        })
    }

    /// Render this position as an 80 bit position key.
    pub fn key(&self) -> String {
        let mut key = String::with_capacity(codec::KEY_LEN);
        let opponent = (0..POINTS).map(|i| (-self.board_points[POINTS - 1 - i]).max(0) as u8);
        let player = self.board_points.iter().map(|&n| n.max(0) as u8);
        let runs = opponent
            .chain([self.opponent_bar])
            .chain(player)
            .chain([self.player_bar]);
        for run in runs {
            for _ in 0..run {
                key.push('1');
            }
            key.push('0');
        }
        while key.len() < codec::KEY_LEN {
            key.push('0');
        }
        key
    }

    /// Move one checker and return the resulting position.
    ///
    /// `source`/`destination` are 1-based point numbers; `None` as source
    /// means entering from the bar, `None` as destination means bearing
    /// off. Landing on a single opposing checker is a hit: the blot goes to
    /// the opponent's bar. Legality (dice, blocked points) is the caller's
    /// responsibility, as is the 1..=24 range.
    pub fn apply_move(&self, source: Option<usize>, destination: Option<usize>) -> Position {
        let mut next = *self;
        match source {
            Some(point) => {
                debug_assert!((1..=POINTS).contains(&point));
                next.board_points[point - 1] -= 1;
            }
            None => next.player_bar -= 1,
        }
        match destination {
            Some(point) => {
                debug_assert!((1..=POINTS).contains(&point));
                let dest = &mut next.board_points[point - 1];
                if *dest == -1 {
                    // hit
                    *dest = 1;
                    next.opponent_bar += 1;
                } else {
                    *dest += 1;
                }
            }
            None => next.player_off += 1,
        }
        next
    }

    /// The same board as seen from the other side of the table.
    pub fn swap_players(&self) -> Position {
        let mut board_points = [0i8; POINTS];
        for (i, point) in board_points.iter_mut().enumerate() {
            *point = -self.board_points[POINTS - 1 - i];
        }
        Position {
            board_points,
            player_bar: self.opponent_bar,
            player_off: self.opponent_off,
            opponent_bar: self.player_bar,
            opponent_off: self.player_off,
        }
    }
}

/// whatever of the 15 checkers is neither on a point nor on the bar
#[inline]
fn borne_off(points: &[u8], bar: u8) -> u8 {
    let on_board: u8 = points.iter().sum::<u8>() + bar;
    CHECKERS.saturating_sub(on_board)
}
