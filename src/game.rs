//! Game wrapper tying a board position to the match state.
//!
//! This layer owns the "whose perspective" question the position model
//! stays out of: the ASCII diagram is always drawn from player 0's seat,
//! mirroring the board when player 1 holds it.

use crate::match_id::{self, Match, Player, STARTING_MATCH_ID};
use crate::position::{Position, STARTING_POSITION_ID};
use crate::POINTS;
use anyhow::Result;
use log::debug;
use std::fmt;

const BOARD_HEIGHT: usize = 11;
const MAX_DRAWN_CHECKERS: usize = 5;
const POINTS_PER_QUADRANT: usize = POINTS / 4;
const HEADER_13_24: &str = "+13-14-15-16-17-18------19-20-21-22-23-24-+";
const HEADER_12_01: &str = "+12-11-10--9--8--7-------6--5--4--3--2--1-+";

/// A single checker movement, already validated by the caller.
///
/// `source` `None` enters from the bar, `destination` `None` bears off;
/// points are 1-based from the moving player's perspective.
pub type Move = (Option<usize>, Option<usize>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backgammon {
    pub position: Position,
    pub match_state: Match,
}

impl Backgammon {
    /// A fresh game at the starting position.
    pub fn new() -> Backgammon {
        Backgammon::from_ids(STARTING_POSITION_ID, STARTING_MATCH_ID)
            .expect("starting identifiers are well-formed")
    }

    /// Restore a game from its `Position ID` and `Match ID` pair.
    pub fn from_ids(position_id: &str, match_id: &str) -> Result<Backgammon> {
        let position = Position::decode(position_id)?;
        let match_state = match_id::decode(match_id)?;
        debug!("restored game {}:{}", position_id, match_id);
        Ok(Backgammon {
            position,
            match_state,
        })
    }

    /// The combined `POSITION:MATCH` identifier of the current state.
    pub fn encode(&self) -> String {
        format!("{}:{}", self.position.encode(), match_id::encode(&self.match_state))
    }

    /// Execute a play, i.e. a list of validated moves.
    ///
    /// Dice and rule checking happen upstream; this only keeps the board
    /// consistent.
    pub fn play(&mut self, moves: &[Move]) {
        for &(source, destination) in moves {
            self.position = self.position.apply_move(source, destination);
        }
    }
}

impl Default for Backgammon {
    fn default() -> Backgammon {
        Backgammon::new()
    }
}

/// an ASCII checker matrix: one column per point, one row per checker,
/// stacks above five collapsed into a count cell
fn checker_matrix(top: &[i8], bottom: &[i8]) -> Vec<Vec<String>> {
    let mut matrix = vec![vec!["   ".to_string(); top.len()]; BOARD_HEIGHT];
    for (half, start, down) in [(top, 0usize, false), (bottom, BOARD_HEIGHT - 1, true)] {
        for (col, &count) in half.iter().enumerate() {
            let mut row = start;
            for i in 0..count.unsigned_abs() as usize {
                if count.unsigned_abs() as usize > MAX_DRAWN_CHECKERS && i == MAX_DRAWN_CHECKERS - 1
                {
                    matrix[row][col] = format!("{:^3}", count.unsigned_abs());
                    break;
                }
                matrix[row][col] = String::from(if count > 0 { " O " } else { " X " });
                row = if down { row - 1 } else { row + 1 };
            }
        }
    }
    matrix
}

/// split a player-0-normalized column list into top and bottom halves
fn split_halves(columns: &[i8]) -> (Vec<i8>, Vec<i8>) {
    let half = columns.len() / 2;
    let top: Vec<i8> = columns[..half].iter().rev().copied().collect();
    let bottom: Vec<i8> = columns[half..].to_vec();
    (top, bottom)
}

impl fmt::Display for Backgammon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let player_one = self.match_state.player == Player::One;

        let mut points: Vec<i8> = self.position.board_points.to_vec();
        // the opponent bar keeps the original's non-positive sign on screen
        let mut bars: Vec<i8> = vec![
            self.position.player_bar as i8,
            -(self.position.opponent_bar as i8),
        ];
        if player_one {
            points = points.iter().rev().map(|n| -n).collect();
            bars = bars.iter().rev().map(|n| -n).collect();
        }

        let (top, bottom) = split_halves(&points);
        let point_rows = checker_matrix(&top, &bottom);
        let bar_rows = checker_matrix(&bars[..1], &bars[1..]);

        writeln!(f, "                 Position ID: {}", self.position.encode())?;
        writeln!(
            f,
            "                 Match ID   : {}",
            match_id::encode(&self.match_state)
        )?;
        let (near, far) = if player_one {
            (HEADER_13_24, HEADER_12_01)
        } else {
            (HEADER_12_01, HEADER_13_24)
        };
        writeln!(f, " {}", near)?;
        for (i, row) in point_rows.iter().enumerate() {
            if i == BOARD_HEIGHT / 2 {
                write!(f, "{}|", if player_one { "v" } else { "^" })?;
            } else {
                write!(f, " |")?;
            }
            for cell in &row[..POINTS_PER_QUADRANT] {
                write!(f, "{}", cell)?;
            }
            if i == BOARD_HEIGHT / 2 {
                write!(f, "|BAR|")?;
            } else {
                write!(f, "|{}|", bar_rows[i][0])?;
            }
            for cell in &row[POINTS_PER_QUADRANT..] {
                write!(f, "{}", cell)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, " {}", far)
    }
}

#[cfg(test)]
mod test_game {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(
            Backgammon::new().encode(),
            format!("{}:{}", STARTING_POSITION_ID, STARTING_MATCH_ID)
        );
    }

    #[test]
    fn test_from_ids_rejects_garbage() {
        assert!(Backgammon::from_ids("not an id", STARTING_MATCH_ID).is_err());
        assert!(Backgammon::from_ids(STARTING_POSITION_ID, "nope").is_err());
    }

    #[test]
    fn test_play() {
        let mut game = Backgammon::new();
        game.play(&[(Some(24), Some(18)), (Some(13), Some(11))]);
        assert_eq!(game.position.board_points[17], 1);
        assert_eq!(game.position.board_points[10], 1);
        assert_eq!(game.position.board_points[23], 1);
        assert_eq!(game.position.board_points[12], 4);
    }

    #[test]
    fn test_display_starting_board() {
        let board = Backgammon::new().to_string();
        let expected = "\
                 Position ID: 4HPwATDgc/ABMA
                 Match ID   : cAgAAAAAAAAA
 +13-14-15-16-17-18------19-20-21-22-23-24-+
 | X           O    |   | O              X |
 | X           O    |   | O              X |
 | X           O    |   | O                |
 | X                |   | O                |
 | X                |   | O                |
v|                  |BAR|                  |
 | O                |   | X                |
 | O                |   | X                |
 | O           X    |   | X                |
 | O           X    |   | X              O |
 | O           X    |   | X              O |
 +12-11-10--9--8--7-------6--5--4--3--2--1-+
";
        assert_eq!(board, expected);
    }

    #[test]
    fn test_display_mirrors_for_player_zero() {
        let mut game = Backgammon::new();
        game.match_state.player = Player::Zero;
        let board = game.to_string();
        assert!(board.contains("^|"));
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines[2], " +12-11-10--9--8--7-------6--5--4--3--2--1-+");
        assert_eq!(lines.len(), 15);
    }

    #[test]
    fn test_display_bar_checkers() {
        // one checker each on the bar and borne off, both sides
        let game = Backgammon::from_ids("4Dl4ACzwHDwAFg", STARTING_MATCH_ID).unwrap();
        let board = game.to_string();
        assert!(board.lines().any(|l| l.contains("| X |")));
        assert!(board.lines().any(|l| l.contains("| O |")));
    }
}
