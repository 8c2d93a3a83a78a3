use anyhow::{Error, Result};
use backgammon::Backgammon;
use log::info;
use std::env;

/// usage: backgammon [POSITION_ID[:MATCH_ID]] [MOVE...]
///
/// A move is written SOURCE/DESTINATION with 1-based point numbers,
/// e.g. `8/5`; `bar/20` enters from the bar and `3/off` bears off.
/// Moves must already be legal, no dice are checked here.
fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();

    let mut game = match args.first() {
        Some(ids) => {
            let (position_id, match_id) = ids
                .split_once(':')
                .unwrap_or((ids.as_str(), backgammon::STARTING_MATCH_ID));
            Backgammon::from_ids(position_id, match_id)?
        }
        None => Backgammon::new(),
    };

    let moves = args[args.len().min(1)..]
        .iter()
        .map(|m| parse_move(m))
        .collect::<Result<Vec<_>>>()?;
    if !moves.is_empty() {
        info!("applying {} move(s)", moves.len());
        game.play(&moves);
    }

    print!("{}", game);
    println!("{}", game.encode());
    Ok(())
}

fn parse_move(text: &str) -> Result<backgammon::game::Move> {
    let (source, destination) = text
        .split_once('/')
        .ok_or_else(|| Error::msg(format!("bad move '{}', expected SOURCE/DEST", text)))?;
    Ok((parse_end(source, "bar")?, parse_end(destination, "off")?))
}

fn parse_end(text: &str, keyword: &str) -> Result<Option<usize>> {
    if text.eq_ignore_ascii_case(keyword) {
        return Ok(None);
    }
    match text.parse::<usize>() {
        Ok(point) if (1..=24).contains(&point) => Ok(Some(point)),
        _ => Err(Error::msg(format!(
            "bad point '{}', expected 1-24 or '{}'",
            text, keyword
        ))),
    }
}
