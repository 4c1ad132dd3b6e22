mod board;
mod game;
mod human;
mod minimax;
mod render;
mod series;
mod strategy;

use std::num::NonZeroUsize;

use anyhow::{bail, Result};

use crate::board::Symbol;
use crate::game::{Game, Player};
use crate::human::{Console, Human, Input};
use crate::minimax::Minimax;
use crate::render::{DisplayConfig, TextRenderer};
use crate::series::play_series;
use crate::strategy::{GreedyAi, RandomAi};

/// Maps a setup answer to a player. A depth limit must be at least one ply,
/// otherwise the search never proposes a move.
fn parse_player(choice: &str, symbol: Symbol) -> Option<Player> {
    let player = match choice.trim().to_lowercase().as_str() {
        "human" | "h" => Player::new(symbol, Human::new(symbol, Console)),
        "random" | "r" => Player::new(symbol, RandomAi::new()),
        "greedy" | "g" => Player::new(symbol, GreedyAi::new(symbol)),
        "minimax" | "m" => Player::new(symbol, Minimax::new(symbol)),
        other => {
            let depth = other.strip_prefix("minimax:")?.parse::<NonZeroUsize>().ok()?;
            Player::new(symbol, Minimax::with_depth_limit(symbol, depth))
        }
    };
    Some(player)
}

/// Asks which strategy plays `symbol` until a known one is named.
fn choose_player(console: &mut Console, symbol: Symbol) -> Result<Player> {
    let prompt = format!(
        "Who plays '{}'? [human, random, greedy, minimax, minimax:<depth>]: ",
        symbol
    );
    loop {
        let Some(line) = console.read_line(&prompt)? else {
            bail!("Input closed during setup");
        };
        match parse_player(&line, symbol) {
            Some(player) => return Ok(player),
            None => console.notify("Unknown player. Try again.")?,
        }
    }
}

fn choose_games(console: &mut Console) -> Result<u32> {
    loop {
        let Some(line) = console.read_line("How many games to play? ")? else {
            bail!("Input closed during setup");
        };
        match line.trim().parse::<u32>() {
            Ok(games) if games > 0 => return Ok(games),
            _ => console.notify("Please enter a positive number.")?,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut console = Console;
    let x = choose_player(&mut console, Symbol::X)?;
    let o = choose_player(&mut console, Symbol::O)?;
    let interactive = x.strategy.is_human() || o.strategy.is_human();
    let games = choose_games(&mut console)?;

    let mut game = Game::new([x, o])?;
    // AI-only series print just the summary.
    let config = DisplayConfig {
        show: interactive || games == 1,
    };
    let mut renderer = TextRenderer::new(std::io::stdout(), config);

    if games == 1 {
        game.play(&mut renderer)?;
    } else {
        let tally = play_series(&mut game, &mut renderer, games)?;
        println!("\n{}", tally);
    }

    Ok(())
}
