// This file is part of the chesscore library.
// Copyright (C) 2026 The chesscore developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Command line front end: perft counts, position inspection and random
//! self-play.

use std::{error::Error, time::Instant};

use chesscore::{
    game::{Game, Termination},
    perft,
    uci::UciMove,
    Chess, Color, Outcome, RandomPolicy,
};
use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Chess rules engine tools.
#[derive(Parser, Debug)]
#[command(name = "chesscore", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count leaf nodes of the legal move tree.
    Perft {
        /// Number of plies.
        depth: u32,

        /// Start from this position instead of the standard one.
        #[arg(long)]
        fen: Option<String>,

        /// Print the count below each root move.
        #[arg(long)]
        divide: bool,
    },

    /// Print a position with its status and legal moves.
    Show {
        #[arg(long)]
        fen: Option<String>,

        /// Moves to play first, in UCI notation.
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,
    },

    /// Play games between two random players.
    Selfplay {
        #[arg(long, default_value = "1")]
        games: u32,

        /// Seed for the random players (random if not given).
        #[arg(long)]
        seed: Option<u64>,

        /// Stop a game after this many plies.
        #[arg(long, default_value = "500")]
        max_plies: usize,
    },
}

fn load_position(fen: Option<&str>) -> Result<Chess, Box<dyn Error>> {
    Ok(match fen {
        Some(fen) => Chess::from_fen(fen)?,
        None => Chess::default(),
    })
}

fn run_perft(depth: u32, fen: Option<&str>, divide: bool) -> Result<(), Box<dyn Error>> {
    let pos = load_position(fen)?;
    let start = Instant::now();

    let nodes = if divide {
        let children = perft::divide(&pos, depth);
        for (m, nodes) in &children {
            println!("{m}: {nodes}");
        }
        children.iter().map(|(_, nodes)| nodes).sum()
    } else {
        perft(&pos, depth)
    };

    let elapsed = start.elapsed();
    println!("{nodes}");
    info!(
        "perft({depth}) = {nodes} in {:.3}s ({:.0} nps)",
        elapsed.as_secs_f64(),
        nodes as f64 / elapsed.as_secs_f64().max(1e-9)
    );
    Ok(())
}

fn run_show(fen: Option<&str>, moves: &[String]) -> Result<(), Box<dyn Error>> {
    let mut game = Game::from_position(load_position(fen)?);
    for uci in moves {
        let m = uci.parse::<UciMove>()?.to_move(game.position())?;
        game.play(m)?;
    }

    let pos = game.position();
    print!("{}", pos.board());
    println!();
    println!("fen:    {}", pos.to_fen());
    println!("status: {}", pos.status());
    let legals: Vec<String> = pos.legal_moves().iter().map(|m| m.to_string()).collect();
    println!("moves:  {} ({})", legals.join(" "), legals.len());
    Ok(())
}

#[derive(Debug, Default)]
struct MatchSummary {
    white_wins: u32,
    black_wins: u32,
    draws: u32,
    unfinished: u32,
    plies: usize,
}

impl MatchSummary {
    fn record(&mut self, termination: Termination, plies: usize) {
        match termination {
            Termination::Finished(Outcome::Decisive {
                winner: Color::White,
            }) => self.white_wins += 1,
            Termination::Finished(Outcome::Decisive {
                winner: Color::Black,
            }) => self.black_wins += 1,
            Termination::Finished(Outcome::Draw) => self.draws += 1,
            Termination::PlyLimit => self.unfinished += 1,
        }
        self.plies += plies;
    }

    fn games(&self) -> u32 {
        self.white_wins + self.black_wins + self.draws + self.unfinished
    }
}

fn run_selfplay(games: u32, seed: Option<u64>, max_plies: usize) -> Result<(), Box<dyn Error>> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("self-play with seed {seed}");

    let mut white = RandomPolicy::new(Xoshiro256PlusPlus::seed_from_u64(seed));
    let mut black = RandomPolicy::new(Xoshiro256PlusPlus::seed_from_u64(seed.wrapping_add(1)));

    let mut summary = MatchSummary::default();
    for index in 1..=games {
        let mut game = Game::new();
        let termination = game.play_out(&mut white, &mut black, max_plies)?;
        debug!("final position: {}", game.position().to_fen());
        println!("game {index}: {termination} after {} plies", game.ply());
        summary.record(termination, game.ply());
    }

    info!(
        "{} games: white {} / black {} / draws {} / unfinished {}, {:.1} plies on average",
        summary.games(),
        summary.white_wins,
        summary.black_wins,
        summary.draws,
        summary.unfinished,
        summary.plies as f64 / f64::from(summary.games().max(1))
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Perft { depth, fen, divide } => run_perft(depth, fen.as_deref(), divide),
        Command::Show { fen, moves } => run_show(fen.as_deref(), &moves),
        Command::Selfplay {
            games,
            seed,
            max_plies,
        } => run_selfplay(games, seed, max_plies),
    }
}
