mod config;
mod cube;
mod error;
mod r#move;
mod solver;

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

mod prelude;
use prelude::*;

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Finds a move sequence that solves a scrambled cube
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file: six lines of face colours, or with --layers one
    /// concatenated facelet stream
    file: PathBuf,

    /// Read a facelet stream and twist rows, columns and sides
    #[arg(long)]
    layers: bool,

    /// Use iterative deepening instead of best-first search
    #[arg(long)]
    ida: bool,

    /// Depth of the generated heuristic table for iterative deepening
    #[arg(long, default_value_t = 4)]
    table_depth: u32,

    /// Largest cost threshold iterative deepening may reach
    #[arg(long, default_value_t = SearchLimits::default().max_threshold)]
    max_threshold: u32,

    /// Give up after generating this many states
    #[arg(long)]
    node_limit: Option<u64>,

    /// Log more; can be repeated
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    simple_logger::SimpleLogger::new().with_level(level).init()?;

    // Bad input ends this solve only; it is reported, not propagated.
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        println!("Error: {}", e);
    }

    Ok(())
}

fn run(args: &Args) -> Result<(), Error> {
    let cube = match args.layers {
        true => config::load_stream(&args.file)?,
        false => config::load_faces(&args.file)?,
    };
    let size = cube.size();
    print!("{}", cube);

    // Face configurations must pass the colour count check before any search.
    let cube = match args.layers {
        true => cube,
        false => cube.validated()?,
    };

    let limits = SearchLimits {
        max_threshold: args.max_threshold,
        node_limit: args.node_limit,
    };
    let move_set = match args.layers {
        true => MoveSet::LayerTwists,
        false => MoveSet::FaceTurns,
    };
    let moves = move_set.moves(size);

    let outcome = if args.ida || args.layers {
        let table_root = cube
            .center_goal()
            .or_else(|| cube.palette_goal())
            .unwrap_or_else(|| Cube::solved(size));
        let table = HeuristicTable::generate(&table_root, &moves, args.table_depth)?;
        IdaStar::new(moves, table).with_limits(limits).solve(&cube)?
    } else {
        BestFirst::new(moves, ZeroHeuristic, Goal::for_cube(&cube))
            .with_limits(limits)
            .solve(&cube)?
    };

    let path = outcome.into_result()?;
    println!("Solution found!");
    println!("Steps: {}", path.len());
    println!("Sequence of moves: {}", format_path(&path, size));
    Ok(())
}
