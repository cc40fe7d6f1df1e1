use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use owo_colors::OwoColorize;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use maze::generator::generate;
use maze::record;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Generates a random maze and saves it as a record
#[derive(Parser, Debug)]
#[clap(long_version = maze::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    pub rows: usize,
    pub cols: usize,

    #[arg(short, long, env = "MAZE_FILE", default_value = "maze.csv")]
    pub output: PathBuf,

    /// Seed for a reproducible maze. Random if missing.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Don't print the maze
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.color.write_global();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if args.rows % 2 == 0 && args.cols % 2 == 0 {
        return Err(format!(
            "At least one of the dimensions must be odd, got {}x{}",
            args.rows, args.cols
        )
        .into());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Generating a {}x{} maze with seed {seed}", args.rows, args.cols);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let maze = generate(args.rows, args.cols, &mut rng)?;

    if !args.quiet {
        println!("{maze}");
    }
    record::save(&args.output, &maze)?;
    println!(
        "Saved {}x{} maze (seed {}) to {:?}",
        args.rows,
        args.cols,
        seed.cyan(),
        args.output.yellow()
    );

    Ok(())
}
