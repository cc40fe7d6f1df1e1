use std::io::BufRead;
use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use owo_colors::OwoColorize;
use thousands::Separable;

use maze::algorithms::Algorithm;
use maze::algorithms::astar::AStarSearch;
use maze::algorithms::dfs::DepthFirstSearch;
use maze::path::Listing;
use maze::record;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Loads a maze record and solves it
#[derive(Parser, Debug)]
#[clap(long_version = maze::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, env = "MAZE_FILE", default_value = "maze.csv")]
    pub input: PathBuf,

    /// Asked for interactively if missing
    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Print search statistics after solving
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

/// Lists the algorithms and reads lines until one names an algorithm.
fn ask_algorithm() -> Result<Algorithm, Box<dyn std::error::Error>> {
    println!("Available algorithms:");
    for a in Algorithm::ALL {
        println!("  - {}", a.bold());
    }

    for line in std::io::stdin().lock().lines() {
        match line?.parse::<Algorithm>() {
            Ok(a) => return Ok(a),
            Err(e) => println!("{}", e.red()),
        }
    }
    Err("No algorithm chosen".into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.color.write_global();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let maze = record::load(&args.input)?;
    let algorithm = match args.algorithm {
        Some(a) => a,
        None => ask_algorithm()?,
    };
    log::info!("Solving {:?} with {algorithm}", args.input);

    let path = match algorithm {
        Algorithm::Dfs => {
            let mut search = DepthFirstSearch::new(&maze);
            let path = search.find_path();
            if args.stats {
                println!("DepthFirstSearch Stats:");
                println!("  - Visited cells: {}", search.visited().separate_with_commas());
            }
            path
        }
        Algorithm::AStar => {
            let mut search = AStarSearch::new(&maze);
            let path = search.find_path();
            if args.stats {
                search.write_stats(anstream::stdout())?;
            }
            path
        }
    };
    if path.is_empty() {
        println!("{}", "no path found".red());
    } else {
        println!("{}", Listing(&path));
    }

    Ok(())
}
