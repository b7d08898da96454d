use vacuum_planner::world::World;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "make_world",
    about = "Generate a random vacuum world in the planner's text format.",
    version = "0.1"
)]
struct Cli {
    #[arg(long, help = "Number of grid rows", default_value_t = 5)]
    rows: usize,

    #[arg(long, help = "Number of grid columns", default_value_t = 7)]
    columns: usize,

    #[arg(long, help = "Probability that a cell is blocked", default_value_t = 0.15)]
    blocked: f64,

    #[arg(long, help = "Probability that an open cell is dirty", default_value_t = 0.15)]
    dirty: f64,

    #[arg(
        long,
        help = "Seed for the random number generator",
        default_value_t = 0
    )]
    seed: u64,

    #[arg(long, help = "Write the world here instead of stdout")]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let world = World::generate(cli.rows, cli.columns, cli.blocked, cli.dirty, &mut rng)?;
    let text = world.render();

    match cli.output {
        Some(path) => std::fs::write(&path, text)
            .with_context(|| format!("failed to write world file {path}"))?,
        None => print!("{text}"),
    }

    Ok(())
}
