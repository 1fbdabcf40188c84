use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use pacman_agents::config::AgentConfig;
use pacman_agents::game::Maze;
use pacman_agents::logging::setup_logging;
use pacman_agents::runner::MatchRunner;

#[derive(Parser, Debug)]
#[command(name = "pacman_agents", version, about)]
struct Config {
    /// Number of games to play
    #[arg(short = 'g', long, default_value_t = 10)]
    num_games: usize,

    /// Seed for every controller's RNG; random when absent
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with controller parameters
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Override the ghosts' MCTS simulation budget
    #[arg(short = 's', long)]
    num_simulations: Option<usize>,

    /// How far agents can see, in path steps; unlimited when absent
    #[arg(long)]
    sight_range: Option<u32>,

    /// Tick limit per game
    #[arg(long, default_value_t = 4000)]
    max_ticks: u32,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write rotated log files here instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Write Pac-Man's reward trace as CSV after the last game
    #[arg(long)]
    rewards_csv: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Config::parse();
    let _logger = setup_logging(&args.log_level, args.log_dir.as_deref())?;

    let mut config = match &args.config {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig::default(),
    };
    if let Some(sims) = args.num_simulations {
        config.ghost.mcts.num_simulations = sims;
        config.validate()?;
    }
    log::info!(
        "Starting {} games (ghost search {}, sight range {:?})",
        args.num_games,
        config.ghost.mcts.to_config_string(),
        args.sight_range
    );

    let maze = Arc::new(Maze::default_layout()?);
    let mut runner = MatchRunner::new(maze, &config, args.seed)
        .with_sight_range(args.sight_range)
        .with_max_ticks(args.max_ticks);
    let summaries = runner.play(args.num_games);

    if !summaries.is_empty() {
        let n = summaries.len() as f64;
        let mean_score = summaries.iter().map(|s| s.score as f64).sum::<f64>() / n;
        let best = summaries.iter().map(|s| s.score).max().unwrap_or(0);
        log::info!(
            "Mean score {:.1} over {} games, best {}, {} Q-values learned",
            mean_score,
            summaries.len(),
            best,
            runner.pacman().q_table().len()
        );
    }

    if let Some(path) = &args.rewards_csv {
        runner.pacman().rewards().write_csv(path)?;
        log::info!("Reward trace written to {}", path.display());
    }

    Ok(())
}
