//! Headless matches: four communicating ghosts against the learning Pac-Man.

use crate::config::AgentConfig;
use crate::game::game_state::GameState;
use crate::game::maze::Maze;
use crate::game::messenger::MessageBoard;
use crate::game::moves::Ghost;
use crate::game::simulation::{Observer, Simulation, DEFAULT_MAX_TICKS};
use crate::ghost::GhostSearchPolicy;
use crate::pacman::PacmanLearningPolicy;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub score: i64,
    pub level: u32,
    pub ticks: u32,
    pub lives_remaining: u32,
    pub ghosts_eaten: u32,
}

impl MatchSummary {
    fn from_game(game: &Simulation) -> Self {
        Self {
            score: game.score(),
            level: game.level(),
            ticks: game.total_ticks(),
            lives_remaining: game.lives_remaining(),
            ghosts_eaten: game.ghosts_eaten(),
        }
    }
}

pub struct MatchRunner {
    maze: Arc<Maze>,
    sight_range: Option<u32>,
    max_ticks: u32,
    ghosts: Vec<GhostSearchPolicy>,
    pacman: PacmanLearningPolicy,
    board: MessageBoard,
}

impl MatchRunner {
    /// With a seed, every controller gets its own deterministic RNG stream.
    pub fn new(maze: Arc<Maze>, config: &AgentConfig, seed: Option<u64>) -> Self {
        let ghosts = Ghost::ALL
            .iter()
            .map(|&ghost| match seed {
                Some(s) => GhostSearchPolicy::seeded(
                    ghost,
                    config.ghost.clone(),
                    s.wrapping_add(ghost.index() as u64 + 1),
                ),
                None => GhostSearchPolicy::new(ghost, config.ghost.clone()),
            })
            .collect();
        let pacman = match seed {
            Some(s) => PacmanLearningPolicy::seeded(config.pacman.clone(), s),
            None => PacmanLearningPolicy::new(config.pacman.clone()),
        };
        Self {
            maze,
            sight_range: None,
            max_ticks: DEFAULT_MAX_TICKS,
            ghosts,
            pacman,
            board: MessageBoard::new(),
        }
    }

    pub fn with_sight_range(mut self, range: Option<u32>) -> Self {
        self.sight_range = range;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn pacman(&self) -> &PacmanLearningPolicy {
        &self.pacman
    }

    pub fn ghost(&self, ghost: Ghost) -> &GhostSearchPolicy {
        &self.ghosts[ghost.index()]
    }

    /// A fresh game with this runner's maze, sight range and tick limit.
    pub fn new_game(&self) -> Simulation {
        Simulation::new(Arc::clone(&self.maze))
            .with_sight_range(self.sight_range)
            .with_max_ticks(self.max_ticks)
    }

    /// One tick: every agent decides on its own view, then the game advances.
    ///
    /// Sightings published this tick stay on the board until the ghosts have
    /// read them on the next one.
    pub fn play_tick(&mut self, game: &mut Simulation) {
        let now = game.current_tick();
        self.board.retain_between(now.saturating_sub(1), now);

        let pacman_move = self.pacman.decide(&game.view_for(Observer::Pacman));

        let mut ghost_moves = Vec::with_capacity(self.ghosts.len());
        for policy in &mut self.ghosts {
            let view = game.view_for(Observer::Ghost(policy.ghost()));
            if let Some(mv) = policy.decide(&view, Some(&mut self.board)) {
                ghost_moves.push((policy.ghost(), mv));
            }
        }

        game.advance(pacman_move, &ghost_moves);
        if game.was_pacman_eaten() {
            log::debug!(
                "Pac-Man caught at tick {}, {} lives left",
                game.total_ticks(),
                game.lives_remaining()
            );
        }
    }

    /// Plays one game to the end. Pac-Man keeps what it learned.
    pub fn play_game(&mut self) -> MatchSummary {
        let mut game = self.new_game();
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
        self.board.clear();

        while !game.is_game_over() {
            self.play_tick(&mut game);
        }

        self.pacman.end_episode();
        MatchSummary::from_game(&game)
    }

    pub fn play(&mut self, games: usize) -> Vec<MatchSummary> {
        (0..games)
            .map(|i| {
                let summary = self.play_game();
                log::info!(
                    "Game {}/{}: score {}, level {}, {} ticks, {} lives left, {} ghosts eaten",
                    i + 1,
                    games,
                    summary.score,
                    summary.level,
                    summary.ticks,
                    summary.lives_remaining,
                    summary.ghosts_eaten
                );
                summary
            })
            .collect()
    }
}
