//! Communicating ghost driven by Monte Carlo Tree Search.
//!
//! Per tick the ghost
//! 1. refreshes its memory of Pac-Man (own sighting, broadcast to the team,
//!    or the newest usable teammate sighting),
//! 2. random-walks when the target is unknown,
//! 3. backs away when it is edible or Pac-Man is close to a power pill,
//! 4. otherwise searches for a pursuit move.

use crate::config::GhostConfig;
use crate::game::game_state::{GameState, PathError};
use crate::game::messenger::{Message, Messenger};
use crate::game::moves::{Ghost, Move, NodeIndex};
use crate::ghost::memory::{adopt_sightings, TargetMemory};
use crate::mcts::algorithm::MonteCarloSearch;
use crate::mcts::rollout::RandomRollout;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ticks at the start of a level during which old information is dropped.
const LEVEL_START_TICKS: u32 = 2;

pub struct GhostSearchPolicy<R: Rng = StdRng> {
    ghost: Ghost,
    config: GhostConfig,
    memory: Option<TargetMemory>,
    rng: R,
}

impl GhostSearchPolicy<StdRng> {
    pub fn new(ghost: Ghost, config: GhostConfig) -> Self {
        Self::with_rng(ghost, config, StdRng::from_os_rng())
    }

    pub fn seeded(ghost: Ghost, config: GhostConfig, seed: u64) -> Self {
        Self::with_rng(ghost, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GhostSearchPolicy<R> {
    pub fn with_rng(ghost: Ghost, config: GhostConfig, rng: R) -> Self {
        Self {
            ghost,
            config,
            memory: None,
            rng,
        }
    }

    pub fn ghost(&self) -> Ghost {
        self.ghost
    }

    pub fn config(&self) -> &GhostConfig {
        &self.config
    }

    pub fn memory(&self) -> Option<TargetMemory> {
        self.memory
    }

    /// Forget the target, e.g. between games.
    pub fn reset(&mut self) {
        self.memory = None;
    }

    /// Chooses this tick's move. `None` means no decision: the ghost does
    /// not need an action, has no legal move, or path planning failed.
    pub fn decide<G: GameState>(
        &mut self,
        game: &G,
        messenger: Option<&mut dyn Messenger>,
    ) -> Option<Move> {
        self.refresh_memory(game, messenger);

        if !game.ghost_requires_action(self.ghost) {
            return None;
        }
        let ghost_node = game.ghost_node(self.ghost)?;
        let last_move = game.ghost_last_move(self.ghost);

        let Some(target) = self.memory.map(|m| m.last_known) else {
            let choice = game
                .possible_moves(ghost_node, last_move)
                .choose(&mut self.rng)
                .copied();
            log::trace!("{:?} has no target, wandering {:?}", self.ghost, choice);
            return choice;
        };

        match self.pursue(game, ghost_node, target, last_move) {
            Ok(mv) => Some(mv),
            Err(e) => {
                log::warn!(
                    "{:?} skipped its move (ghost at {}, target at {}): {}",
                    self.ghost,
                    ghost_node,
                    target,
                    e
                );
                None
            }
        }
    }

    fn refresh_memory<G: GameState>(&mut self, game: &G, messenger: Option<&mut dyn Messenger>) {
        let now = game.current_tick();
        let stale = self
            .memory
            .is_some_and(|m| m.is_stale(now, self.config.tick_threshold));
        if now <= LEVEL_START_TICKS || stale {
            self.memory = None;
        }

        match (game.pacman_node(), messenger) {
            (Some(node), messenger) => {
                self.memory = Some(TargetMemory::new(node, now));
                if let Some(messenger) = messenger {
                    messenger.publish(Message::pacman_seen(self.ghost, node, now));
                }
            }
            (None, Some(messenger)) => {
                let messages = messenger.messages_for(self.ghost);
                self.memory = adopt_sightings(self.memory, &messages, now);
            }
            (None, None) => {}
        }
    }

    fn pursue<G: GameState>(
        &mut self,
        game: &G,
        ghost_node: NodeIndex,
        target: NodeIndex,
        last_move: Move,
    ) -> Result<Move, PathError> {
        let distance = game.shortest_path_distance(ghost_node, target)?;

        if game.ghost_edible_time(self.ghost) > 0 || self.target_near_power_pill(game, target)? {
            let mv = game.approximate_next_move_away(ghost_node, target, last_move)?;
            log::trace!("{:?} retreating {:?} from {} steps", self.ghost, mv, distance);
            return Ok(mv);
        }

        let mut rollout = RandomRollout::new(self.config.mcts.rollout_depth, &mut self.rng);
        let outcome = MonteCarloSearch::new(&self.config.mcts).search(
            game,
            self.ghost,
            ghost_node,
            target,
            &mut rollout,
        );
        log::trace!(
            "{:?} chasing {:?} at {} steps, visits {:?}",
            self.ghost,
            outcome.best_move,
            distance,
            outcome.root_visits
        );
        Ok(outcome.best_move)
    }

    /// Unobservable power pills are skipped.
    fn target_near_power_pill<G: GameState>(
        &self,
        game: &G,
        target: NodeIndex,
    ) -> Result<bool, PathError> {
        for (i, &pill) in game.power_pill_indices().iter().enumerate() {
            if game.is_power_pill_available(i) != Some(true) {
                continue;
            }
            if game.shortest_path_distance(pill, target)? < self.config.pill_proximity {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
