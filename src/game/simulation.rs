//! Small reference implementation of [`GameState`] used to drive the
//! controllers headlessly (match runner, integration tests).
//!
//! The rules are a simplification of the arcade game: one step per tick for
//! every agent, no speed differences, no fruit.

use crate::game::game_state::{GameState, PathError};
use crate::game::maze::Maze;
use crate::game::moves::{Ghost, Move, NodeIndex};
use std::sync::Arc;

pub const PILL_SCORE: i64 = 10;
pub const POWER_PILL_SCORE: i64 = 50;
pub const GHOST_EAT_SCORE: i64 = 200;
pub const EDIBLE_TIME: u32 = 40;
pub const COMMON_LAIR_TIME: u32 = 10;
pub const STARTING_LIVES: u32 = 3;
pub const DEFAULT_MAX_TICKS: u32 = 4000;

/// Whose eyes the state is queried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observer {
    Full,
    Pacman,
    Ghost(Ghost),
}

#[derive(Debug, Clone, Copy)]
struct PacmanAgent {
    node: NodeIndex,
    last_move: Move,
}

#[derive(Debug, Clone, Copy)]
struct GhostAgent {
    node: NodeIndex,
    last_move: Move,
    edible_time: u32,
    lair_time: u32,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    maze: Arc<Maze>,
    observer: Observer,
    sight_range: Option<u32>,
    max_ticks: u32,

    level: u32,
    level_tick: u32,
    total_ticks: u32,
    score: i64,
    lives: u32,
    ghosts_eaten: u32,
    pills: Vec<bool>,
    power_pills: Vec<bool>,
    pacman: PacmanAgent,
    ghosts: [GhostAgent; 4],

    pacman_eaten: bool,
    ghost_eaten: [bool; 4],
    game_over: bool,
}

impl Simulation {
    pub fn new(maze: Arc<Maze>) -> Self {
        let pills = vec![true; maze.pills().len()];
        let power_pills = vec![true; maze.power_pills().len()];
        let mut simulation = Self {
            pacman: PacmanAgent {
                node: maze.pacman_start(),
                last_move: Move::Neutral,
            },
            ghosts: [GhostAgent {
                node: maze.lair(),
                last_move: Move::Neutral,
                edible_time: 0,
                lair_time: 0,
            }; 4],
            maze,
            observer: Observer::Full,
            sight_range: None,
            max_ticks: DEFAULT_MAX_TICKS,
            level: 0,
            level_tick: 0,
            total_ticks: 0,
            score: 0,
            lives: STARTING_LIVES,
            ghosts_eaten: 0,
            pills,
            power_pills,
            pacman_eaten: false,
            ghost_eaten: [false; 4],
            game_over: false,
        };
        simulation.reset_positions();
        simulation
    }

    /// Restricts what observers other than `Observer::Full` can see to
    /// nodes within `range` path steps. `None` means full observability.
    pub fn with_sight_range(mut self, range: Option<u32>) -> Self {
        self.sight_range = range;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// A copy of the current state seen through `observer`.
    pub fn view_for(&self, observer: Observer) -> Self {
        Self {
            observer,
            ..self.clone()
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    pub fn place_pacman(&mut self, node: NodeIndex, last_move: Move) {
        self.pacman = PacmanAgent { node, last_move };
    }

    pub fn place_ghost(&mut self, ghost: Ghost, node: NodeIndex, last_move: Move) {
        let agent = &mut self.ghosts[ghost.index()];
        agent.node = node;
        agent.last_move = last_move;
        agent.lair_time = 0;
    }

    pub fn set_ghost_edible_time(&mut self, ghost: Ghost, ticks: u32) {
        self.ghosts[ghost.index()].edible_time = ticks;
    }

    pub fn set_ghost_lair_time(&mut self, ghost: Ghost, ticks: u32) {
        let lair = self.maze.lair();
        let agent = &mut self.ghosts[ghost.index()];
        agent.lair_time = ticks;
        if ticks > 0 {
            agent.node = lair;
            agent.last_move = Move::Neutral;
        }
    }

    pub fn set_level_tick(&mut self, tick: u32) {
        self.level_tick = tick;
    }

    pub fn set_pill_available(&mut self, pill: usize, available: bool) {
        if let Some(slot) = self.pills.get_mut(pill) {
            *slot = available;
        }
    }

    pub fn set_power_pill_available(&mut self, pill: usize, available: bool) {
        if let Some(slot) = self.power_pills.get_mut(pill) {
            *slot = available;
        }
    }

    pub fn clear_pills(&mut self) {
        self.pills.iter_mut().for_each(|p| *p = false);
        self.power_pills.iter_mut().for_each(|p| *p = false);
    }

    fn reset_positions(&mut self) {
        self.pacman = PacmanAgent {
            node: self.maze.pacman_start(),
            last_move: Move::Neutral,
        };
        let lair = self.maze.lair();
        for (i, ghost) in self.ghosts.iter_mut().enumerate() {
            *ghost = GhostAgent {
                node: lair,
                last_move: Move::Neutral,
                edible_time: 0,
                lair_time: i as u32 * COMMON_LAIR_TIME,
            };
        }
    }

    fn within_sight(&self, from: NodeIndex, to: NodeIndex) -> bool {
        match self.sight_range {
            None => true,
            Some(range) => self
                .maze
                .distance(from, to)
                .map(|d| d <= range)
                .unwrap_or(false),
        }
    }

    fn observer_node(&self) -> Option<NodeIndex> {
        match self.observer {
            Observer::Full => None,
            Observer::Pacman => Some(self.pacman.node),
            Observer::Ghost(ghost) => Some(self.ghosts[ghost.index()].node),
        }
    }

    fn observes(&self, node: NodeIndex) -> bool {
        self.observer_node()
            .map(|from| self.within_sight(from, node))
            .unwrap_or(true)
    }

    fn step_pacman(&mut self, requested: Move) {
        let agent = self.pacman;
        let mv = if self.maze.neighbour(agent.node, requested).is_some() {
            requested
        } else {
            agent.last_move
        };
        if let Some(next) = self.maze.neighbour(agent.node, mv) {
            self.pacman = PacmanAgent {
                node: next,
                last_move: mv,
            };
        }

        let node = self.pacman.node;
        if let Some(i) = self.maze.pills().iter().position(|&p| p == node) {
            if self.pills[i] {
                self.pills[i] = false;
                self.score += PILL_SCORE;
            }
        }
        if let Some(i) = self.maze.power_pills().iter().position(|&p| p == node) {
            if self.power_pills[i] {
                self.power_pills[i] = false;
                self.score += POWER_PILL_SCORE;
                for ghost in self.ghosts.iter_mut().filter(|g| g.lair_time == 0) {
                    ghost.edible_time = EDIBLE_TIME;
                }
            }
        }
    }

    fn step_ghost(&mut self, index: usize, requested: Option<Move>) {
        let agent = self.ghosts[index];
        if agent.lair_time > 0 {
            self.ghosts[index].lair_time -= 1;
            return;
        }
        let legal = self.maze.possible_moves(agent.node, agent.last_move);
        let mv = match requested {
            Some(mv) if legal.contains(&mv) => mv,
            _ if legal.contains(&agent.last_move) => agent.last_move,
            _ => legal.first().copied().unwrap_or(Move::Neutral),
        };
        let ghost = &mut self.ghosts[index];
        if let Some(next) = self.maze.neighbour(agent.node, mv) {
            ghost.node = next;
            ghost.last_move = mv;
        }
        ghost.edible_time = ghost.edible_time.saturating_sub(1);
    }

    fn resolve_collisions(&mut self, pacman_before: NodeIndex, ghosts_before: [NodeIndex; 4]) {
        let lair = self.maze.lair();
        for i in 0..self.ghosts.len() {
            let ghost = self.ghosts[i];
            if ghost.lair_time > 0 {
                continue;
            }
            let met = ghost.node == self.pacman.node
                || (ghost.node == pacman_before && ghosts_before[i] == self.pacman.node);
            if !met {
                continue;
            }
            if ghost.edible_time > 0 {
                self.score += GHOST_EAT_SCORE;
                self.ghosts_eaten += 1;
                self.ghost_eaten[i] = true;
                self.ghosts[i] = GhostAgent {
                    node: lair,
                    last_move: Move::Neutral,
                    edible_time: 0,
                    lair_time: COMMON_LAIR_TIME,
                };
            } else {
                self.pacman_eaten = true;
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    self.game_over = true;
                } else {
                    self.reset_positions();
                }
                return;
            }
        }
    }
}

impl GameState for Simulation {
    fn current_tick(&self) -> u32 {
        self.level_tick
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn score(&self) -> i64 {
        self.score
    }

    fn lives_remaining(&self) -> u32 {
        self.lives
    }

    fn node_count(&self) -> usize {
        self.maze.node_count()
    }

    fn pacman_node(&self) -> Option<NodeIndex> {
        match self.observer {
            Observer::Ghost(_) if !self.observes(self.pacman.node) => None,
            _ => Some(self.pacman.node),
        }
    }

    fn pacman_last_move(&self) -> Move {
        self.pacman.last_move
    }

    fn ghost_node(&self, ghost: Ghost) -> Option<NodeIndex> {
        let node = self.ghosts[ghost.index()].node;
        match self.observer {
            Observer::Pacman if !self.observes(node) => None,
            _ => Some(node),
        }
    }

    fn ghost_last_move(&self, ghost: Ghost) -> Move {
        self.ghosts[ghost.index()].last_move
    }

    fn ghost_edible_time(&self, ghost: Ghost) -> u32 {
        self.ghosts[ghost.index()].edible_time
    }

    fn ghost_lair_time(&self, ghost: Ghost) -> u32 {
        self.ghosts[ghost.index()].lair_time
    }

    fn ghost_requires_action(&self, ghost: Ghost) -> bool {
        let agent = self.ghosts[ghost.index()];
        if self.game_over || agent.lair_time > 0 {
            return false;
        }
        agent.last_move == Move::Neutral
            || self.maze.neighbour(agent.node, agent.last_move).is_none()
            || self.maze.possible_moves(agent.node, agent.last_move).len() > 1
    }

    fn ghosts_eaten(&self) -> u32 {
        self.ghosts_eaten
    }

    fn pill_indices(&self) -> &[NodeIndex] {
        self.maze.pills()
    }

    fn power_pill_indices(&self) -> &[NodeIndex] {
        self.maze.power_pills()
    }

    fn is_pill_available(&self, pill: usize) -> Option<bool> {
        let node = *self.maze.pills().get(pill)?;
        if self.observes(node) {
            self.pills.get(pill).copied()
        } else {
            None
        }
    }

    fn is_power_pill_available(&self, pill: usize) -> Option<bool> {
        let node = *self.maze.power_pills().get(pill)?;
        if self.observes(node) {
            self.power_pills.get(pill).copied()
        } else {
            None
        }
    }

    fn number_of_pills(&self) -> usize {
        self.pills.len()
    }

    fn number_of_active_pills(&self) -> usize {
        self.pills.iter().filter(|&&p| p).count()
    }

    fn possible_moves(&self, node: NodeIndex, last_move: Move) -> Vec<Move> {
        self.maze.possible_moves(node, last_move)
    }

    fn neighbour(&self, node: NodeIndex, mv: Move) -> Option<NodeIndex> {
        self.maze.neighbour(node, mv)
    }

    fn shortest_path_distance(&self, from: NodeIndex, to: NodeIndex) -> Result<u32, PathError> {
        self.maze.distance(from, to)
    }

    fn next_move_towards(&self, from: NodeIndex, to: NodeIndex) -> Result<Move, PathError> {
        self.maze.next_move_towards(from, to)
    }

    fn next_move_away(&self, from: NodeIndex, to: NodeIndex) -> Result<Move, PathError> {
        self.maze.next_move_away(from, to)
    }

    fn approximate_next_move_away(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        last_move: Move,
    ) -> Result<Move, PathError> {
        self.maze.approximate_next_move_away(from, to, last_move)
    }

    fn advance(&mut self, pacman_move: Move, ghost_moves: &[(Ghost, Move)]) {
        self.pacman_eaten = false;
        self.ghost_eaten = [false; 4];
        if self.game_over {
            return;
        }
        self.total_ticks += 1;
        self.level_tick += 1;

        let pacman_before = self.pacman.node;
        let ghosts_before = self.ghosts.map(|g| g.node);

        self.step_pacman(pacman_move);
        for ghost in Ghost::ALL {
            let requested = ghost_moves
                .iter()
                .find(|(g, _)| *g == ghost)
                .map(|&(_, mv)| mv);
            self.step_ghost(ghost.index(), requested);
        }
        self.resolve_collisions(pacman_before, ghosts_before);

        let cleared = self.pills.iter().chain(self.power_pills.iter()).all(|&p| !p);
        if !self.game_over && cleared {
            self.level += 1;
            self.level_tick = 0;
            self.pills.iter_mut().for_each(|p| *p = true);
            self.power_pills.iter_mut().for_each(|p| *p = true);
            self.reset_positions();
        }
        if self.total_ticks >= self.max_ticks {
            self.game_over = true;
        }
    }

    fn was_pacman_eaten(&self) -> bool {
        self.pacman_eaten
    }

    fn was_ghost_eaten(&self, ghost: Ghost) -> bool {
        self.ghost_eaten[ghost.index()]
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Simulation {
        // 0 P, 1 ., 2 ., 3 ., 4 o, 5 G
        let maze = Maze::from_layout(&["########", "#P...oG#", "########"]).unwrap();
        Simulation::new(Arc::new(maze))
    }

    #[test]
    fn test_pacman_eats_pill() {
        let mut sim = corridor();
        sim.advance(Move::Right, &[]);
        assert_eq!(sim.pacman_node(), Some(1));
        assert_eq!(sim.score(), PILL_SCORE);
        assert_eq!(sim.number_of_active_pills(), 2);
        assert_eq!(sim.current_tick(), 1);
    }

    #[test]
    fn test_power_pill_makes_ghosts_edible_and_ghost_can_be_eaten() {
        let mut sim = corridor();
        sim.place_pacman(3, Move::Right);
        sim.place_ghost(Ghost::Blinky, 5, Move::Neutral);
        for ghost in [Ghost::Pinky, Ghost::Inky, Ghost::Sue] {
            sim.set_ghost_lair_time(ghost, 50);
        }
        sim.advance(Move::Right, &[(Ghost::Blinky, Move::Left)]);

        // Pac-Man steps onto the power pill while Blinky steps onto it too.
        assert!(sim.was_ghost_eaten(Ghost::Blinky));
        assert_eq!(sim.ghosts_eaten(), 1);
        assert_eq!(sim.score(), POWER_PILL_SCORE + GHOST_EAT_SCORE);
        assert!(!sim.was_pacman_eaten());
    }

    #[test]
    fn test_collision_with_dangerous_ghost_costs_a_life() {
        let mut sim = corridor();
        sim.place_pacman(2, Move::Right);
        sim.place_ghost(Ghost::Blinky, 3, Move::Left);
        for ghost in [Ghost::Pinky, Ghost::Inky, Ghost::Sue] {
            sim.set_ghost_lair_time(ghost, 50);
        }
        // They swap nodes: counts as a collision.
        sim.advance(Move::Right, &[(Ghost::Blinky, Move::Left)]);
        assert!(sim.was_pacman_eaten());
        assert_eq!(sim.lives_remaining(), STARTING_LIVES - 1);
        assert_eq!(sim.pacman_node(), Some(sim.maze().pacman_start()));
        assert!(!sim.is_game_over());
    }

    #[test]
    fn test_level_advances_when_pills_cleared() {
        let mut sim = corridor();
        sim.clear_pills();
        sim.set_pill_available(0, true);
        sim.advance(Move::Right, &[]);
        assert_eq!(sim.level(), 1);
        assert_eq!(sim.current_tick(), 0);
        assert_eq!(sim.number_of_active_pills(), 3);
    }

    #[test]
    fn test_partial_observability() {
        let mut sim = corridor().with_sight_range(Some(2));
        sim.place_ghost(Ghost::Blinky, 5, Move::Neutral);

        let ghost_view = sim.view_for(Observer::Ghost(Ghost::Blinky));
        assert_eq!(ghost_view.pacman_node(), None);
        assert_eq!(ghost_view.is_power_pill_available(0), Some(true));
        assert_eq!(ghost_view.is_pill_available(0), None);

        let pacman_view = sim.view_for(Observer::Pacman);
        assert_eq!(pacman_view.ghost_node(Ghost::Blinky), None);
        assert_eq!(pacman_view.is_pill_available(1), Some(true));
        assert_eq!(pacman_view.is_pill_available(2), None);

        sim.place_pacman(4, Move::Right);
        let ghost_view = sim.view_for(Observer::Ghost(Ghost::Blinky));
        assert_eq!(ghost_view.pacman_node(), Some(4));
    }

    #[test]
    fn test_game_over_at_tick_limit() {
        let mut sim = corridor().with_max_ticks(2);
        sim.advance(Move::Neutral, &[]);
        assert!(!sim.is_game_over());
        sim.advance(Move::Neutral, &[]);
        assert!(sim.is_game_over());
        assert!(!sim.ghost_requires_action(Ghost::Blinky));
    }
}
