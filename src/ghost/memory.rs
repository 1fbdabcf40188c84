//! What a ghost remembers about Pac-Man's whereabouts.

use crate::game::messenger::{Message, MessageKind};
use crate::game::moves::NodeIndex;

/// Last known target position and the tick it was observed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMemory {
    pub last_known: NodeIndex,
    pub tick_observed: u32,
}

impl TargetMemory {
    pub fn new(last_known: NodeIndex, tick_observed: u32) -> Self {
        Self {
            last_known,
            tick_observed,
        }
    }

    /// Too old to act on at `now`. A sighting from the future (the level
    /// clock was reset) is stale as well.
    pub fn is_stale(&self, now: u32, tick_threshold: u32) -> bool {
        now < self.tick_observed || now - self.tick_observed >= tick_threshold
    }
}

/// Folds teammates' sightings into `memory`. A sighting is adopted only if
/// it is strictly newer than what is remembered and strictly older than
/// `now`, so the result is the newest such sighting and `tick_observed`
/// never decreases.
pub fn adopt_sightings(
    memory: Option<TargetMemory>,
    messages: &[Message],
    now: u32,
) -> Option<TargetMemory> {
    messages
        .iter()
        .filter(|m| m.kind == MessageKind::PacmanSeen)
        .fold(memory, |known, m| {
            let newer = known.map_or(true, |k| m.tick > k.tick_observed);
            if newer && m.tick < now {
                Some(TargetMemory::new(m.data, m.tick))
            } else {
                known
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::moves::Ghost;

    fn seen(node: NodeIndex, tick: u32) -> Message {
        Message::pacman_seen(Ghost::Pinky, node, tick)
    }

    #[test]
    fn test_staleness() {
        let memory = TargetMemory::new(4, 10);
        assert!(!memory.is_stale(10, 5));
        assert!(!memory.is_stale(14, 5));
        assert!(memory.is_stale(15, 5));
        assert!(memory.is_stale(3, 5));
    }

    #[test]
    fn test_adopts_newest_valid_sighting_regardless_of_order() {
        let messages = [seen(1, 12), seen(2, 17), seen(3, 14)];
        let adopted = adopt_sightings(None, &messages, 20);
        assert_eq!(adopted, Some(TargetMemory::new(2, 17)));
    }

    #[test]
    fn test_ignores_old_current_and_future_sightings() {
        let memory = Some(TargetMemory::new(9, 15));
        let messages = [seen(1, 10), seen(2, 15), seen(3, 20), seen(4, 25)];
        assert_eq!(adopt_sightings(memory, &messages, 20), memory);
    }

    #[test]
    fn test_adoption_never_decreases_tick() {
        let mut memory = None;
        let ticks = [5u32, 3, 9, 9, 2, 11, 30, 7, 12];
        let mut last_tick = 0;
        for (i, &tick) in ticks.iter().enumerate() {
            memory = adopt_sightings(memory, &[seen(i, tick)], 20);
            if let Some(m) = memory {
                assert!(m.tick_observed >= last_tick);
                assert!(m.tick_observed < 20);
                last_tick = m.tick_observed;
            }
        }
        assert_eq!(memory, Some(TargetMemory::new(8, 12)));
    }
}
