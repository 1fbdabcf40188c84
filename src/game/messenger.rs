//! Message channel the ghosts use to share sightings of Pac-Man.

use crate::game::moves::{Ghost, NodeIndex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    PacmanSeen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Ghost,
    /// `None` broadcasts to every other ghost.
    pub recipient: Option<Ghost>,
    pub kind: MessageKind,
    pub data: NodeIndex,
    pub tick: u32,
}

impl Message {
    pub fn pacman_seen(sender: Ghost, node: NodeIndex, tick: u32) -> Self {
        Self {
            sender,
            recipient: None,
            kind: MessageKind::PacmanSeen,
            data: node,
            tick,
        }
    }

    fn is_for(&self, receiver: Ghost) -> bool {
        match self.recipient {
            Some(recipient) => recipient == receiver,
            None => self.sender != receiver,
        }
    }
}

pub trait Messenger {
    fn publish(&mut self, message: Message);
    fn messages_for(&self, receiver: Ghost) -> Vec<Message>;
}

/// In-memory message board shared by a ghost team for one game.
#[derive(Debug, Default, Clone)]
pub struct MessageBoard {
    messages: Vec<Message>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Drops messages stamped before `oldest` or after `newest`. Sightings
    /// are only adoptable on a later tick, so a team calls this with the
    /// previous tick as `oldest` before its members read the board.
    pub fn retain_between(&mut self, oldest: u32, newest: u32) {
        self.messages.retain(|m| (oldest..=newest).contains(&m.tick));
    }
}

impl Messenger for MessageBoard {
    fn publish(&mut self, message: Message) {
        self.messages.push(message);
    }

    fn messages_for(&self, receiver: Ghost) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.is_for(receiver))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_skips_sender() {
        let mut board = MessageBoard::new();
        board.publish(Message::pacman_seen(Ghost::Blinky, 12, 40));

        assert!(board.messages_for(Ghost::Blinky).is_empty());
        for ghost in [Ghost::Pinky, Ghost::Inky, Ghost::Sue] {
            let received = board.messages_for(ghost);
            assert_eq!(received.len(), 1);
            assert_eq!(received[0].data, 12);
            assert_eq!(received[0].tick, 40);
        }
    }

    #[test]
    fn test_direct_message_reaches_only_recipient() {
        let mut board = MessageBoard::new();
        board.publish(Message {
            recipient: Some(Ghost::Sue),
            ..Message::pacman_seen(Ghost::Inky, 3, 7)
        });

        assert_eq!(board.messages_for(Ghost::Sue).len(), 1);
        assert!(board.messages_for(Ghost::Pinky).is_empty());
        assert!(board.messages_for(Ghost::Blinky).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut board = MessageBoard::new();
        board.publish(Message::pacman_seen(Ghost::Inky, 3, 7));
        assert_eq!(board.len(), 1);
        board.clear();
        assert!(board.is_empty());
    }

    #[test]
    fn test_retain_between_keeps_previous_tick() {
        let mut board = MessageBoard::new();
        for tick in [10, 11, 12, 40] {
            board.publish(Message::pacman_seen(Ghost::Blinky, tick as NodeIndex, tick));
        }
        board.retain_between(11, 12);
        let ticks: Vec<u32> = board.messages_for(Ghost::Pinky).iter().map(|m| m.tick).collect();
        assert_eq!(ticks, vec![11, 12]);

        // A new level restarts the clock: everything stamped later goes.
        board.retain_between(0, 0);
        assert!(board.is_empty());
    }
}
