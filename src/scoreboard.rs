//! Match win tally
//!
//! Counts round wins per player; serialized into the driver's summary log.

use serde::{Deserialize, Serialize};

/// Per-match scoreboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Rounds won by player 0 and player 1
    pub wins: [u32; 2],
    /// Rounds finished, including abandoned ones
    pub rounds_played: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a round win to `player` (0 or 1)
    pub fn record_win(&mut self, player: usize) {
        if let Some(wins) = self.wins.get_mut(player) {
            *wins += 1;
            self.rounds_played += 1;
        } else {
            log::warn!("Ignoring win for unknown player {}", player);
        }
    }

    /// Count a round that ended without a winner
    pub fn record_draw(&mut self) {
        self.rounds_played += 1;
    }

    /// Player with more wins, `None` when tied
    pub fn leader(&self) -> Option<usize> {
        match self.wins[0].cmp(&self.wins[1]) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rounds_played == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_leader() {
        let mut board = Scoreboard::new();
        assert!(board.is_empty());
        assert_eq!(board.leader(), None);

        board.record_win(1);
        assert_eq!(board.leader(), Some(1));
        board.record_win(0);
        assert_eq!(board.leader(), None);
        board.record_win(0);
        assert_eq!(board.leader(), Some(0));
        assert_eq!(board.wins, [2, 1]);
        assert_eq!(board.rounds_played, 3);
    }

    #[test]
    fn test_draw_and_unknown_player() {
        let mut board = Scoreboard::new();
        board.record_draw();
        board.record_win(5);
        assert_eq!(board.wins, [0, 0]);
        assert_eq!(board.rounds_played, 1);
    }

    #[test]
    fn test_serializes() {
        let mut board = Scoreboard::new();
        board.record_win(0);
        let json = board.to_json().unwrap();
        assert_eq!(json, r#"{"wins":[1,0],"rounds_played":1}"#);
        let back: Scoreboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
