//! Turn alternation and arm poses

use serde::{Deserialize, Serialize};

/// Whose throw is next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnState {
    #[default]
    Player0,
    Player1,
}

impl TurnState {
    pub fn index(self) -> usize {
        match self {
            TurnState::Player0 => 0,
            TurnState::Player1 => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            TurnState::Player0 => TurnState::Player1,
            TurnState::Player1 => TurnState::Player0,
        }
    }

    /// Hand the turn to the other player (once per throw)
    pub fn flip(&mut self) {
        *self = self.other();
    }

    /// Arm poses for both gorillas with `self` as the active thrower
    pub fn arm_poses(self) -> [ArmPose; 2] {
        match self {
            TurnState::Player0 => [ArmPose::LeftUp, ArmPose::ArmsDown],
            TurnState::Player1 => [ArmPose::ArmsDown, ArmPose::RightUp],
        }
    }
}

/// Gorilla arm pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArmPose {
    RightUp,
    LeftUp,
    #[default]
    ArmsDown,
}
