//! Angle and power input
//!
//! Platform-neutral aim state. The frontend maps its key and pointer events
//! onto these calls; a release hands back the (angle, power) pair for
//! [`super::tick::do_throw`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ANGLE: f64 = 45.0;
pub const MIN_ANGLE: f64 = 10.0;
pub const MAX_ANGLE: f64 = 80.0;
pub const MAX_POWER: f64 = 100.0;
/// Power gained per second while charging
pub const CHARGE_RATE: f64 = 30.0;
/// Power per pixel of drag distance
pub const DRAG_POWER_SCALE: f64 = 0.5;

/// How the player aims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AimMode {
    /// Up/down nudges the angle, holding the throw key charges power
    #[default]
    Keyboard,
    /// Drag from a start point; direction is the angle, length the power
    Drag,
}

impl AimMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AimMode::Keyboard => "keyboard",
            AimMode::Drag => "drag",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "keyboard" => Some(AimMode::Keyboard),
            "drag" | "mouse" => Some(AimMode::Drag),
            _ => None,
        }
    }
}

/// Aim being built up by the active player
#[derive(Debug, Clone, PartialEq)]
pub struct AimController {
    pub mode: AimMode,
    pub angle: f64,
    pub power: f64,
    charging: bool,
    drag_start: Option<DVec2>,
    drag_current: Option<DVec2>,
}

impl Default for AimController {
    fn default() -> Self {
        Self::new(AimMode::Keyboard)
    }
}

impl AimController {
    pub fn new(mode: AimMode) -> Self {
        Self {
            mode,
            angle: DEFAULT_ANGLE,
            power: 0.0,
            charging: false,
            drag_start: None,
            drag_current: None,
        }
    }

    /// Switch input mode, dropping any gesture in progress
    pub fn set_mode(&mut self, mode: AimMode) {
        self.mode = mode;
        self.reset();
    }

    /// Nudge the angle by `delta` degrees (keyboard only)
    pub fn adjust_angle(&mut self, delta: f64) {
        if self.mode == AimMode::Keyboard {
            self.angle = (self.angle + delta).clamp(MIN_ANGLE, MAX_ANGLE);
        }
    }

    pub fn start_charge(&mut self) {
        if self.mode == AimMode::Keyboard {
            self.charging = true;
        }
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Stop charging and return the aim
    pub fn release_charge(&mut self) -> Option<(f64, f64)> {
        if !self.charging {
            return None;
        }
        Some(self.take())
    }

    pub fn start_drag(&mut self, pos: DVec2) {
        if self.mode == AimMode::Drag {
            self.drag_start = Some(pos);
            self.drag_current = Some(pos);
        }
    }

    pub fn move_drag(&mut self, pos: DVec2) {
        if self.drag_start.is_some() {
            self.drag_current = Some(pos);
        }
    }

    /// Finish the drag at `pos` and return the aim
    pub fn release_drag(&mut self, pos: DVec2) -> Option<(f64, f64)> {
        self.drag_start?;
        self.drag_current = Some(pos);
        self.apply_drag();
        Some(self.take())
    }

    /// Advance charging or live drag feedback
    pub fn update(&mut self, dt: f64) {
        match self.mode {
            AimMode::Keyboard if self.charging => {
                self.power = (self.power + dt * CHARGE_RATE).min(MAX_POWER);
            }
            AimMode::Drag => self.apply_drag(),
            _ => {}
        }
    }

    /// Clear power and any gesture; the angle is kept
    pub fn reset(&mut self) {
        self.power = 0.0;
        self.charging = false;
        self.drag_start = None;
        self.drag_current = None;
    }

    fn apply_drag(&mut self) {
        let (Some(start), Some(current)) = (self.drag_start, self.drag_current) else {
            return;
        };
        // Screen y grows downward; aim angles grow upward
        let dx = current.x - start.x;
        let dy = start.y - current.y;
        self.angle = dy.atan2(dx).to_degrees().clamp(MIN_ANGLE, MAX_ANGLE);
        self.power = (dx.hypot(dy) * DRAG_POWER_SCALE).min(MAX_POWER);
    }

    fn take(&mut self) -> (f64, f64) {
        let aim = (self.angle, self.power);
        self.reset();
        aim
    }
}
