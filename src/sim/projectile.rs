//! Projectile flight integration
//!
//! Semi-implicit Euler with wind as a constant horizontal acceleration and
//! gravity as a constant vertical acceleration. Screen coordinates: y grows
//! downward.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::sprite::Orientation;

/// Visible play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// A thrown projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: DVec2,
    pub vel: DVec2,
    pub gravity: f64,
    pub wind: f64,
    pub alive: bool,
    /// Seconds of flight so far
    pub elapsed: f64,
}

impl Projectile {
    /// Launch from (x, y) at `angle_deg` above the horizontal
    pub fn new(x: f64, y: f64, angle_deg: f64, velocity: f64, gravity: f64, wind: f64) -> Self {
        let angle = angle_deg.to_radians();
        Self {
            pos: DVec2::new(x, y),
            vel: DVec2::new(angle.cos() * velocity, -angle.sin() * velocity),
            gravity,
            wind,
            alive: true,
            elapsed: 0.0,
        }
    }

    /// Advance one tick. Exits left, right or below the bounds end the
    /// flight; leaving through the top does not.
    pub fn update(&mut self, dt: f64, bounds: Bounds) {
        if !self.alive {
            return;
        }

        self.elapsed += dt;

        self.vel.x += self.wind * dt;
        self.pos.x += self.vel.x * dt;

        self.pos.y += self.vel.y * dt;
        self.vel.y += self.gravity * dt;

        if self.pos.x < 0.0 || self.pos.x > bounds.width || self.pos.y > bounds.height {
            self.alive = false;
        }
    }

    /// True while above the top edge but horizontally inside the play area
    pub fn is_above_screen(&self, bounds: Bounds) -> bool {
        self.pos.y < 0.0 && self.pos.x >= 0.0 && self.pos.x <= bounds.width
    }

    /// Rotation index `floor(elapsed * 4 * rpm / 60) mod 4`
    pub fn orientation_index(&self, rpm: f64) -> usize {
        let states_per_second = 4.0 * rpm / 60.0;
        let step = (self.elapsed * states_per_second).floor();
        if !step.is_finite() || step < 0.0 {
            return 0;
        }
        (step as u64 % 4) as usize
    }

    /// Sprite orientation for the renderer
    pub fn orientation(&self, rpm: f64) -> Orientation {
        Orientation::from_index(self.orientation_index(rpm))
    }
}

/// Maximum samples produced by [`plot_trajectory`]
pub const MAX_TRAJECTORY_SAMPLES: usize = 4096;

/// Sampling interval of [`plot_trajectory`] in seconds
pub const TRAJECTORY_STEP: f64 = 0.1;

/// Closed-form aim preview
///
/// Samples `x = x0 + vx t + wind t²/2`, `y = y0 - (vy t - g t²/2)` every
/// 0.1s until the point leaves the screen sideways or drops below the
/// launch height.
pub fn plot_trajectory(
    start: DVec2,
    angle_deg: f64,
    velocity: f64,
    gravity: f64,
    wind: f64,
    screen_width: f64,
) -> Vec<DVec2> {
    let angle = angle_deg.to_radians();
    let vx = angle.cos() * velocity;
    let vy = angle.sin() * velocity;

    let mut points = Vec::new();
    for i in 0..MAX_TRAJECTORY_SAMPLES {
        let t = i as f64 * TRAJECTORY_STEP;
        let x = start.x + vx * t + 0.5 * wind * t * t;
        let y = start.y - (vy * t - 0.5 * gravity * t * t);
        if x < 0.0 || x > screen_width || y > start.y {
            break;
        }
        points.push(DVec2::new(x, y));
    }
    points
}
