//! Named hit targets and first-match collision resolution
//!
//! Targets are checked in list order and the first region containing the
//! point wins. Callers put transient hazards (sun, gorillas) ahead of the
//! broad skyline entries.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::building::Building;
use super::projectile::Bounds;

pub const TARGET_SUN: &str = "sun";
pub const TARGET_BUILDING: &str = "building";
pub const TARGET_GROUND: &str = "ground";
pub const TARGET_GORILLAS: [&str; 2] = ["gorilla0", "gorilla1"];

/// Shape of a hit target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitRegion {
    /// Half-open rectangle `[x, x + w) × [y, y + h)`
    Rect { x: f64, y: f64, w: f64, h: f64 },
    /// Closed disc
    Circle { center: DVec2, radius: f64 },
}

impl HitRegion {
    pub fn contains(&self, p: DVec2) -> bool {
        match *self {
            HitRegion::Rect { x, y, w, h } => p.x >= x && p.x < x + w && p.y >= y && p.y < y + h,
            HitRegion::Circle { center, radius } => p.distance_squared(center) <= radius * radius,
        }
    }
}

/// A named region checked against the projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitTarget {
    pub name: String,
    pub region: HitRegion,
}

impl HitTarget {
    pub fn rect(name: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            name: name.into(),
            region: HitRegion::Rect { x, y, w, h },
        }
    }

    pub fn circle(name: impl Into<String>, center: DVec2, radius: f64) -> Self {
        Self {
            name: name.into(),
            region: HitRegion::Circle { center, radius },
        }
    }

    /// Building footprint as a `building` target
    pub fn building(building: &Building) -> Self {
        Self::rect(
            TARGET_BUILDING,
            f64::from(building.x),
            f64::from(building.top_y),
            f64::from(building.width),
            f64::from(building.height),
        )
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome<'a> {
    /// First matching target, with its position in the list
    Hit { index: usize, name: &'a str },
    /// Outside the play area and no target matched
    Boundary,
    /// Nothing hit
    Miss,
}

impl CollisionOutcome<'_> {
    /// Legacy outcome label: the target name, `"boundary"` or `"none"`
    pub fn as_str(&self) -> &str {
        match self {
            CollisionOutcome::Hit { name, .. } => name,
            CollisionOutcome::Boundary => "boundary",
            CollisionOutcome::Miss => "none",
        }
    }
}

/// Classify `point` against `targets` (first match wins)
pub fn check<'a>(point: DVec2, targets: &'a [HitTarget], bounds: Bounds) -> CollisionOutcome<'a> {
    if let Some((index, target)) = targets
        .iter()
        .enumerate()
        .find(|(_, t)| t.region.contains(point))
    {
        return CollisionOutcome::Hit {
            index,
            name: &target.name,
        };
    }

    if bounds.contains(point) {
        CollisionOutcome::Miss
    } else {
        CollisionOutcome::Boundary
    }
}
