//! Throw launch and per-frame simulation tick
//!
//! `do_throw` turns an aim into a live banana; `tick` advances it, resolves
//! what it touched and applies the consequences to the round.

use glam::DVec2;

use super::collision::{self, CollisionOutcome, TARGET_BUILDING, TARGET_GORILLAS, TARGET_GROUND, TARGET_SUN};
use super::destruction::{Damage, apply_impact};
use super::projectile::Projectile;
use super::rng::LegacyRandom;
use super::state::{GamePhase, GameState};
use super::turn::TurnState;
use crate::consts::*;
use crate::settings::Settings;
use crate::{kmph_to_pixels_per_sec, legacy_floor_div, meters_to_pixels};

/// Upper bound on ticks spent resolving one throw in [`resolve_throw`]
pub const MAX_FLIGHT_TICKS: u32 = 60 * 60;

/// Why a throw was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowRejected {
    /// A banana is still in the air
    Airborne,
    /// Released without charging past the minimum power
    NoPower,
    /// The round already has a winner
    RoundOver,
}

impl std::fmt::Display for ThrowRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThrowRejected::Airborne => write!(f, "A banana is already in flight"),
            ThrowRejected::NoPower => write!(f, "Throw power must exceed {}", MIN_THROW_POWER),
            ThrowRejected::RoundOver => write!(f, "The round is over"),
        }
    }
}

impl std::error::Error for ThrowRejected {}

/// Final throw parameters after jitter, scaling and mirroring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowParams {
    pub angle_deg: f64,
    /// Signed launch power (km/h); negative for the mirrored player
    pub power: f64,
    /// Wind for this throw (m/s²)
    pub wind_mps2: f64,
}

/// A launched throw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub thrower: usize,
    pub origin: DVec2,
    pub params: ThrowParams,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// Banana passed through the sun and keeps flying
    SunHit { at: DVec2 },
    /// A gorilla was hit; the other player takes the round
    GorillaHit {
        at: DVec2,
        victim: usize,
        winner: usize,
    },
    /// A building was struck and carved
    BuildingHit { at: DVec2, damage: Vec<Damage> },
    /// Banana landed on the ground strip
    GroundHit { at: DVec2 },
    /// Banana left through a side or the bottom
    OffScreen { at: DVec2 },
}

impl TickEvent {
    /// Banana position when the event fired
    pub fn at(&self) -> DVec2 {
        match *self {
            TickEvent::SunHit { at }
            | TickEvent::GorillaHit { at, .. }
            | TickEvent::BuildingHit { at, .. }
            | TickEvent::GroundHit { at }
            | TickEvent::OffScreen { at } => at,
        }
    }

    /// True when the event ends the throw
    pub fn ends_throw(&self) -> bool {
        !matches!(self, TickEvent::SunHit { .. })
    }

    /// Events that draw an explosion
    pub fn explodes(&self) -> bool {
        matches!(
            self,
            TickEvent::GorillaHit { .. } | TickEvent::BuildingHit { .. } | TickEvent::GroundHit { .. }
        )
    }
}

/// Apply jitter, the legacy power rule, mirroring and a wind draw
///
/// Draw order: angle jitter, power jitter, wind.
pub fn throw_params(
    angle_deg: f64,
    power: f64,
    thrower: TurnState,
    settings: &Settings,
    rng: &mut impl LegacyRandom,
) -> ThrowParams {
    let angle = angle_deg + rng.uniform(-settings.angle_jitter_deg, settings.angle_jitter_deg);
    let mut power = 15.0
        + legacy_floor_div(35.0 * power, 100.0)
        + rng.uniform(-settings.power_jitter, settings.power_jitter);

    let factor = settings.screen_width / REFERENCE_WIDTH;
    if factor != 0 {
        power = (power * f64::from(factor).sqrt()).trunc();
    }

    let (angle_deg, power) = match thrower {
        TurnState::Player0 => (angle, power),
        TurnState::Player1 => (-angle, -power),
    };
    let wind_mps2 = rng.uniform(-settings.max_wind_mps2, settings.max_wind_mps2);

    ThrowParams {
        angle_deg,
        power,
        wind_mps2,
    }
}

/// Launch a banana from the active gorilla and hand the turn over
pub fn do_throw(state: &mut GameState, angle_deg: f64, power: f64) -> Result<Launch, ThrowRejected> {
    if state.is_round_over() {
        return Err(ThrowRejected::RoundOver);
    }
    if state.is_airborne() {
        return Err(ThrowRejected::Airborne);
    }
    if !(power > MIN_THROW_POWER) {
        log::warn!("Rejected throw with power {:.2}", power);
        return Err(ThrowRejected::NoPower);
    }

    let thrower = state.turn;
    let origin = state.thrower().pos;
    let params = throw_params(angle_deg, power, thrower, &state.settings, &mut state.rng);

    let ppm = state.settings.pixels_per_meter;
    state.wind = meters_to_pixels(params.wind_mps2, ppm);
    state.projectile = Some(Projectile::new(
        origin.x,
        origin.y,
        params.angle_deg,
        kmph_to_pixels_per_sec(params.power, ppm),
        state.settings.gravity_px(),
        state.wind,
    ));

    state.turn.flip();
    for (gorilla, pose) in state.gorillas.iter_mut().zip(state.turn.arm_poses()) {
        gorilla.arms = pose;
    }
    state.phase = GamePhase::Flying;
    state.sun.shocked = false;
    state.throws += 1;

    log::info!(
        "Player {} throws: angle {:.1}, power {}, wind {:.2} m/s²",
        thrower.index(),
        params.angle_deg,
        params.power,
        params.wind_mps2
    );

    Ok(Launch {
        thrower: thrower.index(),
        origin,
        params,
    })
}

/// What the banana touched this tick, detached from the target list
enum Contact {
    Sun,
    Gorilla(usize),
    Building,
    Ground,
    Boundary,
    Miss,
}

impl Contact {
    fn from_outcome(outcome: &CollisionOutcome<'_>) -> Self {
        match *outcome {
            CollisionOutcome::Hit { name, .. } if name == TARGET_SUN => Contact::Sun,
            CollisionOutcome::Hit { name, .. } if name == TARGET_BUILDING => Contact::Building,
            CollisionOutcome::Hit { name, .. } if name == TARGET_GROUND => Contact::Ground,
            CollisionOutcome::Hit { name, .. } => match TARGET_GORILLAS.iter().position(|&g| g == name) {
                Some(i) => Contact::Gorilla(i),
                None => Contact::Miss,
            },
            CollisionOutcome::Boundary => Contact::Boundary,
            CollisionOutcome::Miss => Contact::Miss,
        }
    }
}

/// Advance the banana one frame and apply whatever it hit
pub fn tick(state: &mut GameState, dt: f64) -> Option<TickEvent> {
    let bounds = state.bounds();
    let projectile = state.projectile.as_mut()?;
    if !projectile.alive {
        return None;
    }
    projectile.update(dt, bounds);
    let at = projectile.pos;
    let above_screen = projectile.is_above_screen(bounds);

    state.sun.shocked = false;
    let outcome = collision::check(at, &state.targets, bounds);
    if !matches!(outcome, CollisionOutcome::Miss) {
        log::debug!("Banana at ({:.1}, {:.1}): {}", at.x, at.y, outcome.as_str());
    }

    match Contact::from_outcome(&outcome) {
        Contact::Miss => None,
        Contact::Sun => {
            state.sun.shocked = true;
            Some(TickEvent::SunHit { at })
        }
        Contact::Gorilla(victim) => {
            let winner = 1 - victim;
            state.drop_projectile();
            state.phase = GamePhase::RoundOver { winner };
            state.scoreboard.record_win(winner);
            log::info!("Gorilla {} hit, player {} wins round {}", victim, winner, state.round);
            Some(TickEvent::GorillaHit { at, victim, winner })
        }
        Contact::Building => {
            state.drop_projectile();
            let radius = state.settings.explosion_radius;
            let damage = apply_impact(&mut state.skyline, at, radius, &mut state.rng);
            state.settle_gorillas();
            state.rebuild_targets();
            Some(TickEvent::BuildingHit { at, damage })
        }
        Contact::Ground => {
            state.drop_projectile();
            Some(TickEvent::GroundHit { at })
        }
        Contact::Boundary if above_screen => None,
        Contact::Boundary => {
            state.drop_projectile();
            Some(TickEvent::OffScreen { at })
        }
    }
}

/// Tick until the current throw ends, collecting events
///
/// Stops after [`MAX_FLIGHT_TICKS`] so a banana that never comes down
/// cannot stall the caller; the banana is discarded in that case.
pub fn resolve_throw(state: &mut GameState, dt: f64) -> Vec<TickEvent> {
    let mut events = Vec::new();
    for _ in 0..MAX_FLIGHT_TICKS {
        if !state.is_airborne() {
            return events;
        }
        if let Some(event) = tick(state, dt) {
            events.push(event);
        }
    }
    if state.is_airborne() {
        log::warn!("Banana still airborne after {} ticks, discarding", MAX_FLIGHT_TICKS);
        state.drop_projectile();
    }
    events
}
