//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only, every draw through `LegacyRandom`
//! - Stable target order (sun, gorillas, buildings, ground)
//! - No rendering or platform dependencies

pub mod aim;
pub mod building;
pub mod collision;
pub mod destruction;
pub mod projectile;
pub mod rng;
pub mod skyline;
pub mod state;
pub mod tick;
pub mod turn;

pub use aim::{AimController, AimMode};
pub use building::{Building, WindowCell};
pub use collision::{CollisionOutcome, HitRegion, HitTarget, check};
pub use destruction::{Damage, apply_impact};
pub use projectile::{Bounds, Projectile, plot_trajectory};
pub use rng::{LegacyRandom, QbRandom, SequenceRandom};
pub use skyline::{Skyline, SlopeMode};
pub use state::{GamePhase, GameState, Gorilla, Sun};
pub use tick::{Launch, ThrowParams, ThrowRejected, TickEvent, do_throw, resolve_throw, throw_params, tick};
pub use turn::{ArmPose, TurnState};
