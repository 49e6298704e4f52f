//! Gorilla Duel - a classic artillery duel on a destructible skyline
//!
//! Core modules:
//! - `sim`: Deterministic simulation (skyline, projectile physics, collisions, turns)
//! - `sprite`: Planar bitplane sprite decoding for the banana orientations
//! - `palette`: Fixed EGA palette and game colors
//! - `settings`: Data-driven game configuration
//! - `scoreboard`: Per-match win tally
//!
//! Rendering, audio, input translation and window setup live outside this
//! crate; they consume the state exposed here.

pub mod palette;
pub mod scoreboard;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use scoreboard::Scoreboard;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default screen dimensions
    pub const SCREEN_WIDTH: u32 = 1280;
    pub const SCREEN_HEIGHT: u32 = 720;

    /// Height of the ground strip below the skyline (pixels)
    pub const GROUND_MARGIN: i32 = 50;

    /// Window cell geometry
    pub const WINDOW_WIDTH: i32 = 6;
    pub const WINDOW_HEIGHT: i32 = 10;
    pub const WINDOW_SPACING_X: i32 = 10;
    pub const WINDOW_SPACING_Y: i32 = 15;
    /// Offset of the first window column from the building's left edge
    pub const WINDOW_INSET_X: i32 = 3;
    /// Offset of the first window row below the roof
    pub const WINDOW_INSET_Y: i32 = 5;

    /// Skyline layout
    pub const SKYLINE_START_X: i32 = 2;
    pub const BUILDING_GAP: i32 = 2;
    pub const BUILDING_MIN_WIDTH: i32 = 2;
    pub const BUILDING_MIN_HEIGHT: i32 = 10;
    /// Generation stops once `x` reaches `screen_width - SKYLINE_STOP_MARGIN`
    pub const SKYLINE_STOP_MARGIN: i32 = 20;
    /// Tallest building leaves this much sky above the ground level
    pub const SKYLINE_HEADROOM: i32 = 50;
    pub const LOW_START_HEIGHT: i32 = 15;
    pub const HIGH_START_HEIGHT: i32 = 130;
    pub const HEIGHT_STEP: i32 = 10;

    /// Reference width for the legacy power scaling rule
    pub const REFERENCE_WIDTH: u32 = 640;

    /// Explosion radius used when carving buildings (pixels)
    pub const EXPLOSION_RADIUS: f64 = 30.0;

    /// Unit conversion
    pub const PIXELS_PER_METER: f64 = 30.0;

    /// Gorilla placement relative to its building
    pub const GORILLA_OFFSET_X: i32 = 20;
    pub const GORILLA_OFFSET_Y: i32 = 30;
    /// Gorilla hitbox, anchored at (x - HALF_WIDTH, y)
    pub const GORILLA_HITBOX_HALF_WIDTH: f64 = 15.0;
    pub const GORILLA_HITBOX_HEIGHT: f64 = 40.0;

    /// Sun position (y) and hitbox size, centered on the sun
    pub const SUN_Y: f64 = 25.0;
    pub const SUN_HITBOX_WIDTH: f64 = 44.0;
    pub const SUN_HITBOX_HEIGHT: f64 = 36.0;

    /// Releases at or below this power do not throw
    pub const MIN_THROW_POWER: f64 = 1.0;
}

/// Convert meters to pixels
#[inline]
pub fn meters_to_pixels(m: f64, pixels_per_meter: f64) -> f64 {
    m * pixels_per_meter
}

/// Convert km/h to pixels per second
#[inline]
pub fn kmph_to_pixels_per_sec(kmph: f64, pixels_per_meter: f64) -> f64 {
    meters_to_pixels(kmph * (1000.0 / 3600.0), pixels_per_meter)
}

/// Float floor division with the legacy rounding rules
///
/// Matches the classic `a // b` on floats bit-for-bit, which is not always
/// `(a / b).floor()` because the quotient is formed from `a - fmod(a, b)`.
pub fn legacy_floor_div(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return a / b;
    }
    let rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 && ((b < 0.0) != (rem < 0.0)) {
        div -= 1.0;
    }
    if div != 0.0 {
        let mut floor = div.floor();
        if div - floor > 0.5 {
            floor += 1.0;
        }
        floor
    } else {
        0.0_f64.copysign(a / b)
    }
}
