//! Round session state
//!
//! Everything a frame needs: skyline, gorillas, sun, the banana in flight,
//! whose turn it is and the ordered hit-target list.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{HitTarget, TARGET_GORILLAS, TARGET_GROUND, TARGET_SUN};
use super::projectile::{Bounds, Projectile};
use super::rng::QbRandom;
use super::skyline::Skyline;
use super::turn::{ArmPose, TurnState};
use crate::Scoreboard;
use crate::consts::*;
use crate::settings::Settings;
use crate::sprite::Orientation;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the active player to throw
    Aiming,
    /// A banana is in the air
    Flying,
    /// A gorilla was hit; `winner` took the round
    RoundOver { winner: usize },
}

/// A gorilla standing on a rooftop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gorilla {
    /// Anchor point: hitbox top-center and throw origin
    pub pos: DVec2,
    pub arms: ArmPose,
    /// Building the gorilla stands on, `None` when on the ground
    pub building: Option<usize>,
}

impl Gorilla {
    /// Hit target for this gorilla
    pub fn hit_target(&self, name: &str) -> HitTarget {
        HitTarget::rect(
            name,
            self.pos.x - GORILLA_HITBOX_HALF_WIDTH,
            self.pos.y,
            2.0 * GORILLA_HITBOX_HALF_WIDTH,
            GORILLA_HITBOX_HEIGHT,
        )
    }
}

/// The sun and its mood
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sun {
    pub pos: DVec2,
    /// Set for the tick in which a banana passes through it
    pub shocked: bool,
}

impl Sun {
    pub fn new(screen_width: u32) -> Self {
        Self {
            pos: DVec2::new(f64::from(screen_width / 2), SUN_Y),
            shocked: false,
        }
    }

    pub fn hit_target(&self) -> HitTarget {
        HitTarget::rect(
            TARGET_SUN,
            self.pos.x - SUN_HITBOX_WIDTH / 2.0,
            self.pos.y - SUN_HITBOX_HEIGHT / 2.0,
            SUN_HITBOX_WIDTH,
            SUN_HITBOX_HEIGHT,
        )
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub rng: QbRandom,
    pub round: u32,
    pub phase: GamePhase,
    pub skyline: Skyline,
    pub gorillas: [Gorilla; 2],
    pub sun: Sun,
    pub projectile: Option<Projectile>,
    /// Wind of the current or last throw (px/s²)
    pub wind: f64,
    pub turn: TurnState,
    /// Checked in order: sun, gorillas, buildings, ground
    pub targets: Vec<HitTarget>,
    pub scoreboard: Scoreboard,
    /// Throws made in the current round
    pub throws: u32,
}

impl GameState {
    /// Start a session and generate the first round
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("New session with seed {}", seed);

        let mut rng = QbRandom::new(seed);
        let skyline = Skyline::generate(settings.screen_width, settings.screen_height, &mut rng);
        let sun = Sun::new(settings.screen_width);

        let mut state = Self {
            settings,
            rng,
            round: 1,
            phase: GamePhase::Aiming,
            skyline,
            gorillas: [Gorilla {
                pos: DVec2::ZERO,
                arms: ArmPose::ArmsDown,
                building: None,
            }; 2],
            sun,
            projectile: None,
            wind: 0.0,
            turn: TurnState::default(),
            targets: Vec::new(),
            scoreboard: Scoreboard::new(),
            throws: 0,
        };
        state.settle_gorillas();
        state.rebuild_targets();
        state
    }

    /// Fresh skyline and starting positions; the turn carries over
    pub fn next_round(&mut self) {
        self.skyline = Skyline::generate(
            self.settings.screen_width,
            self.settings.screen_height,
            &mut self.rng,
        );
        self.round += 1;
        self.phase = GamePhase::Aiming;
        self.projectile = None;
        self.sun.shocked = false;
        self.throws = 0;

        self.settle_gorillas();
        for gorilla in &mut self.gorillas {
            gorilla.arms = ArmPose::ArmsDown;
        }
        self.rebuild_targets();
        log::info!("Round {} begins", self.round);
    }

    /// Put each gorilla on top of its starting building
    pub fn settle_gorillas(&mut self) {
        let (left, right) = home_buildings(self.skyline.len());
        for (i, home) in [left, right].into_iter().enumerate() {
            let gorilla = &mut self.gorillas[i];
            gorilla.building = home;
            gorilla.pos = match home {
                Some(b) => {
                    let b = &self.skyline.buildings[b];
                    DVec2::new(
                        f64::from(b.x + GORILLA_OFFSET_X),
                        f64::from(b.top_y - GORILLA_OFFSET_Y),
                    )
                }
                None => {
                    let x = if i == 0 {
                        2 * GORILLA_OFFSET_X
                    } else {
                        self.skyline.screen_width - 2 * GORILLA_OFFSET_X
                    };
                    DVec2::new(
                        f64::from(x),
                        f64::from(self.skyline.ground_y() - GORILLA_OFFSET_Y),
                    )
                }
            };
        }
    }

    /// Regenerate the hit-target list from the current scene
    pub fn rebuild_targets(&mut self) {
        self.targets.clear();
        self.targets.push(self.sun.hit_target());
        for (gorilla, name) in self.gorillas.iter().zip(TARGET_GORILLAS) {
            self.targets.push(gorilla.hit_target(name));
        }
        self.targets
            .extend(self.skyline.buildings.iter().map(HitTarget::building));

        let ground_y = f64::from(self.skyline.ground_y());
        self.targets.push(HitTarget::rect(
            TARGET_GROUND,
            0.0,
            ground_y,
            f64::from(self.settings.screen_width),
            f64::from(GROUND_MARGIN),
        ));
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            f64::from(self.settings.screen_width),
            f64::from(self.settings.screen_height),
        )
    }

    /// Gorilla whose turn it is
    pub fn thrower(&self) -> &Gorilla {
        &self.gorillas[self.turn.index()]
    }

    pub fn is_round_over(&self) -> bool {
        matches!(self.phase, GamePhase::RoundOver { .. })
    }

    /// True while a banana is in the air
    pub fn is_airborne(&self) -> bool {
        self.projectile.as_ref().is_some_and(|p| p.alive)
    }

    /// Sprite orientation of the banana in flight at the configured spin rate
    pub fn banana_orientation(&self) -> Option<Orientation> {
        self.projectile
            .as_ref()
            .filter(|p| p.alive)
            .map(|p| p.orientation(self.settings.banana_rpm))
    }

    /// Discard the banana and wait for the next throw
    pub fn drop_projectile(&mut self) {
        self.projectile = None;
        self.phase = GamePhase::Aiming;
    }
}

/// Starting building for each gorilla: second and second-to-last when the
/// skyline allows it, first and last otherwise
fn home_buildings(len: usize) -> (Option<usize>, Option<usize>) {
    match len {
        0 => (None, None),
        1 => (Some(0), Some(0)),
        2 => (Some(0), Some(1)),
        n => (Some(1), Some(n - 2)),
    }
}
