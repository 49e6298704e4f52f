//! Gorilla Duel entry point
//!
//! Headless native driver: two computer players trade throws for a few
//! rounds while the simulation logs what happens. Pass a settings JSON path
//! as the first argument to override the defaults; `RUST_LOG` controls the
//! log level.

use gorilla_duel::Settings;
use gorilla_duel::sim::aim::{AimController, MAX_POWER};
use gorilla_duel::sim::tick::MAX_FLIGHT_TICKS;
use gorilla_duel::sim::{
    GameState, SequenceRandom, TickEvent, do_throw, plot_trajectory, throw_params, tick,
};
use gorilla_duel::sprite::{BananaSprites, Orientation};
use gorilla_duel::{kmph_to_pixels_per_sec, meters_to_pixels};

/// Angles the computer players pick from
const CPU_ANGLES: [f64; 4] = [40.0, 50.0, 60.0, 70.0];

fn main() {
    env_logger::init();
    log::info!("Gorilla Duel (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };

    let sprites = BananaSprites::decode();
    for orientation in Orientation::ALL {
        let (w, h) = sprites.get(orientation).dimensions();
        log::debug!("Banana sprite {}: {}x{}", orientation.as_str(), w, h);
    }

    let rounds = settings.rounds;
    let mut state = GameState::new(settings);
    let mut aim = AimController::default();

    for round in 0..rounds {
        if round > 0 {
            state.next_round();
        }
        play_round(&mut state, &mut aim);
    }

    let board = &state.scoreboard;
    match board.leader() {
        Some(player) => log::info!("Player {} wins the match {:?}", player, board.wins),
        None => log::info!("Match drawn {:?}", board.wins),
    }
    match board.to_json() {
        Ok(json) => log::info!("Scoreboard: {}", json),
        Err(e) => log::warn!("Could not serialize scoreboard: {}", e),
    }
}

fn play_round(state: &mut GameState, aim: &mut AimController) {
    let dt = state.settings.frame_dt;

    while !state.is_round_over() && state.throws < state.settings.max_throws_per_round {
        let pick = (state.throws as usize + state.round as usize) % CPU_ANGLES.len();
        let angle = CPU_ANGLES[pick];
        let power = pick_power(state, angle);

        aim.adjust_angle(angle - aim.angle);
        aim.start_charge();
        while aim.power < power {
            aim.update(dt);
        }
        let Some((angle, power)) = aim.release_charge() else {
            continue;
        };

        if let Err(e) = do_throw(state, angle, power) {
            log::warn!("{}", e);
            break;
        }

        fly(state, dt);
    }

    if !state.is_round_over() {
        log::info!("Round {} abandoned after {} throws", state.round, state.throws);
        state.scoreboard.record_draw();
    }
}

/// Tick the banana until the throw ends, logging spin changes
fn fly(state: &mut GameState, dt: f64) {
    let mut spin = None;
    for _ in 0..MAX_FLIGHT_TICKS {
        if !state.is_airborne() {
            return;
        }
        let orientation = state.banana_orientation();
        if orientation != spin {
            if let Some(o) = orientation {
                log::debug!("Banana spins {}", o.as_str());
            }
            spin = orientation;
        }
        if let Some(event) = tick(state, dt) {
            log_event(&event);
        }
    }
    if state.is_airborne() {
        log::warn!("Banana never came down, discarding");
        state.drop_projectile();
    }
}

/// Charge level whose calm-air arc passes closest to the opponent
fn pick_power(state: &GameState, angle: f64) -> f64 {
    let settings = &state.settings;
    let start = state.thrower().pos;
    let target = state.gorillas[state.turn.other().index()].pos;
    let gravity = settings.gravity_px();

    let mut best = (f64::MAX, MAX_POWER / 2.0);
    for charge in 2..=MAX_POWER as u32 {
        let charge = f64::from(charge);
        // Midpoint draws cancel the jitter and the wind
        let params = throw_params(angle, charge, state.turn, settings, &mut SequenceRandom::new(vec![0.5]));
        let velocity = kmph_to_pixels_per_sec(params.power, settings.pixels_per_meter);
        let wind = meters_to_pixels(params.wind_mps2, settings.pixels_per_meter);
        let arc = plot_trajectory(
            start,
            params.angle_deg,
            velocity,
            gravity,
            wind,
            f64::from(settings.screen_width),
        );
        let miss = arc
            .iter()
            .map(|p| p.distance_squared(target))
            .fold(f64::MAX, f64::min);
        if miss < best.0 {
            best = (miss, charge);
        }
    }
    best.1
}

fn log_event(event: &TickEvent) {
    if event.explodes() {
        let at = event.at();
        log::debug!("Explosion at ({:.0}, {:.0})", at.x, at.y);
    }
    match event {
        TickEvent::SunHit { .. } => log::info!("Banana hit the sun!"),
        TickEvent::GorillaHit { victim, winner, .. } => {
            log::info!("Gorilla {} down, player {} takes the round", victim, winner)
        }
        TickEvent::BuildingHit { at, damage } => log::info!(
            "Banana hit a building at ({:.0}, {:.0}), {} damaged",
            at.x,
            at.y,
            damage.len()
        ),
        TickEvent::GroundHit { .. } => log::info!("Banana hit the ground"),
        TickEvent::OffScreen { .. } => log::info!("Banana off screen"),
    }
}
