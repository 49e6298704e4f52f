//! Carving impacts out of the skyline

use glam::DVec2;

use super::rng::LegacyRandom;
use super::skyline::Skyline;

/// A building shortened by an impact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub index: usize,
    pub old_height: i32,
    pub new_height: i32,
}

/// Apply an explosion at `impact` to the skyline
///
/// Only buildings whose rectangle contains the impact point are affected;
/// the radius deepens the cut but never spreads to neighbors. Each damaged
/// building has its window pattern regenerated for the new height.
pub fn apply_impact(
    skyline: &mut Skyline,
    impact: DVec2,
    radius: f64,
    rng: &mut impl LegacyRandom,
) -> Vec<Damage> {
    let mut damage = Vec::new();

    for (index, building) in skyline.buildings.iter_mut().enumerate() {
        if !building.contains(impact) {
            continue;
        }

        // An impact never adds height
        let depth = ((impact.y + radius) - f64::from(building.top_y)).max(0.0);
        let old_height = building.height;
        building.set_height(old_height - depth.floor() as i32, rng);

        log::debug!(
            "Impact at ({:.1}, {:.1}) cut building {} from {} to {}",
            impact.x,
            impact.y,
            index,
            old_height,
            building.height
        );
        damage.push(Damage {
            index,
            old_height,
            new_height: building.height,
        });
    }

    damage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EXPLOSION_RADIUS;
    use crate::sim::rng::{QbRandom, SequenceRandom};
    use proptest::prelude::*;

    fn flat_skyline() -> Skyline {
        // All-zero draws: ascending, 38px wide buildings
        Skyline::generate(640, 480, &mut SequenceRandom::new(vec![0.0]))
    }

    #[test]
    fn test_cut_depth() {
        let mut skyline = flat_skyline();
        let mut rng = QbRandom::new(1);
        let before = skyline.buildings[3].clone();
        let impact = DVec2::new(f64::from(before.x) + 5.0, f64::from(before.top_y) + 4.5);

        let damage = apply_impact(&mut skyline, impact, EXPLOSION_RADIUS, &mut rng);
        assert_eq!(damage.len(), 1);
        assert_eq!(damage[0].index, 3);

        // depth = 4.5 + 30 -> 34
        let after = &skyline.buildings[3];
        assert_eq!(after.height, (before.height - 34).max(0));
        assert_eq!(after.top_y + after.height, skyline.ground_y());
    }

    #[test]
    fn test_neighbors_untouched() {
        let mut skyline = flat_skyline();
        let original = skyline.clone();
        let b = &skyline.buildings[2];
        let impact = DVec2::new(f64::from(b.right()) - 1.0, f64::from(b.top_y) + 1.0);

        apply_impact(&mut skyline, impact, 200.0, &mut QbRandom::new(1));
        for i in [1, 3] {
            assert_eq!(skyline.buildings[i], original.buildings[i]);
        }
        assert_eq!(skyline.buildings[2].height, 0);
    }

    #[test]
    fn test_miss_is_noop() {
        let mut skyline = flat_skyline();
        let original = skyline.clone();
        // In the sky, in a gap, and off screen
        for p in [
            DVec2::new(100.0, 5.0),
            DVec2::new(40.5, 420.0),
            DVec2::new(-50.0, 420.0),
        ] {
            assert!(apply_impact(&mut skyline, p, EXPLOSION_RADIUS, &mut QbRandom::new(1)).is_empty());
        }
        assert_eq!(skyline, original);
    }

    #[test]
    fn test_windows_follow_new_height() {
        let mut skyline = Skyline::generate(1280, 720, &mut QbRandom::new(77));
        let idx = skyline
            .buildings
            .iter()
            .position(|b| b.height > 100)
            .unwrap();
        let b = &skyline.buildings[idx];
        let impact = DVec2::new(f64::from(b.x) + 1.0, f64::from(b.top_y) + 40.0);

        apply_impact(&mut skyline, impact, EXPLOSION_RADIUS, &mut QbRandom::new(5));
        let b = &skyline.buildings[idx];
        assert!(b.window_cells().all(|c| c.y >= b.top_y));
    }

    #[test]
    fn test_negative_radius_never_grows() {
        let mut skyline = flat_skyline();
        let before = skyline.buildings[3].clone();
        let impact = DVec2::new(f64::from(before.x) + 5.0, f64::from(before.top_y) + 4.0);

        for radius in [-10.0, -1.0e12] {
            let damage = apply_impact(&mut skyline, impact, radius, &mut QbRandom::new(1));
            assert_eq!(damage.len(), 1);
            assert_eq!(damage[0].new_height, before.height);
            assert_eq!(skyline.buildings[3].height, before.height);
        }
    }

    proptest! {
        #[test]
        fn prop_heights_monotone(
            seed in any::<u64>(),
            impacts in prop::collection::vec((0.0f64..1280.0, 0.0f64..720.0, -60.0f64..60.0), 1..40),
        ) {
            let mut rng = QbRandom::new(seed);
            let mut skyline = Skyline::generate(1280, 720, &mut rng);
            let mut last: Vec<i32> = skyline.buildings.iter().map(|b| b.height).collect();

            for (x, y, r) in impacts {
                apply_impact(&mut skyline, DVec2::new(x, y), r, &mut rng);
                for (b, prev) in skyline.buildings.iter().zip(last.iter()) {
                    prop_assert!(b.height <= *prev);
                    prop_assert!(b.height >= 0);
                }
                last = skyline.buildings.iter().map(|b| b.height).collect();
            }
        }
    }
}
