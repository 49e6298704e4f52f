//! Seeded skyline generation
//!
//! Reproduces the classic silhouette rules: a slope mode picks the overall
//! shape, each building's height is a random offset from a running target,
//! and buildings are laid left to right with a fixed 2px gap.

use serde::{Deserialize, Serialize};

use super::building::Building;
use super::rng::LegacyRandom;
use crate::consts::*;
use crate::palette::BUILDING_COLORS;

/// Overall shape of the skyline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlopeMode {
    /// Rising left to right
    Ascending,
    /// Falling left to right
    Descending,
    /// Starts low, climbs to the midpoint, then drops
    V,
    /// Starts high, climbs to the midpoint, then drops
    InvertedV,
}

impl SlopeMode {
    /// Map a `next(6)` roll to a mode (rolls 3-4 are V, 5-6 inverted V)
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            1 => SlopeMode::Ascending,
            2 => SlopeMode::Descending,
            3 | 4 => SlopeMode::V,
            _ => SlopeMode::InvertedV,
        }
    }

    /// Initial target height and per-building step
    pub fn start(self) -> (i32, i32) {
        match self {
            SlopeMode::Ascending | SlopeMode::V => (LOW_START_HEIGHT, HEIGHT_STEP),
            SlopeMode::Descending | SlopeMode::InvertedV => (HIGH_START_HEIGHT, -HEIGHT_STEP),
        }
    }

    /// Change applied to the target height before placing a building at `x`
    fn height_delta(self, x: i32, midpoint: i32, step: i32) -> i32 {
        match self {
            SlopeMode::Ascending | SlopeMode::Descending => step,
            SlopeMode::V => {
                if x > midpoint {
                    -2 * step
                } else {
                    2 * step
                }
            }
            SlopeMode::InvertedV => {
                if x > midpoint {
                    2 * step
                } else {
                    -2 * step
                }
            }
        }
    }
}

/// The ordered, left-to-right set of buildings for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skyline {
    pub screen_width: i32,
    pub screen_height: i32,
    pub slope: SlopeMode,
    pub buildings: Vec<Building>,
}

impl Skyline {
    /// Generate a fresh skyline; deterministic for a given RNG state
    pub fn generate(screen_width: u32, screen_height: u32, rng: &mut impl LegacyRandom) -> Self {
        let screen_width = screen_width as i32;
        let screen_height = screen_height as i32;
        let ground_level = screen_height - GROUND_MARGIN;
        let max_height = ground_level - SKYLINE_HEADROOM;
        let midpoint = screen_width / 2;

        let slope = SlopeMode::from_roll(rng.next(6));
        let (mut target_height, step) = slope.start();

        let mut buildings = Vec::new();
        let mut x = SKYLINE_START_X;
        while x < screen_width - SKYLINE_STOP_MARGIN {
            target_height += slope.height_delta(x, midpoint, step);

            let mut width = rng.next(37) as i32 + 37;
            if x + width > screen_width {
                width = screen_width - x - BUILDING_GAP;
            }
            if width < BUILDING_MIN_WIDTH {
                break;
            }

            let height = (rng.next(120) as i32 + target_height)
                .min(max_height)
                .max(BUILDING_MIN_HEIGHT);
            let color = BUILDING_COLORS[(rng.next(4) - 1) as usize % BUILDING_COLORS.len()];

            buildings.push(Building::new(x, width, height, color, screen_height, rng));
            x += width + BUILDING_GAP;
        }

        log::info!(
            "Skyline {}x{}: {:?}, {} buildings",
            screen_width,
            screen_height,
            slope,
            buildings.len()
        );

        Self {
            screen_width,
            screen_height,
            slope,
            buildings,
        }
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Ground line y coordinate
    pub fn ground_y(&self) -> i32 {
        self.screen_height - GROUND_MARGIN
    }

    /// Index of the building whose horizontal span covers `x`
    pub fn building_at_x(&self, x: f64) -> Option<usize> {
        self.buildings
            .iter()
            .position(|b| x >= f64::from(b.x) && x < f64::from(b.right()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{QbRandom, SequenceRandom};
    use proptest::prelude::*;

    fn heights(skyline: &Skyline) -> Vec<i32> {
        skyline.buildings.iter().map(|b| b.height).collect()
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = Skyline::generate(1280, 720, &mut QbRandom::new(2024));
        let b = Skyline::generate(1280, 720, &mut QbRandom::new(2024));
        assert_eq!(a, b);
    }

    #[test]
    fn test_ascending_scripted() {
        // Every draw is 0.0: slope 1, width 38, height 1 + target, color 0
        let skyline = Skyline::generate(640, 480, &mut SequenceRandom::new(vec![0.0]));
        assert_eq!(skyline.slope, SlopeMode::Ascending);
        let hs = heights(&skyline);
        assert_eq!(&hs[..3], &[26, 36, 46]);
        assert_eq!(skyline.buildings[0].x, 2);
        assert_eq!(skyline.buildings[0].width, 38);
        assert_eq!(skyline.buildings[1].x, 42);
        assert_eq!(skyline.buildings[0].color, BUILDING_COLORS[0]);
    }

    #[test]
    fn test_descending_scripted() {
        // 0.2: slope 2, width 45, height 25 + target
        let skyline = Skyline::generate(640, 480, &mut SequenceRandom::new(vec![0.2]));
        assert_eq!(skyline.slope, SlopeMode::Descending);
        let hs = heights(&skyline);
        assert_eq!(&hs[..3], &[145, 135, 125]);
        assert!(hs.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_v_modes_peak_mid_screen() {
        for (draw, mode) in [(0.4, SlopeMode::V), (0.7, SlopeMode::InvertedV)] {
            let skyline = Skyline::generate(640, 480, &mut SequenceRandom::new(vec![draw]));
            assert_eq!(skyline.slope, mode);
            let left: Vec<i32> = skyline
                .buildings
                .iter()
                .filter(|b| b.x <= 320)
                .map(|b| b.height)
                .collect();
            let right: Vec<i32> = skyline
                .buildings
                .iter()
                .filter(|b| b.x > 320)
                .map(|b| b.height)
                .collect();
            assert!(left.windows(2).all(|w| w[1] >= w[0]), "{mode:?} left {left:?}");
            assert!(right.windows(2).all(|w| w[1] <= w[0]), "{mode:?} right {right:?}");
        }
    }

    #[test]
    fn test_last_building_clamped_to_edge() {
        // 0.4 draws give 52px buildings: x = 2, 56, ..., 596 -> clamped to 42
        let skyline = Skyline::generate(640, 480, &mut SequenceRandom::new(vec![0.4]));
        let last = skyline.buildings.last().unwrap();
        assert_eq!(last.x, 596);
        assert_eq!(last.width, 42);
        assert_eq!(last.right(), 638);
    }

    #[test]
    fn test_tiny_screen_has_no_buildings() {
        let skyline = Skyline::generate(20, 480, &mut QbRandom::new(1));
        assert!(skyline.is_empty());
    }

    #[test]
    fn test_building_at_x() {
        let skyline = Skyline::generate(640, 480, &mut SequenceRandom::new(vec![0.0]));
        assert_eq!(skyline.building_at_x(2.0), Some(0));
        assert_eq!(skyline.building_at_x(40.5), None); // in the gap
        assert_eq!(skyline.building_at_x(42.0), Some(1));
        assert_eq!(skyline.building_at_x(-1.0), None);
    }

    proptest! {
        #[test]
        fn prop_skyline_layout(
            seed in any::<u64>(),
            width in 200u32..2000,
            height in 200u32..1200,
        ) {
            let skyline = Skyline::generate(width, height, &mut QbRandom::new(seed));
            let w = width as i32;
            let max_height = (height as i32 - GROUND_MARGIN - SKYLINE_HEADROOM).max(BUILDING_MIN_HEIGHT);

            prop_assert!(!skyline.is_empty());
            prop_assert_eq!(skyline.buildings[0].x, SKYLINE_START_X);

            for pair in skyline.buildings.windows(2) {
                // sorted, non-overlapping, fixed gap
                prop_assert_eq!(pair[1].x, pair[0].right() + BUILDING_GAP);
            }
            for b in &skyline.buildings {
                prop_assert!(b.width >= BUILDING_MIN_WIDTH);
                prop_assert!(b.height >= BUILDING_MIN_HEIGHT && b.height <= max_height);
                prop_assert_eq!(b.top_y + b.height, skyline.ground_y());
                prop_assert!(BUILDING_COLORS.contains(&b.color));
            }

            // Coverage reaches the stop line, never past the screen edge
            let last = skyline.buildings.last().unwrap();
            prop_assert!(last.right() <= w);
            prop_assert!(last.right() + BUILDING_GAP >= w - SKYLINE_STOP_MARGIN);
        }
    }
}
