//! Destructible buildings and their frozen window patterns

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rng::LegacyRandom;
use crate::consts::*;
use crate::palette::Rgb;

/// A single window cell, ready for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCell {
    pub x: i32,
    pub y: i32,
    pub lit: bool,
}

/// A building standing on the ground line
///
/// `window_pattern` is column-major and only changes when the height does,
/// so the lit/unlit pattern never flickers between frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub x: i32,
    pub top_y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Rgb,
    pub window_pattern: Vec<Vec<bool>>,
    screen_height: i32,
}

impl Building {
    pub fn new(
        x: i32,
        width: i32,
        height: i32,
        color: Rgb,
        screen_height: i32,
        rng: &mut impl LegacyRandom,
    ) -> Self {
        let height = height.max(0);
        let mut building = Self {
            x,
            top_y: top_for(screen_height, height),
            width,
            height,
            color,
            window_pattern: Vec::new(),
            screen_height,
        };
        building.regenerate_windows(rng);
        building
    }

    /// Ground line y coordinate (bottom edge of every building)
    pub fn ground_y(&self) -> i32 {
        self.screen_height - GROUND_MARGIN
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Half-open containment: `[x, x + width) × [top_y, top_y + height)`
    pub fn contains(&self, point: DVec2) -> bool {
        let (x, y) = (f64::from(self.x), f64::from(self.top_y));
        point.x >= x
            && point.x < x + f64::from(self.width)
            && point.y >= y
            && point.y < y + f64::from(self.height)
    }

    /// Change the height (never below zero) and redraw the windows once
    pub fn set_height(&mut self, height: i32, rng: &mut impl LegacyRandom) {
        self.height = height.max(0);
        self.top_y = top_for(self.screen_height, self.height);
        self.regenerate_windows(rng);
    }

    /// Lay out window cells for the current height and roll each one lit or dark
    pub fn regenerate_windows(&mut self, rng: &mut impl LegacyRandom) {
        self.window_pattern.clear();

        if self.height < WINDOW_HEIGHT + WINDOW_INSET_Y {
            return;
        }

        let bottom = self.top_y + self.height;
        let row_limit = self.ground_y() - WINDOW_HEIGHT;
        let columns = (self.x + WINDOW_INSET_X..self.right() - WINDOW_WIDTH)
            .step_by(WINDOW_SPACING_X as usize);

        for _ in columns {
            let column = (self.top_y + WINDOW_INSET_Y..row_limit)
                .step_by(WINDOW_SPACING_Y as usize)
                .filter(|&wy| wy < bottom)
                .map(|_| rng.next(4) != 1)
                .collect();
            self.window_pattern.push(column);
        }
    }

    /// Window cells with their screen positions
    pub fn window_cells(&self) -> impl Iterator<Item = WindowCell> + '_ {
        self.window_pattern
            .iter()
            .enumerate()
            .flat_map(move |(col, column)| {
                column.iter().enumerate().map(move |(row, &lit)| WindowCell {
                    x: self.x + WINDOW_INSET_X + col as i32 * WINDOW_SPACING_X,
                    y: self.top_y + WINDOW_INSET_Y + row as i32 * WINDOW_SPACING_Y,
                    lit,
                })
            })
    }

    pub fn window_count(&self) -> usize {
        self.window_pattern.iter().map(Vec::len).sum()
    }
}

#[inline]
fn top_for(screen_height: i32, height: i32) -> i32 {
    screen_height - height - GROUND_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::CYAN;
    use crate::sim::rng::{QbRandom, SequenceRandom};

    #[test]
    fn test_geometry() {
        let mut rng = QbRandom::new(1);
        let b = Building::new(2, 40, 100, CYAN, 480, &mut rng);
        assert_eq!(b.top_y, 480 - 100 - 50);
        assert_eq!(b.ground_y(), 430);
        assert_eq!(b.right(), 42);
    }

    #[test]
    fn test_window_grid_shape() {
        let mut rng = QbRandom::new(1);
        // Columns at x+3, x+13, x+23, x+33 (< x+34); rows at top+5 .. < ground-10 every 15
        let b = Building::new(0, 40, 100, CYAN, 480, &mut rng);
        assert_eq!(b.window_pattern.len(), 4);
        // rows: top=330 -> 335, 350, 365, 380, 395, 410 (< 420)
        assert!(b.window_pattern.iter().all(|c| c.len() == 6));
        assert_eq!(b.window_count(), 24);
    }

    #[test]
    fn test_lit_ratio_rule() {
        // next(4) == 1 only for draws below 0.25
        let mut rng = SequenceRandom::new(vec![0.1, 0.9]);
        let b = Building::new(0, 20, 100, CYAN, 480, &mut rng);
        let cells: Vec<bool> = b.window_pattern[0].clone();
        assert_eq!(cells, vec![false, true, false, true, false, true]);
    }

    #[test]
    fn test_short_building_has_no_windows() {
        let mut rng = QbRandom::new(3);
        let b = Building::new(0, 40, 14, CYAN, 480, &mut rng);
        assert!(b.window_pattern.is_empty());
        assert_eq!(b.window_cells().count(), 0);
    }

    #[test]
    fn test_regeneration_idempotent_with_same_draws() {
        let mut rng = SequenceRandom::new(vec![0.05, 0.6, 0.3, 0.8, 0.2, 0.95, 0.4]);
        let mut b = Building::new(10, 60, 200, CYAN, 600, &mut rng);

        rng.rewind();
        b.regenerate_windows(&mut rng);
        let first = b.window_pattern.clone();

        rng.rewind();
        b.regenerate_windows(&mut rng);
        assert_eq!(first, b.window_pattern);
    }

    #[test]
    fn test_shrinking_removes_upper_rows() {
        let mut rng = QbRandom::new(9);
        let mut b = Building::new(0, 40, 200, CYAN, 600, &mut rng);
        let before = b.window_count();
        b.set_height(60, &mut rng);
        assert_eq!(b.top_y, 600 - 60 - 50);
        assert!(b.window_count() < before);
        for cell in b.window_cells() {
            assert!(cell.y >= b.top_y);
            assert!(cell.y + WINDOW_HEIGHT <= b.ground_y());
        }
    }

    #[test]
    fn test_height_never_negative() {
        let mut rng = QbRandom::new(2);
        let mut b = Building::new(0, 40, 50, CYAN, 480, &mut rng);
        b.set_height(-20, &mut rng);
        assert_eq!(b.height, 0);
        assert_eq!(b.top_y, 430);
        assert!(!b.contains(DVec2::new(5.0, 430.0)));
    }

    #[test]
    fn test_contains_half_open() {
        let mut rng = QbRandom::new(2);
        let b = Building::new(10, 40, 50, CYAN, 480, &mut rng);
        assert!(b.contains(DVec2::new(10.0, 380.0)));
        assert!(!b.contains(DVec2::new(50.0, 400.0)));
        assert!(!b.contains(DVec2::new(20.0, 430.0)));
        assert!(!b.contains(DVec2::new(20.0, 379.9)));
    }
}
