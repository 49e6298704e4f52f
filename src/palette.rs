//! Fixed EGA palette and the named colors the game draws with

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// RGBA with full opacity
    pub const fn opaque(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// The 16-color EGA palette, indexed by 4-bit color index
pub const EGA_PALETTE: [Rgb; 16] = [
    Rgb::new(0, 0, 0),       // 0 black
    Rgb::new(0, 0, 170),     // 1 blue
    Rgb::new(0, 170, 0),     // 2 green
    Rgb::new(0, 170, 170),   // 3 cyan
    Rgb::new(170, 0, 0),     // 4 red
    Rgb::new(170, 0, 170),   // 5 magenta
    Rgb::new(170, 85, 0),    // 6 brown
    Rgb::new(170, 170, 170), // 7 gray
    Rgb::new(85, 85, 85),    // 8 dark gray
    Rgb::new(85, 85, 255),   // 9 bright blue
    Rgb::new(85, 255, 85),   // 10 bright green
    Rgb::new(85, 255, 255),  // 11 bright cyan
    Rgb::new(255, 85, 85),   // 12 bright red
    Rgb::new(255, 85, 255),  // 13 bright magenta
    Rgb::new(255, 255, 85),  // 14 bright yellow
    Rgb::new(255, 255, 255), // 15 white
];

pub const BLUE: Rgb = EGA_PALETTE[1];
pub const GREEN: Rgb = EGA_PALETTE[2];
pub const CYAN: Rgb = EGA_PALETTE[3];
pub const RED: Rgb = EGA_PALETTE[4];
pub const MAGENTA: Rgb = EGA_PALETTE[5];
pub const BROWN: Rgb = EGA_PALETTE[6];
pub const GRAY: Rgb = EGA_PALETTE[7];
pub const DARK_GRAY: Rgb = EGA_PALETTE[8];
pub const BRIGHT_YELLOW: Rgb = EGA_PALETTE[14];

/// Building body colors, selected by `rng.next(4) - 1`
pub const BUILDING_COLORS: [Rgb; 4] = [CYAN, RED, MAGENTA, BROWN];

pub const SKY_COLOR: Rgb = BLUE;
pub const GROUND_COLOR: Rgb = GRAY;
pub const GORILLA_COLOR: Rgb = BROWN;
pub const BANANA_COLOR: Rgb = BRIGHT_YELLOW;
pub const EXPLOSION_COLOR: Rgb = GREEN;
pub const SUN_COLOR: Rgb = BRIGHT_YELLOW;
pub const WINDOW_COLOR_LIT: Rgb = BRIGHT_YELLOW;
pub const WINDOW_COLOR_DARK: Rgb = DARK_GRAY;

/// Fill used for sprites that failed to decode
pub const INVALID_SPRITE_COLOR: Rgb = Rgb::new(255, 0, 255);
