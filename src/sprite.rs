//! Planar bitplane sprite decoding
//!
//! Legacy sprites are stored as packed 32-bit words. Word 0 holds
//! `(width: u16, height: u16)` little-endian; the remaining words hold four
//! interleaved bitplanes of a 4-bit indexed image, with every nibble stored
//! bit-reversed.
//!
//! Decoding never fails loudly: data too short for its declared size yields
//! [`DecodedSprite::Invalid`], which renders as a magenta placeholder.

use serde::{Deserialize, Serialize};

use crate::palette::{EGA_PALETTE, INVALID_SPRITE_COLOR, Rgb};

/// Reverses the bit order within a nibble (0001 -> 1000)
const NIBBLE_REVERSE: [u8; 16] = [
    0x0, 0x8, 0x4, 0xC, 0x2, 0xA, 0x6, 0xE, 0x1, 0x9, 0x5, 0xD, 0x3, 0xB, 0x7, 0xF,
];

/// Banana facing left
pub const BANANA_LEFT: [i32; 9] = [
    458758, 202116096, 471604224, 943208448, 943208448, 943208448, 471604224, 202116096, 0,
];

/// Banana facing up
pub const BANANA_UP: [i32; 9] = [
    262153,
    4063232,
    4063294,
    8323072,
    8323199,
    -2130771968,
    -2130738945,
    -2134835200,
    -2134802239,
];

/// Banana facing right
pub const BANANA_RIGHT: [i32; 9] = [
    458758,
    -1061109760,
    -522133504,
    1886416896,
    1886416896,
    1886416896,
    -522133504,
    -1061109760,
    0,
];

/// Banana facing down
pub const BANANA_DOWN: [i32; 9] = [
    262153,
    -2134835200,
    -2134802239,
    -2130771968,
    -2130738945,
    8323072,
    8323199,
    4063232,
    4063294,
];

/// One of the four banana rotation states, in spin order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Left,
    Up,
    Right,
    Down,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Left,
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
    ];

    /// Orientation for a rotation index (wraps modulo 4)
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    pub fn index(self) -> usize {
        match self {
            Orientation::Left => 0,
            Orientation::Up => 1,
            Orientation::Right => 2,
            Orientation::Down => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Left => "left",
            Orientation::Up => "up",
            Orientation::Right => "right",
            Orientation::Down => "down",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Orientation::Left),
            "up" => Some(Orientation::Up),
            "right" => Some(Orientation::Right),
            "down" => Some(Orientation::Down),
            _ => None,
        }
    }

    /// Packed sprite record for this orientation
    pub fn packed_data(self) -> &'static [i32] {
        match self {
            Orientation::Left => &BANANA_LEFT,
            Orientation::Up => &BANANA_UP,
            Orientation::Right => &BANANA_RIGHT,
            Orientation::Down => &BANANA_DOWN,
        }
    }
}

/// A decoded image of 4-bit palette indices, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelGrid {
    pub width: u16,
    pub height: u16,
    pub indices: Vec<u8>,
}

impl PixelGrid {
    /// Palette index at (x, y), or None outside the grid
    pub fn index_at(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.indices
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Color at (x, y); None for transparent (index 0) or out of range
    pub fn color_at(&self, x: u16, y: u16) -> Option<Rgb> {
        match self.index_at(x, y)? {
            0 => None,
            i => Some(EGA_PALETTE[i as usize & 0xF]),
        }
    }

    /// Number of non-transparent pixels
    pub fn opaque_count(&self) -> usize {
        self.indices.iter().filter(|&&i| i != 0).count()
    }

    /// RGBA pixels, row-major; index 0 is fully transparent
    pub fn to_rgba(&self) -> Vec<[u8; 4]> {
        self.indices
            .iter()
            .map(|&i| match i {
                0 => [0, 0, 0, 0],
                i => EGA_PALETTE[i as usize & 0xF].opaque(),
            })
            .collect()
    }
}

/// Result of decoding a packed sprite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodedSprite {
    Decoded(PixelGrid),
    /// Declared size does not fit the available data
    Invalid { width: u16, height: u16 },
}

impl DecodedSprite {
    pub fn is_valid(&self) -> bool {
        matches!(self, DecodedSprite::Decoded(_))
    }

    pub fn grid(&self) -> Option<&PixelGrid> {
        match self {
            DecodedSprite::Decoded(grid) => Some(grid),
            DecodedSprite::Invalid { .. } => None,
        }
    }

    pub fn dimensions(&self) -> (u16, u16) {
        match self {
            DecodedSprite::Decoded(grid) => (grid.width, grid.height),
            DecodedSprite::Invalid { width, height } => (*width, *height),
        }
    }

    /// RGBA pixels; the invalid placeholder is a solid magenta fill
    pub fn to_rgba(&self) -> Vec<[u8; 4]> {
        match self {
            DecodedSprite::Decoded(grid) => grid.to_rgba(),
            DecodedSprite::Invalid { width, height } => {
                vec![INVALID_SPRITE_COLOR.opaque(); *width as usize * *height as usize]
            }
        }
    }
}

/// Reverse the bits of every nibble in a 32-bit word
#[inline]
fn reverse_nibbles(word: u32) -> u32 {
    word.to_le_bytes()
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &byte)| {
            let fixed = (NIBBLE_REVERSE[(byte & 0xF) as usize] << 4)
                | NIBBLE_REVERSE[(byte >> 4) as usize];
            acc | (u32::from(fixed) << (8 * i))
        })
}

/// Concatenated bit sequence, word order, LSB first within each word
struct BitStream {
    words: Vec<u32>,
}

impl BitStream {
    fn bit(&self, index: usize) -> u8 {
        self.words
            .get(index / 32)
            .map_or(0, |w| ((w >> (index % 32)) & 1) as u8)
    }
}

/// Decode a packed planar sprite record
pub fn decode_planar(words: &[i32]) -> DecodedSprite {
    let Some((&header, data)) = words.split_first() else {
        return DecodedSprite::Invalid {
            width: 0,
            height: 0,
        };
    };
    let header = header as u32;
    let width = (header & 0xFFFF) as u16;
    let height = (header >> 16) as u16;

    // Each 32-bit data word carries 8 pixels worth of 4-plane data
    let available_pixels = 8 * data.len();
    let total_pixels = width as usize * height as usize;
    if total_pixels == 0 || total_pixels > available_pixels {
        log::warn!(
            "Sprite {}x{} does not fit {} data words",
            width,
            height,
            data.len()
        );
        return DecodedSprite::Invalid { width, height };
    }

    let bits = BitStream {
        words: data.iter().map(|&w| reverse_nibbles(w as u32)).collect(),
    };

    let pitch = 8 * (width as usize).div_ceil(8);
    let mut indices = Vec::with_capacity(total_pixels);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let pi = x + pitch * y;
            let color = (0..4).fold(0u8, |acc, plane| acc | (bits.bit(pi + plane * pitch) << plane));
            indices.push(color);
        }
    }

    DecodedSprite::Decoded(PixelGrid {
        width,
        height,
        indices,
    })
}

/// The four decoded banana orientations
#[derive(Debug, Clone)]
pub struct BananaSprites {
    sprites: [DecodedSprite; 4],
}

impl BananaSprites {
    /// Decode all four canonical records (run once at startup)
    pub fn decode() -> Self {
        let sprites = Orientation::ALL.map(|o| decode_planar(o.packed_data()));
        log::info!(
            "Decoded {} banana sprites",
            sprites.iter().filter(|s| s.is_valid()).count()
        );
        Self { sprites }
    }

    pub fn get(&self, orientation: Orientation) -> &DecodedSprite {
        &self.sprites[orientation.index()]
    }

    pub fn by_name(&self, name: &str) -> Option<&DecodedSprite> {
        Orientation::from_str(name).map(|o| self.get(o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_rows(sprite: &DecodedSprite) -> Vec<String> {
        let grid = sprite.grid().expect("sprite should decode");
        (0..grid.height)
            .map(|y| {
                (0..grid.width)
                    .map(|x| format!("{:x}", grid.index_at(x, y).unwrap()))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_reverse_nibbles() {
        assert_eq!(reverse_nibbles(0x0000_0001), 0x0000_0080);
        assert_eq!(reverse_nibbles(0x0000_0010), 0x0000_0008);
        assert_eq!(reverse_nibbles(0xFFFF_FFFF), 0xFFFF_FFFF);
        assert_eq!(reverse_nibbles(0x0100_0000), 0x8000_0000);
    }

    #[test]
    fn test_header_dimensions() {
        assert_eq!(decode_planar(&BANANA_LEFT).dimensions(), (6, 7));
        assert_eq!(decode_planar(&BANANA_RIGHT).dimensions(), (6, 7));
        assert_eq!(decode_planar(&BANANA_UP).dimensions(), (9, 4));
        assert_eq!(decode_planar(&BANANA_DOWN).dimensions(), (9, 4));
    }

    #[test]
    fn test_every_orientation_has_opaque_pixels() {
        let sprites = BananaSprites::decode();
        for o in Orientation::ALL {
            let grid = sprites.get(o).grid().expect("canonical record decodes");
            assert!(grid.opaque_count() > 0, "{} is blank", o.as_str());
        }
    }

    #[test]
    fn test_left_pixels() {
        let rows = grid_rows(&decode_planar(&BANANA_LEFT));
        assert_eq!(
            rows,
            ["0000ee", "000077", "0008bb", "000cdd", "000eee", "000777", "008bb3"]
        );
    }

    #[test]
    fn test_right_pixels() {
        let rows = grid_rows(&decode_planar(&BANANA_RIGHT));
        assert_eq!(
            rows,
            ["ee0000", "770000", "bb8000", "ddc000", "eee000", "777000", "3bb800"]
        );
    }

    #[test]
    fn test_up_pixels() {
        let rows = grid_rows(&decode_planar(&BANANA_UP));
        assert_eq!(rows, ["00eeeee00", "007777700", "08bbbbb80", "0cdddddc0"]);
    }

    #[test]
    fn test_down_pixels() {
        let rows = grid_rows(&decode_planar(&BANANA_DOWN));
        assert_eq!(rows, ["ee00000ee", "770000077", "bb88888bb", "ddcccccdd"]);
    }

    #[test]
    fn test_short_data_is_invalid() {
        // 16x16 declared, only one data word (8 pixels)
        let words = [(16 << 16) | 16, 0x1234_5678];
        let sprite = decode_planar(&words);
        assert_eq!(sprite, DecodedSprite::Invalid { width: 16, height: 16 });
        assert!(!sprite.is_valid());

        let rgba = sprite.to_rgba();
        assert_eq!(rgba.len(), 256);
        assert!(rgba.iter().all(|p| *p == [255, 0, 255, 255]));
    }

    #[test]
    fn test_empty_input_is_invalid() {
        assert!(!decode_planar(&[]).is_valid());
        assert!(!decode_planar(&[(4 << 16) | 4]).is_valid());
    }

    #[test]
    fn test_transparent_background() {
        let sprite = decode_planar(&BANANA_LEFT);
        let grid = sprite.grid().unwrap();
        assert_eq!(grid.color_at(0, 0), None);
        assert_eq!(grid.color_at(4, 0), Some(EGA_PALETTE[14]));
        assert_eq!(grid.to_rgba()[0], [0, 0, 0, 0]);
        assert_eq!(grid.color_at(6, 0), None);
    }

    #[test]
    fn test_orientation_names() {
        let sprites = BananaSprites::decode();
        assert!(sprites.by_name("Up").is_some());
        assert!(sprites.by_name("sideways").is_none());
        assert_eq!(Orientation::from_index(6), Orientation::Right);
    }
}
