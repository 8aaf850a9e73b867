//! Random seed values for the text, its colors and its font.
//!
//! Every generator has a `*_with` variant that takes the RNG explicitly,
//! so callers can seed it.

use rand::Rng;

/// Font families offered by the web font service.
pub const FONTS: [&str; 7] = [
    "Arial",
    "Georgia",
    "Helvetica",
    "Inconsolata",
    "Lily Script One",
    "Lobster",
    "Verdana",
];

const UPPER: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Returns a two-character string: an uppercase letter followed by a
/// lowercase letter.
pub fn random_string() -> String {
    random_string_with(&mut rand::rng())
}

/// [`random_string`] with an explicit RNG.
pub fn random_string_with<R: Rng>(rng: &mut R) -> String {
    let upper = UPPER[rng.random_range(0..UPPER.len())] as char;
    let lower = LOWER[rng.random_range(0..LOWER.len())] as char;
    [upper, lower].iter().collect()
}

/// Returns a 6-digit uppercase hex color.
///
/// Each component is drawn from `0..255`, so `FF` is never produced.
pub fn random_hex_color() -> String {
    random_hex_color_with(&mut rand::rng())
}

/// [`random_hex_color`] with an explicit RNG.
pub fn random_hex_color_with<R: Rng>(rng: &mut R) -> String {
    (0..3)
        .map(|_| format!("{:02X}", rng.random_range(0..255u8)))
        .collect()
}

/// Returns one of [`FONTS`].
pub fn random_font() -> &'static str {
    random_font_with(&mut rand::rng())
}

/// [`random_font`] with an explicit RNG.
pub fn random_font_with<R: Rng>(rng: &mut R) -> &'static str {
    FONTS[rng.random_range(0..FONTS.len())]
}
