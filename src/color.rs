//! Hex color decoding and canvas fill style formatting.

/// Decodes a 6-digit hex color into `[red, green, blue]`.
///
/// Digits are case-insensitive. Input is not validated: a digit that is
/// missing or not hexadecimal counts as `-1`, so malformed colors decode to
/// values outside `0..=255` instead of failing.
///
/// ```
/// use letters::color::hex_color_to_rgb;
///
/// assert_eq!(hex_color_to_rgb("FF00AB"), [255, 0, 171]);
/// assert_eq!(hex_color_to_rgb("ff00ab"), [255, 0, 171]);
/// ```
pub fn hex_color_to_rgb(hex: &str) -> [i32; 3] {
    log::debug!("hex: {hex}");
    let digits: Vec<char> = hex.chars().collect();
    let digit = |index: usize| {
        digits
            .get(index)
            .and_then(|c| c.to_digit(16))
            .map_or(-1, |d| d as i32)
    };
    let component = |start: usize| digit(start) * 16 + digit(start + 1);
    let rgb = [component(0), component(2), component(4)];
    if rgb.iter().any(|c| *c < 0) || digits.len() != 6 {
        log::warn!("malformed hex color `{hex}` decoded as {rgb:?}");
    }
    rgb
}

/// Formats a color and an opacity as a CSS `rgba(r,g,b,a)` color.
///
/// Nothing is clamped.
pub fn rgb_and_alpha_to_rgba(rgb: [i32; 3], alpha: f64) -> String {
    format!("rgba({},{},{},{})", rgb[0], rgb[1], rgb[2], alpha)
}
